use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// A field a submitted form was refused for.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct FieldError {
    location: &'static str,
    path: &'static str,
    msg: &'static str,
    value: String,
}

impl FieldError {
    pub fn new(path: &'static str, msg: &'static str, value: impl Into<String>) -> Self {
        Self {
            location: "body",
            path,
            msg,
            value: value.into(),
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn msg(&self) -> &'static str {
        self.msg
    }
}

/// Replaces the characters that are significant in HTML with their entities.
pub fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Trimmed value, `None` when the field is missing or blank.
pub fn trimmed(input: &Option<String>) -> Option<&str> {
    input
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

pub fn parse_id(input: &str) -> Option<Uuid> {
    Uuid::parse_str(input).ok()
}

/// Accepts a `yyyy-MM-dd` calendar date (midnight UTC) or an RFC 3339 timestamp.
pub fn parse_datetime(input: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(input, &Rfc3339)
        .ok()
        .or_else(|| parse_date(input).map(|date| date.midnight().assume_utc()))
}

pub fn parse_date(input: &str) -> Option<Date> {
    Date::parse(input, format_description!("[year]-[month]-[day]")).ok()
}

#[cfg(test)]
mod test {
    use time::macros::{date, datetime};

    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="/x">Tom & 'Jerry' \ `</a>"#),
            "&lt;a href=&quot;&#x2F;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27; &#x5C; &#96;&lt;&#x2F;a&gt;"
        );
        assert_eq!(escape("Penguin Classics, 2003"), "Penguin Classics, 2003");
    }

    #[test]
    fn blank_is_absent() {
        assert_eq!(trimmed(&None), None);
        assert_eq!(trimmed(&Some("   ".into())), None);
        assert_eq!(trimmed(&Some(" Imprint ".into())), Some("Imprint"));
    }

    #[test]
    fn accepts_dates_and_timestamps() {
        assert_eq!(
            parse_datetime("2026-10-19"),
            Some(datetime!(2026-10-19 0:00 UTC))
        );
        assert_eq!(
            parse_datetime("2026-10-19T12:30:00+02:00"),
            Some(datetime!(2026-10-19 12:30 +2))
        );
        assert_eq!(parse_datetime("19/10/2026"), None);
        assert_eq!(parse_date("1920-01-02"), Some(date!(1920 - 01 - 02)));
        assert_eq!(parse_date("1920-13-02"), None);
    }
}
