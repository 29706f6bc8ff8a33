use time::format_description::FormatItem;
use time::macros::format_description;
use time::Date;

// Medium-length calendar date, e.g. "Oct 19, 2026".
const MEDIUM_DATE: &[FormatItem<'_>] =
    format_description!("[month repr:short] [day padding:none], [year]");
const INPUT_DATE: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

pub fn format_medium_date(date: &Date) -> String {
    date.format(MEDIUM_DATE).unwrap_or_default()
}

pub fn format_input_date(date: &Date) -> String {
    date.format(INPUT_DATE).unwrap_or_default()
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use super::{format_input_date, format_medium_date};

    #[test]
    fn medium_date_has_no_day_padding() {
        assert_eq!(format_medium_date(&date!(2026 - 10 - 19)), "Oct 19, 2026");
        assert_eq!(format_medium_date(&date!(1818 - 03 - 04)), "Mar 4, 1818");
    }

    #[test]
    fn input_date_is_zero_padded() {
        assert_eq!(format_input_date(&date!(1818 - 03 - 04)), "1818-03-04");
    }
}
