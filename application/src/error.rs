use std::fmt::{Display, Formatter};

use error_stack::Context;

#[derive(Debug)]
pub enum ReconcileError {
    Configuration,
    Connection,
    Query,
    Deletion,
    Timeout,
}

impl Display for ReconcileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconcileError::Configuration => write!(f, "Invalid reconcile configuration"),
            ReconcileError::Connection => write!(f, "Failed to connect to the record store"),
            ReconcileError::Query => write!(f, "Failed to group records"),
            ReconcileError::Deletion => write!(f, "Failed to delete duplicate records"),
            ReconcileError::Timeout => write!(f, "Reconcile deadline exceeded"),
        }
    }
}

impl Context for ReconcileError {}
