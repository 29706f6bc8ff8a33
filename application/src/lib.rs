pub use crate::error::*;

mod error;
pub mod service;
pub mod transfer;
