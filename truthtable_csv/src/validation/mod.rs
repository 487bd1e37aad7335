//! Row stage: data rows checked against the header shape and entry alphabet

pub mod error;
pub mod validator;

pub use error::RowError;
pub use validator::{is_valid_entry, RowStatistics, RowValidator, ENTRY_ALPHABET};
