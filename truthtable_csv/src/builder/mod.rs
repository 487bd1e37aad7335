//! Build stage: accepted rows to fixed-length entry rows

pub mod error;
pub mod table_builder;

pub use error::BuildError;
pub use table_builder::TableBuilder;
