//! Shared primitive types used across the import stages

pub mod location;

pub use location::CellLocation;
