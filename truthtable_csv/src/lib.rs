// Internal modules
pub mod builder;
pub mod config;
pub mod document;
pub mod file_processor;
pub mod header;
pub mod identifiers;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod utils;
pub mod validation;
pub mod variables;

// Re-export key types for library consumers
pub use document::{Cell, ParsedDocument};
pub use model::{AnalyzerModel, Confirmation, Entry, FixedAnswer, TruthTable, TruthTableModel};
pub use pipeline::{
    import_file, parse_document, parse_file, ImportError, ImportReport, ImportStatus,
    InstallOutcome, ParsedTable, PendingInstall,
};
pub use variables::{Variable, VariableList};
