use crate::builder::BuildError;
use crate::config::ConfigError;
use crate::file_processor::FileProcessorError;
use crate::header::HeaderError;
use crate::logging::{codes, Code};
use crate::model::ModelError;
use crate::validation::RowError;

/// Import errors, one variant per stage
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Invalid import configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Header rejected: {0}")]
    Header(#[from] HeaderError),

    #[error("Data rows rejected: {0}")]
    Rows(#[from] RowError),

    #[error("Table construction failed: {0}")]
    Build(#[from] BuildError),

    #[error("Model rejected the table: {0}")]
    Model(#[from] ModelError),

    #[error("Forced install failed: {0}")]
    ForcedInstall(ModelError),
}

impl ImportError {
    pub fn error_code(&self) -> Code {
        match self {
            ImportError::Config(_) => codes::system::INVALID_CONFIGURATION,
            ImportError::FileProcessing(e) => e.error_code(),
            ImportError::Header(e) => e.error_code(),
            ImportError::Rows(e) => e.error_code(),
            ImportError::Build(e) => e.error_code(),
            ImportError::Model(e) => e.error_code(),
            ImportError::ForcedInstall(_) => codes::install::FORCED_INSTALL_FAILED,
        }
    }

    /// The file could not be read; the import is a no-op
    pub fn is_io(&self) -> bool {
        matches!(self, ImportError::FileProcessing(_))
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}
