use crate::core::chem::blocks::ConfigError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// A search precondition failed. Raised before any enumeration work begins;
    /// the caller gets no partial results.
    #[error("Invalid search request: {0}")]
    InvalidRequest(String),

    /// The requested coarseness level has no bounds in the block table. This is
    /// a caller defect rather than a data problem and is never recovered.
    #[error("Configuration error: {source}")]
    Configuration {
        #[from]
        source: ConfigError,
    },
}
