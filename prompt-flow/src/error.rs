use thiserror::Error;

/// Errors raised while running an analysis or touching its collaborators.
///
/// A model reply that fails to parse is not an error here; see
/// [`crate::parse::ParseError`] and the fallback branch in [`crate::runner`].
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Text generation failed: {0}")]
    Generation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlowError>;
