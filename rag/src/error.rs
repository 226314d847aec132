use thiserror::Error;

/// Failures of the retrieval pipeline. None of them are retried; each one
/// ends the run.
#[derive(Debug, Error)]
pub enum RagError {
    /// No documents could be loaded, or a document could not be parsed.
    #[error("Loading error: {0}")]
    Loading(String),

    /// The embedding backend could not be reached or returned garbage.
    #[error("Embedding backend unavailable ({url}): {message}")]
    EmbeddingUnavailable { url: String, message: String },

    /// A malformed vector was handed to the index.
    #[error("Index query error: {0}")]
    IndexQuery(String),

    /// The language model call failed (network, auth, quota, empty reply).
    #[error("Generation error ({model}): {message}")]
    Generation { model: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RagError>;
