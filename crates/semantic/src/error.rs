use std::io;
use thiserror::Error;

/// Errors surfaced while loading an embedder or embedding text.
#[derive(Debug, Error)]
pub enum SemanticError {
    /// The ONNX model could not be located locally and no fallback URL was provided.
    #[error("model file not found: {0}")]
    ModelNotFound(String),
    /// The tokenizer JSON is missing and there was no remote URL to fetch it from.
    #[error("tokenizer missing: {0}")]
    TokenizerMissing(String),
    /// Configuration is inconsistent (e.g., a zero token budget).
    #[error("invalid semantic config: {0}")]
    InvalidConfig(String),
    /// Unable to download remote assets.
    #[error("download failed: {0}")]
    Download(String),
    /// Low-level IO failures while touching the filesystem.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// ONNX Runtime or tokenizer errors.
    #[error("inference failure: {0}")]
    Inference(String),
    /// The model worker thread is gone and cannot take more work.
    #[error("embedding worker unavailable")]
    WorkerUnavailable,
}

impl Clone for SemanticError {
    fn clone(&self) -> Self {
        match self {
            SemanticError::ModelNotFound(s) => SemanticError::ModelNotFound(s.clone()),
            SemanticError::TokenizerMissing(s) => SemanticError::TokenizerMissing(s.clone()),
            SemanticError::InvalidConfig(s) => SemanticError::InvalidConfig(s.clone()),
            SemanticError::Download(s) => SemanticError::Download(s.clone()),
            SemanticError::Io(err) => SemanticError::Io(io::Error::new(err.kind(), err.to_string())),
            SemanticError::Inference(s) => SemanticError::Inference(s.clone()),
            SemanticError::WorkerUnavailable => SemanticError::WorkerUnavailable,
        }
    }
}
