use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VariataError {
    #[error("Variation not found: {path}")]
    VariationNotFound { path: PathBuf },

    #[error("Syntax error in {path}: {source}")]
    Syntax {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("View not found: {path}")]
    ViewNotFound { path: PathBuf },

    #[error("No view set for this route")]
    ViewNotSet,

    #[error("Render failed for {path}: {message}")]
    RenderFailed { path: PathBuf, message: String },
}
