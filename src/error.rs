use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProjectionError>;

/// Placeholder text handed to text consumers when serialization fails.
pub const UNDEFINED_TEXT: &str = "undefined";

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("Malformed node {tag}: {reason}")]
    Structure { tag: String, reason: String },

    #[error("Pixel data node {tag} does not hold frame descriptors")]
    PixelDataShape { tag: String },

    #[error("Maximum nesting depth {max_depth} exceeded at {tag}")]
    DepthExceeded { tag: String, max_depth: usize },

    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ProjectionError {
    pub(crate) fn structure(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Structure {
            tag: tag.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{}: failed to open DICOM file ({message})", path.display())]
    Open { path: PathBuf, message: String },
}
