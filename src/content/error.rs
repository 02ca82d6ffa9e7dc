//! Content error types

use std::path::PathBuf;

/// Errors raised while indexing or rendering content
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The slug has no post, or the post cannot be read or validated
    #[error("Post not found: {collection}/{slug}")]
    NotFound { collection: String, slug: String },

    /// Front-matter block could not be parsed or validated
    #[error("Malformed front-matter in {path:?}: {reason}")]
    MalformedFrontMatter { path: PathBuf, reason: String },

    /// A required front-matter field is absent or empty
    #[error("Missing required front-matter field: {0}")]
    MissingField(&'static str),

    /// The `date` field is present but not a recognised date
    #[error("Unrecognised date: {0}")]
    InvalidDate(String),

    /// Opening `---` without a closing one
    #[error("Front-matter block is not terminated")]
    UnterminatedFrontMatter,

    /// YAML syntax or type error inside the front-matter block
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The collection is not part of the site configuration
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentError {
    /// Whether this error should be shown to readers as a missing page
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ContentError::NotFound { .. } | ContentError::UnknownCollection(_)
        )
    }
}

/// Result type for content operations
pub type Result<T> = std::result::Result<T, ContentError>;
