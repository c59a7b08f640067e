//! Error types for the matterbatch library
//!
//! A single error enum covers every library operation: file I/O, front
//! matter decoding and encoding, content-tree resolution, and the git
//! commit step. Decode and encode failures are per-document errors; the
//! batch runner contains them to the affected file instead of aborting
//! the whole run.

use std::path::PathBuf;
use thiserror::Error;

use crate::codec::FrontMatterFormat;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum MatterBatchError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A front matter block failed to parse as the format its delimiter claims
    #[error("invalid {format} front matter: {reason}")]
    Decode {
        format: FrontMatterFormat,
        reason: String,
    },

    /// A value has no representation in the target format
    #[error("cannot encode field '{field}' as {format}: {reason}")]
    Encode {
        format: FrontMatterFormat,
        field: String,
        reason: String,
    },

    /// The configured content path exists but is not a directory
    #[error("'{}' is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    /// Git integration errors (missing repository, failed add/commit)
    #[error("{reason}")]
    Git { reason: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, MatterBatchError>;

impl MatterBatchError {
    /// Create a new decode error
    pub fn decode(format: FrontMatterFormat, reason: impl Into<String>) -> Self {
        Self::Decode {
            format,
            reason: reason.into(),
        }
    }

    /// Create a new encode error
    pub fn encode(
        format: FrontMatterFormat,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Encode {
            format,
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a new not-a-directory error
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Create a new git error
    pub fn git(reason: impl Into<String>) -> Self {
        Self::Git {
            reason: reason.into(),
        }
    }

    /// Whether this error concerns a single document rather than the run.
    ///
    /// The batch runner skips the affected file on document errors and
    /// aborts on everything else.
    pub fn is_document_error(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::Encode { .. })
    }
}
