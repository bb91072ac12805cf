//! Error types for the treeshift core library
//!
//! Compile-time failures (a mapping table that cannot be turned into a plan)
//! and apply-time failures (a source document whose shape contradicts a
//! compiled plan) share one error enum so callers can propagate both with `?`.

use crate::node::NodeKind;
use thiserror::Error;

/// Main error type for treeshift operations
#[derive(Error, Debug)]
pub enum Error {
    /// A source/destination pair carries a different number of `[]` markers
    #[error(
        "Invalid array mapping: {source_path} -> {destination_path} \
         ({source_markers} source vs {destination_markers} destination sequence markers)"
    )]
    ArrayArityMismatch {
        source_path: String,
        destination_path: String,
        source_markers: usize,
        destination_markers: usize,
    },

    /// The source document has a scalar where the plan needs a container
    #[error("Structural mismatch: expecting {expected}, got {found}. Key: {path}")]
    StructuralMismatch {
        expected: NodeKind,
        found: NodeKind,
        /// Destination path resolved so far, for diagnostics
        path: String,
    },

    /// Mapping table given as JSON could not be deserialized
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an array arity error for a mapping pair
    pub fn array_arity(
        source_path: impl Into<String>,
        destination_path: impl Into<String>,
        source_markers: usize,
        destination_markers: usize,
    ) -> Self {
        Self::ArrayArityMismatch {
            source_path: source_path.into(),
            destination_path: destination_path.into(),
            source_markers,
            destination_markers,
        }
    }

    /// Create a structural mismatch error
    pub fn structural(expected: NodeKind, found: NodeKind, path: impl Into<String>) -> Self {
        Self::StructuralMismatch {
            expected,
            found,
            path: path.into(),
        }
    }

    /// Whether this error came from applying a plan to a document
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::StructuralMismatch { .. })
    }

    /// Whether this error prevents a shifter from being constructed
    pub fn is_compile_time(&self) -> bool {
        matches!(self, Self::ArrayArityMismatch { .. } | Self::Json { .. })
    }

    /// The destination key path a structural mismatch was detected at
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::StructuralMismatch { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
