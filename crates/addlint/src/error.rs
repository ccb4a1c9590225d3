//! Error types for addlint

use std::path::PathBuf;

use thiserror::Error;

use crate::diagnostic::Position;

/// Main error type for addlint operations
#[derive(Error, Debug)]
pub enum AddlintError {
    /// A source file could not be read
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// File that failed to read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A source file is not valid Rust
    #[error("{}:{position}: syntax error: {message}", .path.display())]
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// Parser message
        message: String,
        /// Where the parser gave up
        position: Position,
    },

    /// The pretty-printer could not reproduce a parsed subtree.
    ///
    /// This is an internal invariant violation, never a user error.
    #[error("internal error: cannot render {kind} expression")]
    Render {
        /// Expression kind the renderer rejected
        kind: String,
    },

    /// Evaluation was interrupted through the context flag
    #[error("evaluation interrupted")]
    Interrupted,
}

impl AddlintError {
    /// Build a parse error from a `syn` failure in the given file.
    pub fn parse(path: impl Into<PathBuf>, err: &syn::Error) -> Self {
        Self::Parse {
            path: path.into(),
            message: err.to_string(),
            position: Position::from(err.span().start()),
        }
    }
}

/// Result type alias for addlint operations
pub type Result<T> = std::result::Result<T, AddlintError>;
