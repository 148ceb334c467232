//! Error handling for the waypost-sim crate.

use std::{io, result};

use thiserror::Error;

/// Convenient result type for simulator operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while loading or running a script.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The script is not valid RON for the script schema.
    #[error("Script parse error: {0}")]
    Script(#[from] ron::error::SpannedError),
    /// A route pattern or route string in the script is invalid.
    #[error("Route error: {0}")]
    Route(#[from] waypost::Error),
    /// A step refers to a route string that does not parse.
    #[error("Step {index}: {source}")]
    Step {
        /// Zero-based step index.
        index: usize,
        /// Why the route string was rejected.
        source: waypost::ParseError,
    },
}
