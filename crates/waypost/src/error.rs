//! Error handling for the waypost crate.

use std::result::Result as StdResult;

use thiserror::Error;

use crate::path::ParseError;

/// Convenient result type for the waypost crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for route registration and typed context access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A route string could not be parsed into a route key.
    #[error("Invalid route: {0}")]
    Parse(#[from] ParseError),

    /// A binding or user data value was read that was never supplied.
    #[error("No value named '{name}'")]
    MissingValue {
        /// Name the caller asked for.
        name: String,
    },

    /// A binding or user data value exists but holds a different type.
    #[error("Value '{name}' holds {found}, not {expected}")]
    TypeMismatch {
        /// Name the caller asked for.
        name: String,
        /// Type the caller asserted.
        expected: &'static str,
        /// Type that was stored under the name.
        found: &'static str,
    },

    /// Router configuration failed to load.
    #[error("Config error: {0}")]
    Config(String),
}
