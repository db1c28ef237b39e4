//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! missing templates and bounding volumes, host spawn failures, invalid
//! configuration, and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("chain has no template to instantiate")]
    NoTemplate,

    #[error("template has no measurable bounding volume")]
    NoBoundingVolume,

    #[error("spawn failed: {0}")]
    Spawn(String),

    #[error("rule index {index} is out of range or not active")]
    InactiveRule { index: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
