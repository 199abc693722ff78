//! Common error types used throughout the crate.

use std::fmt;

/// Result type used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type covering failures across tamp containers.
#[derive(Debug)]
pub enum Error {
    /// An argument violated preconditions.
    InvalidArgument(String),
    /// An index fell outside the container.
    OutOfBounds(String),
    /// The allocator could not produce a buffer.
    AllocFailed(String),
}

impl Error {
    /// Creates an [`Error::InvalidArgument`] with the provided message.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates an [`Error::OutOfBounds`] with the provided message.
    pub fn out_of_bounds(msg: impl Into<String>) -> Self {
        Self::OutOfBounds(msg.into())
    }

    /// Creates an [`Error::AllocFailed`] with the provided message.
    pub fn alloc(msg: impl Into<String>) -> Self {
        Self::AllocFailed(msg.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "{msg}"),
            Error::OutOfBounds(msg) => write!(f, "{msg}"),
            Error::AllocFailed(msg) => write!(f, "allocation failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
