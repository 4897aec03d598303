use std::time::Duration;
use thiserror::Error;

/// Custom error types for setfilt
#[derive(Error, Debug)]
pub enum Error {
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Packet capacity exceeded: need {needed} bytes, {remaining} remaining")]
    CapacityExceeded {
        /// Bytes the record needed
        needed: usize,
        /// Bytes left in the packet buffer
        remaining: usize,
    },

    #[error("No acknowledgement received within {0:?}")]
    NoAcknowledgement(Duration),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl Error {
    /// Creates a new protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Error::Protocol(msg.into())
    }

    /// Creates a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Error::Network(msg.into())
    }

    /// Creates a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Creates a new capacity error
    pub fn capacity(needed: usize, remaining: usize) -> Self {
        Error::CapacityExceeded { needed, remaining }
    }

    /// Creates a new invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Error::InvalidState(msg.into())
    }
}
