//! Error types

use std::io;

use thiserror::Error;

/// Errors produced by the pagination core
#[derive(Debug, Error)]
pub enum PagerError {
    /// Reading the content container failed
    #[error("measurement failed: {0}")]
    Measurement(String),

    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid debounce configuration: {0}")]
    InvalidDebounce(String),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// The change feed could not start observing
    #[error("observer error: {0}")]
    Observe(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, PagerError>;
