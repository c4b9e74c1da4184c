//! Error types for rusty-fxpath

use thiserror::Error;

/// Main error type for rusty-fxpath
#[derive(Error, Debug)]
pub enum FxPathError {
    #[error("Parse error on line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Invalid rate on line {line}: {rate} (rates must be positive)")]
    InvalidRate { line: usize, rate: u64 },

    #[error("Invalid rate for {from} -> {to}: {rate} (rates must be positive)")]
    ZeroRate { from: String, to: String, rate: u64 },

    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(String),

    #[error("Currency not found: {0}")]
    UnknownCurrency(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl FxPathError {
    /// Shorthand for a parse error at a 1-based input line
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        FxPathError::ParseError {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for rusty-fxpath operations
pub type Result<T> = std::result::Result<T, FxPathError>;
