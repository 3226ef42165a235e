//! Error types for the lexiphrase library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`LexiphraseError`] enum. Three variants are fatal to a run by contract:
//! [`LexiphraseError::InvalidInput`], [`LexiphraseError::DependencyUnavailable`]
//! and [`LexiphraseError::InsufficientData`]. A document that reduces to zero
//! tokens is never an error.
//!
//! # Examples
//!
//! ```
//! use lexiphrase::error::{LexiphraseError, Result};
//!
//! fn fit_nothing() -> Result<()> {
//!     Err(LexiphraseError::insufficient_data("corpus is empty"))
//! }
//!
//! match fit_nothing() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for lexiphrase operations.
#[derive(Error, Debug)]
pub enum LexiphraseError {
    /// A document was not usable text.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The linguistic model could not be loaded.
    #[error("Dependency unavailable: {0}")]
    DependencyUnavailable(String),

    /// Phrase fitting was asked to learn from an empty corpus.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Binary model serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for operations that may fail with LexiphraseError.
pub type Result<T> = std::result::Result<T, LexiphraseError>;

impl LexiphraseError {
    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        LexiphraseError::InvalidInput(msg.into())
    }

    /// Create a new dependency unavailable error.
    pub fn dependency_unavailable<S: Into<String>>(msg: S) -> Self {
        LexiphraseError::DependencyUnavailable(msg.into())
    }

    /// Create a new insufficient data error.
    pub fn insufficient_data<S: Into<String>>(msg: S) -> Self {
        LexiphraseError::InsufficientData(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        LexiphraseError::InvalidConfig(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        LexiphraseError::Analysis(msg.into())
    }
}

impl From<bincode::Error> for LexiphraseError {
    fn from(err: bincode::Error) -> Self {
        LexiphraseError::Serialization(err.to_string())
    }
}
