//! Error types for the intentbot library.
//!
//! All fallible operations in the crate return [`Result`], whose error type is
//! the [`IntentError`] enum. Each variant maps to one failure class of the
//! classification engine, from knowledge-base validation to inference.
//!
//! # Examples
//!
//! ```
//! use intentbot::error::{IntentError, Result};
//!
//! fn check_ready(ready: bool) -> Result<()> {
//!     if !ready {
//!         return Err(IntentError::EngineNotReady);
//!     }
//!     Ok(())
//! }
//!
//! match check_ready(false) {
//!     Ok(_) => println!("ready"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for intentbot operations.
#[derive(Error, Debug)]
pub enum IntentError {
    /// The knowledge base violates the intent invariants (missing tag,
    /// patterns or responses, duplicate tags, unparseable document).
    #[error("Malformed knowledge base: {0}")]
    MalformedKnowledgeBase(String),

    /// Fewer than two distinct tags are available for training.
    #[error("Insufficient training data: {0}")]
    InsufficientData(String),

    /// `classify` was called before the engine finished training.
    #[error("Engine not ready: initialize it with a knowledge base first")]
    EngineNotReady,

    /// A tag was requested that the repository does not contain.
    #[error("Unknown tag: {0}")]
    UnknownTag(String),

    /// Invalid configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// A transcript line could not be parsed.
    #[error("Corrupt transcript at line {line}: {source}")]
    Transcript {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with IntentError.
pub type Result<T> = std::result::Result<T, IntentError>;

impl IntentError {
    /// Create a new malformed knowledge base error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        IntentError::MalformedKnowledgeBase(msg.into())
    }

    /// Create a new insufficient data error.
    pub fn insufficient_data<S: Into<String>>(msg: S) -> Self {
        IntentError::InsufficientData(msg.into())
    }

    /// Create a new unknown tag error.
    pub fn unknown_tag<S: Into<String>>(tag: S) -> Self {
        IntentError::UnknownTag(tag.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        IntentError::InvalidConfig(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        IntentError::InvalidOperation(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        IntentError::Analysis(msg.into())
    }
}
