//! Command Line Interface for the intentbot chatbot.

pub mod args;
pub mod commands;
pub mod output;
pub mod transcript;

// Re-export commonly used types
pub use args::*;
pub use commands::*;
pub use output::*;
pub use transcript::{TranscriptEntry, TranscriptStore};
