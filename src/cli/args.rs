//! Command line argument parsing for the intentbot CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// intentbot - a closed-set intent matching chatbot
#[derive(Parser, Debug, Clone)]
#[command(name = "intentbot")]
#[command(about = "Classify utterances into predefined intents and answer them")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct IntentBotArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl IntentBotArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Chat interactively, one line per turn
    Chat(ChatArgs),

    /// Classify a single utterance
    Classify(ClassifyArgs),

    /// Show the conversation history
    History(HistoryArgs),

    /// Train the engine and report statistics
    Stats(StatsArgs),
}

/// Knowledge base and engine configuration shared by model commands
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Knowledge base file (JSON)
    #[arg(short, long, value_name = "INTENTS_FILE", default_value = "intents.json", env = "INTENTBOT_INTENTS")]
    pub intents: PathBuf,

    /// Engine configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "INTENTBOT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for the interactive chat
#[derive(Args, Debug, Clone)]
pub struct ChatArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Transcript file (JSON lines)
    #[arg(short, long, value_name = "TRANSCRIPT_FILE", default_value = "chat_log.jsonl")]
    pub transcript: PathBuf,

    /// Do not record the conversation
    #[arg(long)]
    pub no_transcript: bool,

    /// Seed for response selection
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for one-shot classification
#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Seed for response selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Utterance to classify
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl ClassifyArgs {
    /// The utterance, with separate words joined by spaces.
    pub fn utterance(&self) -> String {
        self.text.join(" ")
    }
}

/// Arguments for the history viewer
#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Transcript file (JSON lines)
    #[arg(short, long, value_name = "TRANSCRIPT_FILE", default_value = "chat_log.jsonl")]
    pub transcript: PathBuf,

    /// Show only the most recent N turns
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for engine statistics
#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub model: ModelArgs,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
