//! Command implementations for the intentbot CLI.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::cli::transcript::{TranscriptEntry, TranscriptStore};
use crate::error::Result;
use crate::ml::intent_classifier::{ClassificationEngine, EngineHandle, load_config, train_from_path};

/// Typed at the prompt to retrain from the knowledge base file.
pub const RELOAD_COMMAND: &str = ":reload";

/// Responses that end a chat session.
const FAREWELL_RESPONSES: &[&str] = &["goodbye", "bye"];

/// Inputs that end a chat session without classification.
const QUIT_COMMANDS: &[&str] = &["quit", "exit"];

/// Execute a CLI command.
pub fn execute_command(args: IntentBotArgs) -> anyhow::Result<()> {
    match &args.command {
        Command::Chat(chat_args) => chat(chat_args.clone(), &args),
        Command::Classify(classify_args) => classify(classify_args.clone(), &args),
        Command::History(history_args) => show_history(history_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
    }
}

/// What the chat loop should do after one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// Blank input; prompt again.
    Skip,
    /// The user asked to leave.
    Quit,
    /// Print the response and continue.
    Reply(String),
    /// Print the response and end the session.
    Farewell(String),
}

/// One interactive conversation against the live engine.
pub struct ChatSession<'a, R: Rng> {
    handle: &'a EngineHandle,
    transcript: Option<TranscriptStore>,
    rng: R,
}

impl<'a, R: Rng> ChatSession<'a, R> {
    pub fn new(handle: &'a EngineHandle, transcript: Option<TranscriptStore>, rng: R) -> Self {
        ChatSession {
            handle,
            transcript,
            rng,
        }
    }

    /// Answer one line of user input.
    pub fn respond(&mut self, line: &str) -> Result<Turn> {
        let input = line.trim();
        if input.is_empty() {
            return Ok(Turn::Skip);
        }
        if QUIT_COMMANDS.contains(&input.to_lowercase().as_str()) {
            return Ok(Turn::Quit);
        }

        let response = self.handle.current().classify_with(input, &mut self.rng)?;

        if let Some(transcript) = &self.transcript
            && let Err(e) = transcript.append(&TranscriptEntry::new(input, response.as_str()))
        {
            warn!("failed to record turn in {}: {e}", transcript.path().display());
        }

        if is_farewell(&response) {
            Ok(Turn::Farewell(response))
        } else {
            Ok(Turn::Reply(response))
        }
    }
}

/// Whether a response signals the end of the conversation: the whole
/// response, ignoring case, is one of the farewell words.
fn is_farewell(response: &str) -> bool {
    FAREWELL_RESPONSES.contains(&response.to_lowercase().as_str())
}

/// Read one line of input, replacing invalid UTF-8 instead of failing.
/// Returns `None` at end of input.
fn read_utterance<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(buf);
    if let std::borrow::Cow::Owned(_) = line {
        warn!("input line is not valid UTF-8; invalid bytes were replaced");
    }
    Ok(Some(line.into_owned()))
}

fn build_engine(model: &ModelArgs) -> anyhow::Result<ClassificationEngine> {
    let config = load_config(model.config.as_deref()).context("failed to load engine config")?;
    info!("training on {}", model.intents.display());
    train_from_path(&model.intents, config)
        .with_context(|| format!("failed to train on {}", model.intents.display()))
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Run an interactive chat on stdin/stdout.
fn chat(args: ChatArgs, cli_args: &IntentBotArgs) -> anyhow::Result<()> {
    let handle = EngineHandle::new(build_engine(&args.model)?)?;
    let transcript = (!args.no_transcript).then(|| TranscriptStore::open(&args.transcript));
    let mut session = ChatSession::new(&handle, transcript, seeded_rng(args.seed));

    if cli_args.verbosity() > 0 {
        println!("Welcome to the chatbot. Type a message and press Enter.");
        println!("Type 'quit' to leave or '{RELOAD_COMMAND}' to retrain.");
    }

    let mut input = io::stdin().lock();
    let mut stdout = io::stdout();
    let mut buf = Vec::new();
    loop {
        print!("You: ");
        stdout.flush()?;

        let Some(line) = read_utterance(&mut input, &mut buf)? else {
            break;
        };

        if line.trim() == RELOAD_COMMAND {
            match build_engine(&args.model).and_then(|engine| Ok(handle.swap(engine)?)) {
                Ok(_) => println!("Bot: knowledge base reloaded."),
                Err(e) => {
                    warn!("reload failed, keeping the current engine: {e:#}");
                    eprintln!("Reload failed: {e:#}");
                }
            }
            continue;
        }

        match session.respond(&line)? {
            Turn::Skip => continue,
            Turn::Quit => break,
            Turn::Reply(response) => println!("Bot: {response}"),
            Turn::Farewell(response) => {
                println!("Bot: {response}");
                println!("Thank you for chatting with me. Have a great day!");
                break;
            }
        }
    }

    Ok(())
}

/// Classify one utterance.
fn classify(args: ClassifyArgs, cli_args: &IntentBotArgs) -> anyhow::Result<()> {
    let engine = build_engine(&args.model)?;
    let input = args.utterance();
    let classification = engine.classify_detailed(&input, &mut seeded_rng(args.seed))?;

    output_result(
        "Classification",
        &ClassifyResult {
            input,
            tag: classification.tag,
            response: classification.response,
        },
        cli_args,
    )?;
    Ok(())
}

/// Print recorded conversation turns.
fn show_history(args: HistoryArgs, cli_args: &IntentBotArgs) -> anyhow::Result<()> {
    let store = TranscriptStore::open(&args.transcript);
    let entries = match args.limit {
        Some(limit) => store.tail(limit)?,
        None => store.entries()?,
    };

    output_history(
        &HistoryResult {
            path: args.transcript.to_string_lossy().to_string(),
            entries,
        },
        cli_args,
    )?;
    Ok(())
}

/// Train and report engine statistics.
fn show_stats(args: StatsArgs, cli_args: &IntentBotArgs) -> anyhow::Result<()> {
    let engine = build_engine(&args.model)?;
    let model = engine.model()?;

    output_result(
        "Engine Statistics",
        &EngineStats {
            intents: model.repository().len(),
            patterns: model.repository().pattern_count(),
            vocabulary_size: model.vectorizer().vocabulary_size(),
            classifier: model.classifier().name().to_string(),
            training_accuracy: model.training_accuracy(),
            training_ms: model.training_duration().as_millis() as u64,
        },
        cli_args,
    )?;
    Ok(())
}
