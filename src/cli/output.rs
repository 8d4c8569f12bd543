//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{IntentBotArgs, OutputFormat};
use crate::cli::transcript::TranscriptEntry;
use crate::error::Result;

/// Result of a one-shot classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResult {
    pub input: String,
    pub tag: String,
    pub response: String,
}

/// Engine statistics after training.
#[derive(Debug, Serialize, Deserialize)]
pub struct EngineStats {
    pub intents: usize,
    pub patterns: usize,
    pub vocabulary_size: usize,
    pub classifier: String,
    pub training_accuracy: f64,
    pub training_ms: u64,
}

/// Conversation history.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResult {
    pub path: String,
    pub entries: Vec<TranscriptEntry>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &IntentBotArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output history, one turn per block in human mode.
pub fn output_history(history: &HistoryResult, args: &IntentBotArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("Chat History ({})", history.path);
                println!("════════════");
            }
            if history.entries.is_empty() {
                println!("No conversation recorded yet.");
            }
            for entry in &history.entries {
                println!();
                println!("[{}]", entry.timestamp.format("%Y-%m-%d %H:%M:%S"));
                println!("You: {}", entry.input);
                println!("Bot: {}", entry.response);
            }
            Ok(())
        }
        OutputFormat::Json => output_json(history, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &IntentBotArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    match &value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => println!("{}", format_value(&value)),
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &IntentBotArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{f:.4}"),
            _ => n.to_string(),
        },
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(
            format_value(&serde_json::Value::String("greeting".to_string())),
            "greeting"
        );
        assert_eq!(
            format_value(&serde_json::Value::Number(serde_json::Number::from(42))),
            "42"
        );
        assert_eq!(format_value(&serde_json::json!(0.5)), "0.5000");
        assert_eq!(format_value(&serde_json::json!(["a", "b"])), "[a, b]");
        assert_eq!(format_value(&serde_json::Value::Null), "null");
    }

    #[test]
    fn test_stats_serialize() {
        let stats = EngineStats {
            intents: 2,
            patterns: 4,
            vocabulary_size: 4,
            classifier: "logistic_regression_multinomial".to_string(),
            training_accuracy: 1.0,
            training_ms: 3,
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["intents"], 2);
        assert_eq!(value["classifier"], "logistic_regression_multinomial");
    }
}
