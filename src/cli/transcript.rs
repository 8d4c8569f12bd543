//! Append-only conversation history stored as JSON lines.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{IntentError, Result};

/// One chat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub input: String,
    pub response: String,
    pub timestamp: DateTime<Local>,
}

impl TranscriptEntry {
    /// Record a turn stamped with the current local time.
    pub fn new<I: Into<String>, R: Into<String>>(input: I, response: R) -> Self {
        TranscriptEntry {
            input: input.into(),
            response: response.into(),
            timestamp: Local::now(),
        }
    }
}

/// A transcript file. Entries are appended one JSON object per line.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    path: PathBuf,
}

impl TranscriptStore {
    /// Point a store at `path`. The file is created on the first append.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        TranscriptStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry.
    pub fn append(&self, entry: &TranscriptEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Read every entry in file order. A missing file is an empty history.
    pub fn entries(&self) -> Result<Vec<TranscriptEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut entries = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|source| IntentError::Transcript {
                line: index + 1,
                source,
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    /// The most recent `limit` entries, oldest first.
    pub fn tail(&self, limit: usize) -> Result<Vec<TranscriptEntry>> {
        let mut entries = self.entries()?;
        let skip = entries.len().saturating_sub(limit);
        Ok(entries.split_off(skip))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_append_and_read_back() {
        let dir = TempDir::new().unwrap();
        let store = TranscriptStore::open(dir.path().join("chat_log.jsonl"));

        store.append(&TranscriptEntry::new("hi", "Hello!")).unwrap();
        store.append(&TranscriptEntry::new("bye", "Goodbye!")).unwrap();

        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].input, "hi");
        assert_eq!(entries[0].response, "Hello!");
        assert_eq!(entries[1].input, "bye");
        assert!(entries[0].timestamp <= entries[1].timestamp);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = TranscriptStore::open(dir.path().join("absent.jsonl"));
        assert!(store.entries().unwrap().is_empty());
    }

    #[test]
    fn test_tail() {
        let dir = TempDir::new().unwrap();
        let store = TranscriptStore::open(dir.path().join("chat_log.jsonl"));
        for i in 0..5 {
            store
                .append(&TranscriptEntry::new(format!("q{i}"), format!("a{i}")))
                .unwrap();
        }

        let tail = store.tail(2).unwrap();
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].input, "q3");
        assert_eq!(tail[1].input, "q4");
        assert_eq!(store.tail(10).unwrap().len(), 5);
    }

    #[test]
    fn test_corrupt_line_reports_line_number() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chat_log.jsonl");
        let store = TranscriptStore::open(&path);
        store.append(&TranscriptEntry::new("hi", "Hello!")).unwrap();

        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "not json").unwrap();

        match store.entries() {
            Err(IntentError::Transcript { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected transcript error, got {other:?}"),
        }
    }
}
