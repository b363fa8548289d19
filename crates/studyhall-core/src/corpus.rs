use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::{Corpus, CorpusEntry, DEFAULT_SUBJECT};

/// Record shape as found in the store. Every field is optional so that one
/// bad record never rejects the whole file.
#[derive(Debug, Default, Deserialize)]
struct RawRecord {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    subject: Option<String>,
}

impl RawRecord {
    fn into_entry(self) -> Option<CorpusEntry> {
        CorpusEntry::new(
            self.question.as_deref().unwrap_or_default(),
            self.answer.as_deref().unwrap_or_default(),
            self.subject.as_deref().unwrap_or(DEFAULT_SUBJECT),
        )
    }
}

/// Reads a JSON question/answer store into a validated [`Corpus`].
#[derive(Debug, Default)]
pub struct CorpusLoader;

impl CorpusLoader {
    pub fn new() -> Self { Self }

    /// Load the store at `path`, seeding it with [`default_entries`] first
    /// when it does not exist.
    pub fn load(&self, path: &Path) -> Result<Corpus> {
        if !path.exists() {
            info!("Corpus store {} not found, seeding defaults", path.display());
            write_entries(path, &default_entries())?;
        }
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let corpus = self.parse(&content)?;
        info!("Loaded {} corpus entries from {}", corpus.len(), path.display());
        Ok(corpus)
    }

    /// Decode store content. Only a top level that is not a JSON array is an
    /// error; records that cannot be used are skipped.
    pub fn parse(&self, content: &str) -> Result<Corpus> {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| Error::CorpusFormat(e.to_string()))?;
        let items = match value {
            serde_json::Value::Array(items) => items,
            other => return Err(Error::CorpusFormat(format!("expected a JSON array, found {}", json_kind(&other)))),
        };
        let total = items.len();
        let corpus: Corpus = items
            .into_iter()
            .enumerate()
            .filter_map(|(position, item)| {
                let entry = serde_json::from_value::<RawRecord>(item).ok().and_then(RawRecord::into_entry);
                if entry.is_none() { debug!("Dropping unusable corpus record at position {}", position); }
                entry
            })
            .collect();
        if corpus.len() < total {
            info!("Dropped {} of {} corpus records", total - corpus.len(), total);
        }
        Ok(corpus)
    }
}

/// Load a corpus with the default loader.
pub fn load(path: &Path) -> Result<Corpus> { CorpusLoader::new().load(path) }

/// Write the default seed to `path`. An existing file is left alone unless
/// `overwrite` is set; returns whether anything was written.
pub fn seed(path: &Path, overwrite: bool) -> Result<bool> {
    if path.exists() && !overwrite {
        return Ok(false);
    }
    write_entries(path, &default_entries())?;
    Ok(true)
}

fn write_entries(path: &Path, entries: &[CorpusEntry]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let body = serde_json::to_string_pretty(entries).map_err(|e| Error::CorpusFormat(e.to_string()))?;
    fs::write(path, body).map_err(|e| Error::io(path, e))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// The seed written to a missing store.
pub fn default_entries() -> Vec<CorpusEntry> {
    let seed = [
        (
            "Computer Science",
            "Explain binary search",
            "Binary search finds a target in a sorted array by repeatedly halving the search space: compare middle, discard the half that cannot contain the target, and repeat. Time complexity is O(log n).",
        ),
        (
            "Computer Science",
            "What is time complexity?",
            "Time complexity estimates how an algorithm's running time grows with input size. Common classes include O(1), O(log n), O(n), O(n log n), and O(n^2).",
        ),
        (
            "Mathematics",
            "State the Pythagorean theorem",
            "In a right triangle with legs a and b and hypotenuse c, a^2 + b^2 = c^2.",
        ),
        (
            "Physics",
            "What is Newton's second law?",
            "Force equals mass times acceleration (F = m a). It describes how the velocity of an object changes when acted upon by a net force.",
        ),
        (
            "English",
            "What is a thesis statement?",
            "A thesis statement is a concise claim that expresses the main point of an essay, guiding the argument and informing readers what to expect.",
        ),
    ];
    seed.iter()
        .filter_map(|(subject, question, answer)| CorpusEntry::new(question, answer, subject))
        .collect()
}
