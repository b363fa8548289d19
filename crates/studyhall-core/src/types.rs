//! Domain types shared by the loader, the lexical index and the HTTP layer.

use serde::{Deserialize, Serialize};

/// Subject assigned to records that do not name one, and the default
/// subject preference of a query.
pub const DEFAULT_SUBJECT: &str = "General";

/// One curated question/answer pair.
///
/// Constructed only through [`CorpusEntry::new`], which guarantees that
/// `question` and `answer` are trimmed and non-empty and that `subject`
/// is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusEntry {
    question: String,
    answer: String,
    subject: String,
}

impl CorpusEntry {
    /// Validate and normalize a raw record. Returns `None` when the trimmed
    /// question or answer is empty.
    pub fn new(question: &str, answer: &str, subject: &str) -> Option<Self> {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() || answer.is_empty() {
            return None;
        }
        let subject = match subject.trim() {
            "" => DEFAULT_SUBJECT,
            s => s,
        };
        Some(Self { question: question.to_string(), answer: answer.to_string(), subject: subject.to_string() })
    }

    pub fn question(&self) -> &str { &self.question }

    pub fn answer(&self) -> &str { &self.answer }

    pub fn subject(&self) -> &str { &self.subject }

    /// Case-insensitive subject comparison.
    pub fn subject_matches(&self, subject: &str) -> bool {
        self.subject.to_lowercase() == subject.to_lowercase()
    }
}

/// Ordered, index-addressable collection of entries. The position of an
/// entry is its identifier for the lifetime of one built index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    pub fn new(entries: Vec<CorpusEntry>) -> Self { Self { entries } }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self, position: usize) -> Option<&CorpusEntry> { self.entries.get(position) }

    pub fn entries(&self) -> &[CorpusEntry] { &self.entries }

    pub fn iter(&self) -> std::slice::Iter<'_, CorpusEntry> { self.entries.iter() }
}

impl FromIterator<CorpusEntry> for Corpus {
    fn from_iter<I: IntoIterator<Item = CorpusEntry>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a CorpusEntry;
    type IntoIter = std::slice::Iter<'a, CorpusEntry>;

    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}

/// Supporting evidence for an answer: a ranked corpus entry and its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub question: String,
    pub subject: String,
    pub score: f32,
}

/// Result of one query.
///
/// `confidence` is always within `[0, 1]`; `sources` is ordered best first
/// and never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub answer: String,
    pub subject: String,
    pub confidence: f32,
    pub sources: Vec<Source>,
}
