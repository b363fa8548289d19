//! studyhall-text
//!
//! Lexical question matching: text normalization and tokenization on top of
//! tantivy's analyzer pipeline, a TF-IDF index over unigrams and bigrams, and
//! cosine ranking with subject affinity. See `index` and `search`.

pub mod analyzer;
pub mod index;
pub mod search;
pub mod stopwords;

pub use analyzer::{normalize, TermAnalyzer};
pub use index::{LexicalIndex, SparseVector, Vocabulary};
pub use search::{calibrate_confidence, RankedEntry, CONFIDENCE_FLOOR, CONFIDENCE_SPAN, MIN_SOURCES, SUBJECT_BOOST};
