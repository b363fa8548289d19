use tantivy::tokenizer::{SimpleTokenizer, StopWordFilter, TextAnalyzer, TokenStream};

use crate::stopwords;

/// Tokens shorter than this many characters are dropped.
const MIN_TOKEN_CHARS: usize = 2;

/// Lowercase and collapse every whitespace run to a single space.
///
/// Both stored entries and incoming queries go through this one function, so
/// index-time and query-time text always agree. Idempotent.
pub fn normalize(text: &str) -> String {
	text.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn build_analyzer() -> TextAnalyzer {
	TextAnalyzer::builder(SimpleTokenizer::default())
		.filter(StopWordFilter::remove(stopwords::ENGLISH.iter().map(|s| s.to_string())))
		.build()
}

/// Turns text into the unigram and bigram terms the index is built from.
#[derive(Clone)]
pub struct TermAnalyzer {
	analyzer: TextAnalyzer,
}

impl Default for TermAnalyzer {
	fn default() -> Self { Self { analyzer: build_analyzer() } }
}

impl TermAnalyzer {
	pub fn new() -> Self { Self::default() }

	/// Content tokens of `text` after normalization, in order, stopwords removed.
	pub fn tokens(&self, text: &str) -> Vec<String> {
		let normalized = normalize(text);
		// token_stream needs &mut; clone so shared readers never contend
		let mut analyzer = self.analyzer.clone();
		let mut stream = analyzer.token_stream(&normalized);
		let mut tokens = Vec::new();
		while stream.advance() {
			let token = &stream.token().text;
			if token.chars().count() >= MIN_TOKEN_CHARS { tokens.push(token.clone()); }
		}
		tokens
	}

	/// Unigrams followed by bigrams of adjacent content tokens ("binary search").
	pub fn terms(&self, text: &str) -> Vec<String> {
		let tokens = self.tokens(text);
		let bigrams = tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1]));
		let mut terms = tokens.clone();
		terms.extend(bigrams);
		terms
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalize_lowercases_and_collapses_whitespace() {
		assert_eq!(normalize("  Explain\tBinary \n\n SEARCH  "), "explain binary search");
		assert_eq!(normalize(""), "");
		assert_eq!(normalize(" \t\n "), "");
	}

	#[test]
	fn tokens_drop_stopwords_and_single_characters() {
		let analyzer = TermAnalyzer::new();
		assert_eq!(analyzer.tokens("What is the time complexity of O(n log n)?"), vec!["time", "complexity", "log"]);
	}

	#[test]
	fn bigrams_skip_over_removed_stopwords() {
		let analyzer = TermAnalyzer::new();
		let terms = analyzer.terms("State the Pythagorean theorem");
		assert_eq!(terms, vec!["state", "pythagorean", "theorem", "state pythagorean", "pythagorean theorem"]);
	}

	#[test]
	fn stopword_only_text_has_no_terms() {
		assert!(TermAnalyzer::new().terms("what is it and why").is_empty());
	}

	#[test]
	fn punctuation_splits_tokens() {
		assert_eq!(TermAnalyzer::new().tokens("Newton's second-law"), vec!["newton", "second", "law"]);
	}
}
