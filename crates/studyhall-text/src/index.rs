use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::info;

use studyhall_core::error::{Error, Result};
use studyhall_core::types::{Corpus, CorpusEntry};

use crate::analyzer::TermAnalyzer;

/// Term to dense position. Positions are contiguous `[0, len)` and assigned
/// in lexicographic term order.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
	positions: HashMap<String, usize>,
}

impl Vocabulary {
	fn from_terms(terms: BTreeSet<String>) -> Self {
		Self { positions: terms.into_iter().enumerate().map(|(pos, term)| (term, pos)).collect() }
	}

	pub fn len(&self) -> usize { self.positions.len() }

	pub fn is_empty(&self) -> bool { self.positions.is_empty() }

	pub fn position(&self, term: &str) -> Option<usize> { self.positions.get(term).copied() }
}

/// Sparse weight vector over a vocabulary of `dim` terms. Entries are sorted
/// by position with no duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
	dim: usize,
	entries: Vec<(usize, f32)>,
}

impl SparseVector {
	/// Weight term counts by `idf` and scale to unit length. An all-zero
	/// vector stays zero.
	fn weighted(counts: BTreeMap<usize, u32>, idf: &[f32]) -> Self {
		let entries = counts.into_iter().map(|(pos, tf)| (pos, tf as f32 * idf[pos])).collect();
		let mut v = Self { dim: idf.len(), entries };
		v.normalize();
		v
	}

	fn normalize(&mut self) {
		let norm = self.norm();
		if norm > 0.0 {
			for (_, w) in &mut self.entries { *w /= norm; }
		}
	}

	pub fn dim(&self) -> usize { self.dim }

	pub fn entries(&self) -> &[(usize, f32)] { &self.entries }

	pub fn norm(&self) -> f32 { self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt() }

	pub fn dot(&self, other: &SparseVector) -> f32 {
		let (mut i, mut j, mut sum) = (0, 0, 0.0f32);
		while i < self.entries.len() && j < other.entries.len() {
			let (pa, wa) = self.entries[i];
			let (pb, wb) = other.entries[j];
			match pa.cmp(&pb) {
				std::cmp::Ordering::Less => i += 1,
				std::cmp::Ordering::Greater => j += 1,
				std::cmp::Ordering::Equal => { sum += wa * wb; i += 1; j += 1; }
			}
		}
		sum
	}

	/// Cosine similarity; 0 when either side is a zero vector.
	pub fn cosine(&self, other: &SparseVector) -> f32 {
		let denom = self.norm() * other.norm();
		if denom > 0.0 { self.dot(other) / denom } else { 0.0 }
	}
}

/// Immutable TF-IDF index over a corpus. Built once; safe to share across
/// threads for concurrent queries.
pub struct LexicalIndex {
	corpus: Corpus,
	analyzer: TermAnalyzer,
	vocabulary: Vocabulary,
	idf: Vec<f32>,
	documents: Vec<SparseVector>,
}

impl LexicalIndex {
	/// Build the index. Fails with [`Error::EmptyCorpus`] when there is
	/// nothing to match against.
	pub fn build(corpus: Corpus) -> Result<Self> {
		if corpus.is_empty() { return Err(Error::EmptyCorpus); }
		let analyzer = TermAnalyzer::new();
		let doc_terms: Vec<Vec<String>> = corpus.iter().map(|e| analyzer.terms(&document_text(e))).collect();

		let vocabulary = Vocabulary::from_terms(doc_terms.iter().flatten().cloned().collect());
		let mut df = vec![0u32; vocabulary.len()];
		let doc_counts: Vec<BTreeMap<usize, u32>> = doc_terms.iter().map(|terms| count_terms(&vocabulary, terms)).collect();
		for counts in &doc_counts {
			for pos in counts.keys() { df[*pos] += 1; }
		}
		let n = corpus.len() as f32;
		// smoothed idf; a term in every document still weighs 1
		let idf: Vec<f32> = df.iter().map(|&d| ((1.0 + n) / (1.0 + d as f32)).ln() + 1.0).collect();
		let documents = doc_counts.into_iter().map(|counts| SparseVector::weighted(counts, &idf)).collect();

		info!("Built lexical index: {} entries, {} terms", corpus.len(), vocabulary.len());
		Ok(Self { corpus, analyzer, vocabulary, idf, documents })
	}

	/// Project free text into the index space using the index's idf weights.
	/// Out-of-vocabulary terms are ignored.
	pub fn vectorize(&self, text: &str) -> SparseVector {
		let terms = self.analyzer.terms(text);
		SparseVector::weighted(count_terms(&self.vocabulary, &terms), &self.idf)
	}

	pub fn corpus(&self) -> &Corpus { &self.corpus }

	pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }

	pub fn idf(&self, term: &str) -> Option<f32> { self.vocabulary.position(term).map(|p| self.idf[p]) }

	pub fn document(&self, position: usize) -> Option<&SparseVector> { self.documents.get(position) }

	pub fn len(&self) -> usize { self.corpus.len() }

	pub fn is_empty(&self) -> bool { self.corpus.is_empty() }

	pub(crate) fn documents(&self) -> &[SparseVector] { &self.documents }
}

fn document_text(entry: &CorpusEntry) -> String { format!("{}\n{}", entry.question(), entry.answer()) }

fn count_terms(vocabulary: &Vocabulary, terms: &[String]) -> BTreeMap<usize, u32> {
	let mut counts = BTreeMap::new();
	for pos in terms.iter().filter_map(|t| vocabulary.position(t)) { *counts.entry(pos).or_insert(0) += 1; }
	counts
}
