use tracing::debug;

use studyhall_core::error::{Error, Result};
use studyhall_core::traits::Answerer;
use studyhall_core::types::{AnswerResult, Source};

use crate::index::LexicalIndex;

/// Score multiplier for entries whose subject matches the requested one.
pub const SUBJECT_BOOST: f32 = 1.08;
/// Raw scores at or below this map to zero confidence.
pub const CONFIDENCE_FLOOR: f32 = 0.1;
/// Width of the raw score band mapped onto `[0, 1]` confidence.
pub const CONFIDENCE_SPAN: f32 = 0.6;
/// Smallest result window, whatever `top_k` asks for.
pub const MIN_SOURCES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedEntry {
	pub position: usize,
	pub score: f32,
}

/// Linear recalibration of a raw score onto `[0, 1]`.
pub fn calibrate_confidence(score: f32) -> f32 {
	((score - CONFIDENCE_FLOOR) / CONFIDENCE_SPAN).clamp(0.0, 1.0)
}

impl LexicalIndex {
	/// Score every entry against `question`, boost same-subject entries and
	/// sort best first. Ties keep corpus order.
	pub fn rank(&self, question: &str, subject: &str) -> Vec<RankedEntry> {
		let query = self.vectorize(question);
		let mut ranked: Vec<RankedEntry> = self
			.documents()
			.iter()
			.zip(self.corpus().iter())
			.enumerate()
			.map(|(position, (doc, entry))| {
				let mut score = query.cosine(doc);
				if entry.subject_matches(subject) { score *= SUBJECT_BOOST; }
				RankedEntry { position, score }
			})
			.collect();
		// sort_by is stable
		ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
		ranked
	}
}

impl Answerer for LexicalIndex {
	fn size(&self) -> usize { self.len() }

	fn answer(&self, question: &str, subject: &str, top_k: usize) -> Result<AnswerResult> {
		if question.trim().is_empty() { return Err(Error::EmptyQuestion); }
		let mut ranked = self.rank(question, subject);
		ranked.truncate(top_k.max(MIN_SOURCES));

		let mut sources = Vec::with_capacity(ranked.len());
		for r in &ranked {
			let entry = &self.corpus().entries()[r.position];
			sources.push(Source {
				question: entry.question().to_string(),
				subject: entry.subject().to_string(),
				score: r.score,
			});
		}
		// build() rejects empty corpora, so there is always a best entry
		let best = &self.corpus().entries()[ranked[0].position];
		let best_score = sources[0].score;
		let confidence = calibrate_confidence(best_score);
		debug!(
			"Ranked {} entries for subject '{}': best score {:.4}, confidence {:.3}",
			self.len(),
			subject,
			best_score,
			confidence
		);

		Ok(AnswerResult {
			answer: best.answer().to_string(),
			subject: best.subject().to_string(),
			confidence,
			sources,
		})
	}
}
