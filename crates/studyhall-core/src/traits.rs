use crate::error::Result;
use crate::types::AnswerResult;

/// The surface a request handler needs from a question-answering engine.
pub trait Answerer: Send + Sync {
    /// Number of corpus entries currently served.
    fn size(&self) -> usize;

    /// Rank the corpus against `question` and pick a best answer.
    ///
    /// Fails with [`crate::error::Error::EmptyQuestion`] when `question` is
    /// blank after trimming.
    fn answer(&self, question: &str, subject: &str, top_k: usize) -> Result<AnswerResult>;
}
