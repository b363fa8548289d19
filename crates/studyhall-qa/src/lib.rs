//! Question-answering engine facade: loads the corpus store, builds the
//! lexical index and serves queries from an immutable snapshot that can be
//! swapped wholesale on reload.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

use studyhall_core::corpus::CorpusLoader;
use studyhall_core::error::Result;
use studyhall_core::traits::Answerer;
use studyhall_core::types::AnswerResult;
use studyhall_text::LexicalIndex;

pub struct QaEngine {
    dataset_path: PathBuf,
    current: RwLock<Arc<LexicalIndex>>,
}

impl QaEngine {
    /// Load the store at `dataset_path` (seeding it if absent) and build the index.
    pub fn open(dataset_path: impl Into<PathBuf>) -> Result<Self> {
        let dataset_path = dataset_path.into();
        let index = build_from(&dataset_path)?;
        Ok(Self { dataset_path, current: RwLock::new(Arc::new(index)) })
    }

    pub fn dataset_path(&self) -> &Path { &self.dataset_path }

    /// The index currently serving queries. Callers keep a consistent view
    /// for as long as they hold the returned `Arc`, even across a reload.
    pub fn snapshot(&self) -> Arc<LexicalIndex> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Rebuild from the store and publish the new index in one step. On
    /// failure the previous index keeps serving. Returns the new entry count.
    pub fn reload(&self) -> Result<usize> {
        let index = Arc::new(build_from(&self.dataset_path)?);
        let size = index.len();
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = index;
        info!("Reloaded corpus from {}: {} entries", self.dataset_path.display(), size);
        Ok(size)
    }
}

impl Answerer for QaEngine {
    fn size(&self) -> usize { self.snapshot().len() }

    fn answer(&self, question: &str, subject: &str, top_k: usize) -> Result<AnswerResult> {
        self.snapshot().answer(question, subject, top_k)
    }
}

fn build_from(path: &Path) -> Result<LexicalIndex> {
    let corpus = CorpusLoader::new().load(path)?;
    LexicalIndex::build(corpus)
}
