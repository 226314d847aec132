use tracing::debug;

use crate::embed_chunks::Embedder;
use crate::embed_query::embed_query;
use crate::error::Result;
use crate::vector_index::{Hit, InMemoryIndex};

pub const DEFAULT_TOP_K: usize = 3;

/// Embeds a question and looks up its nearest chunks in a built index.
pub struct Retriever<'a> {
    embedder: &'a dyn Embedder,
    index: &'a InMemoryIndex,
    top_k: usize,
}

impl<'a> Retriever<'a> {
    pub fn new(embedder: &'a dyn Embedder, index: &'a InMemoryIndex, top_k: usize) -> Self {
        Self {
            embedder,
            index,
            top_k,
        }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Returns `min(top_k, index size)` hits, most similar first.
    pub fn retrieve(&self, question: &str) -> Result<Vec<Hit>> {
        let query_vec = embed_query(self.embedder, question)?;
        let hits = self.index.query(&query_vec, self.top_k)?;
        debug!(hits = hits.len(), "retrieved context");
        Ok(hits)
    }
}
