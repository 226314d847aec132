use std::cmp::Ordering;

use tracing::info;

use crate::chunk_text::Chunk;
use crate::error::{RagError, Result};

#[derive(Clone, Debug)]
pub struct IndexEntry {
    pub vector: Vec<f32>,
    pub chunk: Chunk,
}

/// A chunk returned by a similarity query, with its cosine score.
#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    pub chunk: Chunk,
    pub score: f32,
}

/// Append-once, in-memory cosine similarity index.
#[derive(Debug, Default)]
pub struct InMemoryIndex {
    entries: Vec<IndexEntry>,
    dimension: Option<usize>,
    loaded: bool,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Bulk-loads the index. May only be called once; every vector must be
    /// non-empty, finite and of the same length.
    pub fn insert(&mut self, entries: Vec<IndexEntry>) -> Result<()> {
        if self.loaded {
            return Err(RagError::IndexQuery("index has already been built".to_string()));
        }
        let mut dimension = None;
        for (pos, entry) in entries.iter().enumerate() {
            check_vector(&entry.vector)
                .map_err(|msg| RagError::IndexQuery(format!("entry {}: {}", pos, msg)))?;
            match dimension {
                None => dimension = Some(entry.vector.len()),
                Some(dim) if dim != entry.vector.len() => {
                    return Err(RagError::IndexQuery(format!(
                        "entry {} has dimension {}, expected {}",
                        pos,
                        entry.vector.len(),
                        dim
                    )));
                }
                Some(_) => {}
            }
        }
        self.entries = entries;
        self.dimension = dimension;
        self.loaded = true;
        info!(entries = self.entries.len(), dimension = ?self.dimension, "index built");
        Ok(())
    }

    /// Returns the `k` entries closest to `vector`, best first. Equal scores
    /// keep insertion order. Fewer than `k` entries returns all of them.
    pub fn query(&self, vector: &[f32], k: usize) -> Result<Vec<Hit>> {
        check_vector(vector).map_err(|msg| RagError::IndexQuery(format!("query: {}", msg)))?;
        if let Some(dim) = self.dimension {
            if dim != vector.len() {
                return Err(RagError::IndexQuery(format!(
                    "query has dimension {}, index has {}",
                    vector.len(),
                    dim
                )));
            }
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(pos, entry)| (pos, cosine_similarity(&entry.vector, vector)))
            .collect();
        // Stable sort: ties (including 0.0 vs -0.0) stay in insertion order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(pos, score)| Hit {
                chunk: self.entries[pos].chunk.clone(),
                score,
            })
            .collect())
    }
}

fn check_vector(vector: &[f32]) -> std::result::Result<(), String> {
    if vector.is_empty() {
        return Err("empty vector".to_string());
    }
    if vector.iter().any(|v| !v.is_finite()) {
        return Err("vector has non-finite components".to_string());
    }
    Ok(())
}

/// Cosine similarity; 0.0 when either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
