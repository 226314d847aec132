use crate::embed_chunks::Embedder;
use crate::error::{RagError, Result};

pub fn embed_query<E: Embedder + ?Sized>(embedder: &E, text: &str) -> Result<Vec<f32>> {
    let vec = embedder
        .embed(&[text.to_string()])?
        .into_iter()
        .next()
        .unwrap_or_default();
    if vec.is_empty() {
        return Err(RagError::IndexQuery(format!(
            "embedder returned an empty vector for query {:?}",
            text
        )));
    }
    Ok(vec)
}
