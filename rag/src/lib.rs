mod build_prompt;
mod chunk_text;
mod config;
mod embed_chunks;
mod embed_query;
mod error;
mod generate;
mod http;
mod retrieve_chunks;
mod run;
mod scan_files;
mod vector_index;

pub use build_prompt::{
    format_context_from_hits, render, Message, MessageTemplate, Prompt, PromptTemplate,
    TemplateRegistry, INSUFFICIENT_INFO, V1_NAME, V2_NAME,
};
pub use chunk_text::{chunk_pages, chunk_text, Chunk};
pub use config::{Config, DEFAULT_CHAT_MODEL};
pub use embed_chunks::{Embedder, OllamaEmbedder};
pub use embed_query::embed_query;
pub use error::{RagError, Result};
pub use generate::{generate, ChatModel, GroqChat};
pub use retrieve_chunks::{Retriever, DEFAULT_TOP_K};
pub use run::{answer_question, run, write_report, Answer, QuestionReport, RunPlan, TEST_QUESTIONS};
pub use scan_files::{load_pdf_pages, Page};
pub use vector_index::{Hit, IndexEntry, InMemoryIndex};

use tracing::info;

/// Loads every PDF under the configured directory and builds the index.
pub fn index_corpus(cfg: &Config, embedder: &dyn Embedder) -> Result<InMemoryIndex> {
    let pages = load_pdf_pages(&cfg.source_dir, &cfg.include_exts)?;
    index_pages(cfg, &pages, embedder)
}

/// Chunks and embeds `pages`, then bulk-loads them into a fresh index.
/// Any embedding failure aborts before the index is populated.
pub fn index_pages(cfg: &Config, pages: &[Page], embedder: &dyn Embedder) -> Result<InMemoryIndex> {
    let chunks = chunk_pages(pages, cfg.chunk_size, cfg.chunk_overlap);
    info!(pages = pages.len(), chunks = chunks.len(), "pages chunked");

    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
    let vectors = embedder.embed(&texts)?;
    if vectors.len() != chunks.len() {
        return Err(RagError::EmbeddingUnavailable {
            url: cfg.ollama_url.clone(),
            message: format!("expected {} embeddings, got {}", chunks.len(), vectors.len()),
        });
    }

    let entries = chunks
        .into_iter()
        .zip(vectors)
        .map(|(chunk, vector)| IndexEntry { vector, chunk })
        .collect();
    let mut index = InMemoryIndex::new();
    index.insert(entries)?;
    Ok(index)
}
