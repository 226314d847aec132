use std::env;

use crate::error::{RagError, Result};

pub const DEFAULT_CHAT_MODEL: &str = "meta-llama/llama-4-maverick-17b-128e-instruct";

#[derive(Clone, Debug)]
pub struct Config {
    pub source_dir: String,
    pub include_exts: Vec<String>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub ollama_url: String,
    pub embed_model: String,
    pub embed_batch_size: usize,
    pub groq_url: String,
    pub groq_api_key: Option<String>,
    pub chat_model: String,
    pub temperature: f32,
    pub top_k: usize,
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: "docs/".to_string(),
            include_exts: vec![".pdf".to_string()],
            chunk_size: 600,
            chunk_overlap: 100,
            ollama_url: "http://localhost:11434".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            embed_batch_size: 32,
            groq_url: "https://api.groq.com/openai/v1".to_string(),
            groq_api_key: None,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            temperature: 0.0,
            top_k: 3,
            http_timeout_secs: 120,
        }
    }
}

impl Config {
    /// Defaults, plus the Groq credential and the two backend locations from
    /// `.env` / the environment. Blank values are treated as unset. Pipeline
    /// parameters (chunking, k, models, file filter) are not configurable.
    pub fn from_env() -> Self {
        // Load .env if present so the Groq key works without manual `source .env`.
        let _ = dotenvy::dotenv();
        let defaults = Self::default();
        Self {
            ollama_url: non_blank("OLLAMA_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.ollama_url),
            groq_url: non_blank("GROQ_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.groq_url),
            groq_api_key: non_blank("GROQ_API_KEY"),
            ..defaults
        }
    }

    /// Rejects settings the chunker and retriever cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(RagError::Config("chunk size must be greater than zero".to_string()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(RagError::Config(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.top_k == 0 {
            return Err(RagError::Config("top_k must be greater than zero".to_string()));
        }
        if self.embed_batch_size == 0 {
            return Err(RagError::Config(
                "embedding batch size must be greater than zero".to_string(),
            ));
        }
        if self.include_exts.is_empty() {
            return Err(RagError::Config("no file extensions to include".to_string()));
        }
        Ok(())
    }
}

fn non_blank(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
