use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{RagError, Result};
use crate::http::{build_client, post_json};

/// Maps text to fixed-length vectors. The same text always yields the same
/// vector.
pub trait Embedder {
    /// Embeds `texts`, returning one vector per input in input order.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Serialize)]
struct EmbedLegacyRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Embedding client for a local Ollama server.
#[derive(Clone, Debug)]
pub struct OllamaEmbedder {
    client: Client,
    base_url: String,
    model: String,
    batch_size: usize,
}

impl OllamaEmbedder {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = build_client(cfg.http_timeout_secs).map_err(|message| {
            RagError::EmbeddingUnavailable {
                url: cfg.ollama_url.clone(),
                message,
            }
        })?;
        Ok(Self {
            client,
            base_url: cfg.ollama_url.clone(),
            model: cfg.embed_model.clone(),
            batch_size: cfg.embed_batch_size.max(1),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn embed_batch(&self, texts: &[String]) -> std::result::Result<Vec<Vec<f32>>, String> {
        let url = format!("{}/api/embed", self.base_url);
        let req = EmbedRequest {
            model: &self.model,
            input: texts,
        };
        match post_json::<Value, _>(&self.client, &url, None, &req) {
            Ok(res) => parse_embeddings(res),
            Err(err) => {
                warn!(error = %err, "batch embed failed, retrying with /api/embeddings");
                self.embed_legacy(texts)
            }
        }
    }

    // Older Ollama releases only expose the single-prompt endpoint.
    fn embed_legacy(&self, texts: &[String]) -> std::result::Result<Vec<Vec<f32>>, String> {
        let url = format!("{}/api/embeddings", self.base_url);
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            let req = EmbedLegacyRequest {
                model: &self.model,
                prompt: text,
            };
            let res = post_json::<Value, _>(&self.client, &url, None, &req)?;
            let mut vecs = parse_embeddings(res)?;
            if vecs.len() != 1 {
                return Err(format!("expected 1 embedding, got {}", vecs.len()));
            }
            out.append(&mut vecs);
        }
        Ok(out)
    }
}

impl Embedder for OllamaEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        let mut out = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size) {
            debug!(model = %self.model, size = batch.len(), "embedding batch");
            let vecs = self
                .embed_batch(batch)
                .map_err(|message| RagError::EmbeddingUnavailable {
                    url: self.base_url.clone(),
                    message,
                })?;
            if vecs.len() != batch.len() {
                return Err(RagError::EmbeddingUnavailable {
                    url: self.base_url.clone(),
                    message: format!("sent {} texts, got {} embeddings", batch.len(), vecs.len()),
                });
            }
            out.extend(vecs);
        }
        Ok(out)
    }
}

fn parse_embeddings(value: Value) -> std::result::Result<Vec<Vec<f32>>, String> {
    if let Some(embeddings) = value.get("embeddings") {
        return parse_embeddings_value(embeddings);
    }
    if let Some(embedding) = value.get("embedding") {
        return parse_embeddings_value(embedding);
    }
    Err("No embeddings in response".to_string())
}

fn parse_embeddings_value(value: &Value) -> std::result::Result<Vec<Vec<f32>>, String> {
    let arr = value.as_array().ok_or("Invalid embeddings format")?;
    match arr.first() {
        None => Ok(vec![]),
        Some(first) if first.is_array() => arr.iter().map(parse_vec).collect(),
        Some(_) => Ok(vec![parse_vec(value)?]),
    }
}

fn parse_vec(value: &Value) -> std::result::Result<Vec<f32>, String> {
    let arr = value.as_array().ok_or("Embedding is not an array")?;
    let mut out = Vec::with_capacity(arr.len());
    for v in arr {
        let n = v.as_f64().ok_or("Embedding value is not a number")?;
        out.push(n as f32);
    }
    Ok(out)
}
