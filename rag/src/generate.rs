use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::build_prompt::{Message, Prompt};
use crate::config::Config;
use crate::error::{RagError, Result};
use crate::http::{build_client, post_json};

/// A chat model that turns a message list into one reply.
pub trait ChatModel {
    fn model(&self) -> &str;

    fn complete(&self, messages: &[Message]) -> Result<String>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Client for Groq's OpenAI-compatible chat completions endpoint.
#[derive(Clone, Debug)]
pub struct GroqChat {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl GroqChat {
    pub fn new(cfg: &Config) -> Result<Self> {
        let api_key = cfg
            .groq_api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| RagError::Config("GROQ_API_KEY is not set".to_string()))?;
        let client = build_client(cfg.http_timeout_secs).map_err(|message| {
            RagError::Generation {
                model: cfg.chat_model.clone(),
                message,
            }
        })?;
        Ok(Self {
            client,
            base_url: cfg.groq_url.clone(),
            api_key,
            model: cfg.chat_model.clone(),
            temperature: cfg.temperature,
        })
    }
}

impl ChatModel for GroqChat {
    fn model(&self) -> &str {
        &self.model
    }

    fn complete(&self, messages: &[Message]) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let req = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            stream: false,
        };
        let failed = |message: String| RagError::Generation {
            model: self.model.clone(),
            message,
        };
        let res = post_json::<ChatResponse, _>(&self.client, &url, Some(&self.api_key), &req)
            .map_err(failed)?;
        res.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or_else(|| failed("response has no message content".to_string()))
    }
}

pub fn generate<C: ChatModel + ?Sized>(chat: &C, prompt: &Prompt) -> Result<String> {
    debug!(model = chat.model(), messages = prompt.messages.len(), "generating answer");
    chat.complete(&prompt.messages)
}
