use serde::Serialize;

use crate::vector_index::Hit;

/// Phrase the strict template tells the model to answer with when the
/// context does not cover the question.
pub const INSUFFICIENT_INFO: &str = "I do not have sufficient information.";

pub const V1_NAME: &str = "PROMPT V1";
pub const V2_NAME: &str = "PROMPT V2";

const V1_USER: &str = "Answer based on context: {context}\nQuestion: {input}";

const V2_SYSTEM: &str = "You are a professional Policy Assistant. Use ONLY the provided context to answer. \
If the answer is not in the context, say 'I do not have sufficient information.' \
Format your answer using bullet points for clarity. Include section names if available.\
\nContext: {context}";

const V2_USER: &str = "{input}";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// A rendered prompt, ready to send to a chat model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub messages: Vec<Message>,
}

impl Prompt {
    /// All message contents as one string, in message order.
    pub fn text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageTemplate {
    pub role: String,
    pub pattern: String,
}

/// A named list of message patterns. Patterns may use `{context}` and
/// `{input}` (or its alias `{question}`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: String,
    pub messages: Vec<MessageTemplate>,
}

impl PromptTemplate {
    pub fn new(name: &str, messages: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            messages: messages
                .iter()
                .map(|(role, pattern)| MessageTemplate {
                    role: role.to_string(),
                    pattern: pattern.to_string(),
                })
                .collect(),
        }
    }

    /// Minimal template: context and question in one user message.
    pub fn v1() -> Self {
        Self::new(V1_NAME, &[("user", V1_USER)])
    }

    /// Strict grounding: context-only answers, bullet points, and a fixed
    /// refusal when the context is insufficient.
    pub fn v2() -> Self {
        Self::new(V2_NAME, &[("system", V2_SYSTEM), ("user", V2_USER)])
    }

    pub fn render(&self, hits: &[Hit], question: &str) -> Prompt {
        render(self, hits, question)
    }
}

/// The templates every question is run through, in run order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateRegistry {
    templates: Vec<PromptTemplate>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new(vec![PromptTemplate::v1(), PromptTemplate::v2()])
    }
}

impl TemplateRegistry {
    pub fn new(templates: Vec<PromptTemplate>) -> Self {
        Self { templates }
    }

    pub fn get(&self, name: &str) -> Option<&PromptTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PromptTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

pub fn render(template: &PromptTemplate, hits: &[Hit], question: &str) -> Prompt {
    let context = format_context_from_hits(hits);
    let messages = template
        .messages
        .iter()
        .map(|m| Message {
            role: m.role.clone(),
            content: substitute(&m.pattern, &context, question),
        })
        .collect();
    Prompt { messages }
}

/// Chunk texts in rank order, separated by blank lines.
pub fn format_context_from_hits(hits: &[Hit]) -> String {
    if hits.is_empty() {
        return "(no context found)".to_string();
    }
    hits.iter()
        .map(|hit| hit.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

// Single pass, so braces inside the context or question are copied verbatim.
fn substitute(pattern: &str, context: &str, question: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + context.len() + question.len());
    let mut rest = pattern;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail.find('}') else {
            out.push_str(tail);
            return out;
        };
        let key = &tail[1..close];
        if key.contains('{') {
            out.push('{');
            rest = &tail[1..];
            continue;
        }
        match key {
            "context" => out.push_str(context),
            "input" | "question" => out.push_str(question),
            _ => out.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    out
}
