//! Ollama LLM provider.
//!
//! Speaks the native Ollama API: `/api/chat` for conversations and
//! `/api/generate` for bare completions. Both respond with
//! newline-delimited JSON rather than SSE, and tool calls arrive as typed
//! objects without call ids; the adapter synthesizes local ones.

use llm::{Client, HttpProvider};
pub use request::{GenerateRequest, Request};

mod generate;
mod provider;
mod request;
mod wire;

/// The default local Ollama host.
pub const HOST: &str = "http://localhost:11434";

/// The Ollama LLM provider.
#[derive(Clone)]
pub struct Ollama {
    /// Transport for `/api/chat`.
    chat: HttpProvider,
    /// Transport for `/api/generate`.
    generate: HttpProvider,
}

impl Ollama {
    /// Create a provider targeting a local Ollama instance (no API key).
    pub fn local(client: Client) -> Self {
        Self::custom(client, HOST)
    }

    /// Create a provider targeting a custom Ollama base URL.
    pub fn custom(client: Client, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            chat: HttpProvider::no_auth(client.clone(), &format!("{base}/api/chat")),
            generate: HttpProvider::no_auth(client, &format!("{base}/api/generate")),
        }
    }

    /// The chat endpoint.
    pub fn endpoint(&self) -> &str {
        self.chat.endpoint()
    }

    pub(crate) fn chat_http(&self) -> &HttpProvider {
        &self.chat
    }

    pub(crate) fn generate_http(&self) -> &HttpProvider {
        &self.generate
    }
}
