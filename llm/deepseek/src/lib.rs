//! DeepSeek LLM provider.
//!
//! The API is OpenAI-compatible, so the request body and wire mapping come
//! from the openai crate; only the endpoint and headers are DeepSeek's
//! own. Tool-call arguments arrive as a single JSON string, which the tool
//! registry decodes once before invocation.

use llm::{Client, HttpProvider, Result};
pub use openai::Request;

mod provider;

/// DeepSeek endpoint URLs.
pub mod endpoint {
    /// DeepSeek chat completions.
    pub const DEEPSEEK: &str = "https://api.deepseek.com/chat/completions";
}

/// The DeepSeek LLM provider.
#[derive(Clone)]
pub struct DeepSeek {
    /// The transport (client, headers, endpoint).
    http: HttpProvider,
}

impl DeepSeek {
    /// Create a provider targeting the DeepSeek API.
    pub fn api(client: Client, key: &str) -> Result<Self> {
        Self::custom(client, key, endpoint::DEEPSEEK)
    }

    /// Create a provider targeting a custom DeepSeek-compatible endpoint.
    pub fn custom(client: Client, key: &str, endpoint: &str) -> Result<Self> {
        Ok(Self {
            http: HttpProvider::bearer(client, key, endpoint)?,
        })
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }

    pub(crate) fn http(&self) -> &HttpProvider {
        &self.http
    }
}
