//! Claude (Anthropic) LLM provider.
//!
//! The Messages API differs from OpenAI-compatible services in three ways
//! this crate has to absorb: the system prompt is a top-level request
//! field, message content is a list of typed blocks (`text`, `tool_use`,
//! `tool_result`), and the loop signal is `stop_reason == "tool_use"`.

use llm::{Client, HttpProvider, Result};
pub use request::Request;

mod provider;
mod request;
mod stream;
mod wire;

/// The Messages API version header value.
const VERSION: &str = "2023-06-01";

/// Anthropic endpoint URLs.
pub mod endpoint {
    /// Anthropic messages endpoint.
    pub const CLAUDE: &str = "https://api.anthropic.com/v1/messages";
}

/// The Claude LLM provider.
#[derive(Clone)]
pub struct Claude {
    /// The transport (client, headers, endpoint).
    http: HttpProvider,
}

impl Claude {
    /// Create a provider targeting the Anthropic API.
    pub fn api(client: Client, key: &str) -> Result<Self> {
        Self::custom(client, key, endpoint::CLAUDE)
    }

    /// Create a provider targeting a custom Anthropic-compatible endpoint.
    pub fn custom(client: Client, key: &str, endpoint: &str) -> Result<Self> {
        Ok(Self {
            http: HttpProvider::custom_header(client, "x-api-key", key, endpoint)?
                .header("anthropic-version", VERSION)?,
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
