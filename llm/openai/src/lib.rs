//! OpenAI-compatible LLM provider.
//!
//! Covers OpenAI, Mistral, and any other service exposing the OpenAI chat
//! completions API. The wire mapping in [`wire`] is shared: the DeepSeek
//! provider reuses it rather than redefining the shape.

use llm::{Client, HttpProvider, Result};
pub use request::Request;

mod provider;
mod request;
pub mod wire;

/// OpenAI-compatible endpoint URLs.
pub mod endpoint {
    /// OpenAI chat completions.
    pub const OPENAI: &str = "https://api.openai.com/v1/chat/completions";
    /// Mistral chat completions.
    pub const MISTRAL: &str = "https://api.mistral.ai/v1/chat/completions";
}

/// An OpenAI-compatible LLM provider.
#[derive(Clone)]
pub struct OpenAI {
    /// The transport (client, headers, endpoint).
    http: HttpProvider,
}

impl OpenAI {
    /// Create a provider targeting the OpenAI API.
    pub fn api(client: Client, key: &str) -> Result<Self> {
        Self::custom(client, key, endpoint::OPENAI)
    }

    /// Create a provider targeting the Mistral API.
    pub fn mistral(client: Client, key: &str) -> Result<Self> {
        Self::custom(client, key, endpoint::MISTRAL)
    }

    /// Create a provider targeting a custom OpenAI-compatible endpoint.
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

#[cfg(test)]
mod tests {
    use super::{OpenAI, endpoint};

    #[test]
    fn api_constructor_uses_default_endpoint() {
        let provider = OpenAI::api(llm::Client::new(), "test-key").expect("provider");
        assert_eq!(provider.endpoint(), endpoint::OPENAI);
    }

    #[test]
    fn mistral_constructor_uses_mistral_endpoint() {
        let provider = OpenAI::mistral(llm::Client::new(), "test-key").expect("provider");
        assert_eq!(provider.endpoint(), endpoint::MISTRAL);
    }

    #[test]
    fn custom_constructor_sets_endpoint() {
        let custom = "http://localhost:9999/v1/chat/completions";
        let provider = OpenAI::custom(llm::Client::new(), "test-key", custom).expect("provider");
        assert_eq!(provider.endpoint(), custom);
    }

    #[test]
    fn bearer_header_is_set() {
        let provider = OpenAI::api(llm::Client::new(), "sk-123").expect("provider");
        let auth = provider.http().headers().get("authorization").expect("auth");
        assert_eq!(auth.to_str().unwrap(), "Bearer sk-123");
    }
}
