//! Provider enum for static dispatch over the LLM implementations.

use claude::Claude;
use deepseek::DeepSeek;
use futures_core::Stream;
use llm::{Client, Completion, Error, General, LLM, Message, Result, StreamChunk};
use ollama::Ollama;
use openai::OpenAI;

/// Unified LLM provider (static dispatch, no dyn).
#[derive(Clone)]
pub enum Provider {
    /// OpenAI-compatible provider (OpenAI, Mistral, custom endpoints).
    OpenAI(OpenAI),
    /// Claude (Anthropic) provider.
    Claude(Claude),
    /// Ollama provider.
    Ollama(Ollama),
    /// DeepSeek provider.
    DeepSeek(DeepSeek),
}

impl Provider {
    /// Create a provider from a model name.
    ///
    /// Ollama serves arbitrary local model names, so it never matches here;
    /// use [`Provider::ollama`] explicitly.
    pub fn new(model: &str, client: Client, key: &str) -> Result<Self> {
        match model {
            m if m.starts_with("claude") => Ok(Self::Claude(Claude::api(client, key)?)),
            m if m.starts_with("deepseek") => Ok(Self::DeepSeek(DeepSeek::api(client, key)?)),
            m if m.starts_with("mistral") => Ok(Self::OpenAI(OpenAI::mistral(client, key)?)),
            m if m.starts_with("gpt") || m.starts_with("o1") || m.starts_with("o3") => {
                Ok(Self::OpenAI(OpenAI::api(client, key)?))
            }
            _ => Err(Error::Config(format!("unknown provider for model: {model}"))),
        }
    }

    /// Create a provider targeting a local Ollama instance.
    pub fn ollama(client: Client) -> Self {
        Self::Ollama(Ollama::local(client))
    }

    /// Context window limit for the current provider/model.
    ///
    /// If `config.context_limit` is set, that takes precedence.
    /// Otherwise, provider defaults are used.
    pub fn context_limit(&self, config: &General) -> usize {
        config.context_limit.unwrap_or(match self {
            Self::OpenAI(_) => 128_000,
            Self::Claude(_) => 200_000,
            Self::Ollama(_) => 8_192,
            Self::DeepSeek(_) => 64_000,
        })
    }
}

impl LLM for Provider {
    type ChatConfig = General;

    async fn send(&self, config: &General, messages: &[Message]) -> Result<Completion, Error> {
        match self {
            Self::OpenAI(p) => {
                let cfg = openai::Request::from(config.clone());
                p.send(&cfg, messages).await
            }
            Self::Claude(p) => {
                let cfg = claude::Request::from(config.clone());
                p.send(&cfg, messages).await
            }
            Self::Ollama(p) => {
                let cfg = ollama::Request::from(config.clone());
                p.send(&cfg, messages).await
            }
            Self::DeepSeek(p) => {
                let cfg = deepseek::Request::from(config.clone());
                p.send(&cfg, messages).await
            }
        }
    }

    fn stream(
        &self,
        config: General,
        messages: &[Message],
        usage: bool,
    ) -> impl Stream<Item = Result<StreamChunk, Error>> + Send {
        async_stream::stream! {
            match self {
                Self::OpenAI(p) => {
                    let inner = p.stream(openai::Request::from(config), messages, usage);
                    for await item in inner {
                        yield item;
                    }
                }
                Self::Claude(p) => {
                    let inner = p.stream(claude::Request::from(config), messages, usage);
                    for await item in inner {
                        yield item;
                    }
                }
                Self::Ollama(p) => {
                    let inner = p.stream(ollama::Request::from(config), messages, usage);
                    for await item in inner {
                        yield item;
                    }
                }
                Self::DeepSeek(p) => {
                    let inner = p.stream(deepseek::Request::from(config), messages, usage);
                    for await item in inner {
                        yield item;
                    }
                }
            }
        }
    }
}
