//! Error taxonomy for the unified LLM interface.
//!
//! Every failure a provider or the orchestration loop can produce is one of
//! these variants. Nothing here is retried; transport and decode failures
//! are fatal to the current call and surface to the caller as-is.

/// Result alias using the crate error.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced by providers and the chat orchestration loop.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Non-2xx HTTP status or a connection-level failure.
    ///
    /// `status` is `None` when no response was received at all.
    #[error("transport failure (status {status:?}): {body}")]
    Transport {
        /// HTTP status code, if a response arrived.
        status: Option<u16>,
        /// Response body or connection error text.
        body: String,
    },

    /// The provider returned a body or stream frame that is not valid JSON,
    /// or is JSON of an unexpected shape.
    #[error("failed to decode provider response: {0}")]
    Decode(String),

    /// The response carried neither text nor tool calls.
    #[error("provider response carried neither text nor tool calls")]
    UnexpectedResponse,

    /// The model requested a tool that was never registered.
    ///
    /// Fatal: answering an undeclared tool would silently misinform the
    /// model, so the conversation is aborted instead.
    #[error("model requested unknown tool '{0}'")]
    ToolNotFound(String),

    /// Tool-call arguments failed to decode into a JSON object.
    ///
    /// The registry converts this into a tool-result error message so the
    /// model can self-correct; it only escapes as an error when that
    /// conversion is impossible.
    #[error("malformed arguments for tool '{tool}': {reason}")]
    MalformedArguments {
        /// The tool whose arguments failed to decode.
        tool: String,
        /// Decoder error text.
        reason: String,
    },

    /// The tool-calling loop hit its round limit without the model
    /// producing a final answer.
    #[error("tool loop exceeded {0} rounds")]
    ToolLoopExceeded(usize),

    /// Invalid provider configuration (bad header value or endpoint).
    #[error("invalid provider configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport {
            status: e.status().map(|s| s.as_u16()),
            body: e.to_string(),
        }
    }
}

#[cfg(feature = "http")]
impl From<reqwest::header::InvalidHeaderValue> for Error {
    fn from(e: reqwest::header::InvalidHeaderValue) -> Self {
        Self::Config(e.to_string())
    }
}
