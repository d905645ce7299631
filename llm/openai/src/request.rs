//! Request body for OpenAI-compatible chat completions APIs.

use llm::{Config, General, Message, Tool, ToolChoice, order_for_wire};
use serde::Serialize;
use serde_json::{Value, json};

/// The request body for an OpenAI-compatible chat completions API.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The messages to send.
    pub messages: Vec<Message>,
    /// The model identifier.
    pub model: String,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Whether to stream the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Stream options (e.g. include_usage).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_options: Option<Value>,
    /// Tool choice control.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
    /// Tools the model may call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Value>,
}

impl Request {
    /// Clone the request with the given messages, system message first.
    pub fn messages(&self, messages: &[Message]) -> Self {
        let mut messages = order_for_wire(messages);
        for msg in &mut messages {
            // Image payloads are an Ollama wire concern; this API would
            // reject the unknown field.
            msg.images.clear();
        }
        Self {
            messages,
            ..self.clone()
        }
    }

    /// Enable streaming for the request.
    pub fn stream(mut self, usage: bool) -> Self {
        self.stream = Some(true);
        self.stream_options = if usage {
            Some(json!({ "include_usage": true }))
        } else {
            None
        };
        self
    }
}

impl From<General> for Request {
    fn from(config: General) -> Self {
        let mut req = Self {
            messages: Vec::new(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            stream: None,
            stream_options: None,
            tool_choice: None,
            tools: None,
        };

        if let Some(tools) = config.tools {
            req = req.with_tools(tools);
        }
        if let Some(tool_choice) = config.tool_choice {
            req = req.with_tool_choice(tool_choice);
        }

        req
    }
}

impl Config for Request {
    fn with_tools(self, tools: Vec<Tool>) -> Self {
        let tools = tools
            .into_iter()
            .map(|tool| {
                json!({
                    "type": "function",
                    "function": json!(tool),
                })
            })
            .collect::<Vec<_>>();
        Self {
            tools: Some(json!(tools)),
            ..self
        }
    }

    fn with_tool_choice(self, tool_choice: ToolChoice) -> Self {
        Self {
            tool_choice: match tool_choice {
                ToolChoice::None => Some(json!("none")),
                ToolChoice::Auto => Some(json!("auto")),
                ToolChoice::Required => Some(json!("required")),
                ToolChoice::Function(name) => Some(json!({
                    "type": "function",
                    "function": { "name": name }
                })),
            },
            ..self
        }
    }
}
