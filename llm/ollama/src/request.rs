//! Request bodies for the native Ollama API.

use llm::{Config, General, Message, Tool, ToolChoice, order_for_wire};
use serde::Serialize;
use serde_json::{Map, Value, json};

/// The request body for `/api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model identifier.
    pub model: String,
    /// The conversation messages.
    pub messages: Vec<WireMessage>,
    /// Whether to stream the response.
    pub stream: bool,
    /// Tools the model may call (OpenAI function format).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Value>,
    /// Model options (temperature, num_predict, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    /// Output format constraint ("json").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// A wire-level chat message.
#[derive(Debug, Clone, Serialize)]
pub struct WireMessage {
    /// The role name.
    pub role: &'static str,
    /// The message text.
    pub content: String,
    /// Base64 image payloads.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Tool calls re-issued from history (arguments as objects).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<Value>,
}

impl Request {
    /// Clone the request with the given history converted to wire form.
    pub fn messages(&self, messages: &[Message]) -> Self {
        let wire = order_for_wire(messages)
            .into_iter()
            .map(|msg| {
                let tool_calls = msg
                    .tool_calls
                    .iter()
                    .map(|call| {
                        json!({
                            "function": {
                                "name": call.function.name,
                                "arguments": decode_arguments(&call.function.arguments),
                            }
                        })
                    })
                    .collect();
                WireMessage {
                    role: msg.role.as_str(),
                    content: msg.content,
                    images: msg.images,
                    tool_calls,
                }
            })
            .collect();

        Self {
            messages: wire,
            ..self.clone()
        }
    }

    /// Enable streaming for the request.
    pub fn stream(mut self) -> Self {
        self.stream = true;
        self
    }
}

/// Decode a normalized argument string back to an object for the wire.
fn decode_arguments(arguments: &str) -> Value {
    if arguments.is_empty() {
        return json!({});
    }
    serde_json::from_str(arguments).unwrap_or_else(|_| Value::String(arguments.to_owned()))
}

fn build_options(config: &General) -> Option<Value> {
    let mut options = Map::new();
    if let Some(temperature) = config.temperature {
        options.insert("temperature".into(), json!(temperature));
    }
    if let Some(max_tokens) = config.max_tokens {
        options.insert("num_predict".into(), json!(max_tokens));
    }
    if options.is_empty() {
        None
    } else {
        Some(Value::Object(options))
    }
}

impl From<General> for Request {
    fn from(config: General) -> Self {
        let mut req = Self {
            model: config.model.clone(),
            messages: Vec::new(),
            stream: false,
            tools: None,
            options: build_options(&config),
            format: None,
        };

        if let Some(tools) = config.tools {
            req = req.with_tools(tools);
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

    // The native API has no tool_choice field; the model decides.
    fn with_tool_choice(self, _tool_choice: ToolChoice) -> Self {
        self
    }
}

/// The request body for `/api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// The model identifier.
    pub model: String,
    /// The bare prompt.
    pub prompt: String,
    /// Optional system prompt (top-level field on this endpoint).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Whether to stream the response.
    pub stream: bool,
    /// Output format constraint ("json").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Model options (temperature, num_predict, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl GenerateRequest {
    /// Create a completion request for the given model and prompt.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            stream: false,
            format: None,
            options: None,
        }
    }

    /// Set the system prompt.
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Force JSON output.
    pub fn format_json(mut self) -> Self {
        self.format = Some("json".into());
        self
    }

    /// Enable streaming for the request.
    pub fn stream(mut self) -> Self {
        self.stream = true;
        self
    }
}
