//! Request body for the Anthropic Messages API.

use crate::wire::Block;
use llm::{Config, General, Message, Role, Tool, ToolChoice, order_for_wire};
use serde::Serialize;
use serde_json::{Value, json};

/// Default token ceiling; `max_tokens` is mandatory on this API.
const DEFAULT_MAX_TOKENS: usize = 1024;

/// The request body for the Anthropic Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model identifier.
    pub model: String,
    /// Maximum tokens to generate (required by the API).
    pub max_tokens: usize,
    /// System prompt; a top-level field on this API, never a message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Conversation messages.
    pub messages: Vec<WireMessage>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Whether to stream the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Tools the model may call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<WireTool>>,
    /// Tool choice control.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
}

/// A wire-level message: role plus text or typed blocks.
#[derive(Debug, Clone, Serialize)]
pub struct WireMessage {
    /// "user" or "assistant".
    pub role: &'static str,
    /// Message content.
    pub content: Content,
}

/// Message content: plain text shorthand or a block list.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Content {
    /// Plain text (shorthand).
    Text(String),
    /// Typed content blocks.
    Blocks(Vec<Block>),
}

/// A wire-level tool definition.
#[derive(Debug, Clone, Serialize)]
pub struct WireTool {
    /// Tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for the input parameters.
    pub input_schema: Value,
}

impl Request {
    /// Clone the request with the given history converted to wire form.
    ///
    /// System messages are folded into the top-level `system` field;
    /// tool-role messages become user-role `tool_result` blocks; assistant
    /// tool requests become `tool_use` blocks with their arguments decoded
    /// back to JSON.
    pub fn messages(&self, messages: &[Message]) -> Self {
        let mut system = Vec::new();
        let mut wire = Vec::with_capacity(messages.len());

        for msg in order_for_wire(messages) {
            match msg.role {
                Role::System => system.push(msg.content),
                Role::Tool => wire.push(WireMessage {
                    role: "user",
                    content: Content::Blocks(vec![Block::ToolResult {
                        tool_use_id: msg.tool_call_id.to_string(),
                        content: Some(msg.content),
                    }]),
                }),
                Role::Assistant if !msg.tool_calls.is_empty() => {
                    let mut blocks = Vec::with_capacity(msg.tool_calls.len() + 1);
                    if !msg.content.is_empty() {
                        blocks.push(Block::Text {
                            text: msg.content.clone(),
                        });
                    }
                    for call in &msg.tool_calls {
                        blocks.push(Block::ToolUse {
                            id: call.id.clone(),
                            name: call.function.name.clone(),
                            input: decode_input(&call.function.arguments),
                        });
                    }
                    wire.push(WireMessage {
                        role: "assistant",
                        content: Content::Blocks(blocks),
                    });
                }
                Role::Assistant => wire.push(WireMessage {
                    role: "assistant",
                    content: Content::Text(msg.content),
                }),
                Role::User => wire.push(WireMessage {
                    role: "user",
                    content: Content::Text(msg.content),
                }),
            }
        }

        Self {
            system: if system.is_empty() {
                self.system.clone()
            } else {
                Some(system.join("\n"))
            },
            messages: wire,
            ..self.clone()
        }
    }

    /// Enable streaming for the request.
    pub fn stream(mut self) -> Self {
        self.stream = Some(true);
        self
    }
}

/// Decode a normalized argument string back to JSON for the wire.
///
/// The string came from our own normalization of a prior response; if it
/// somehow fails to parse, ship it as a raw string rather than dropping it.
fn decode_input(arguments: &str) -> Value {
    if arguments.is_empty() {
        return json!({});
    }
    serde_json::from_str(arguments).unwrap_or_else(|_| Value::String(arguments.to_owned()))
}

impl From<General> for Request {
    fn from(config: General) -> Self {
        let mut req = Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            system: None,
            messages: Vec::new(),
            temperature: config.temperature,
            stream: None,
            tools: None,
            tool_choice: None,
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
            .map(|tool| WireTool {
                name: tool.name,
                description: tool.description,
                input_schema: json!(tool.parameters),
            })
            .collect();
        Self {
            tools: Some(tools),
            ..self
        }
    }

    fn with_tool_choice(self, tool_choice: ToolChoice) -> Self {
        Self {
            tool_choice: match tool_choice {
                ToolChoice::None => Some(json!({ "type": "none" })),
                ToolChoice::Auto => Some(json!({ "type": "auto" })),
                ToolChoice::Required => Some(json!({ "type": "any" })),
                ToolChoice::Function(name) => Some(json!({ "type": "tool", "name": name })),
            },
            ..self
        }
    }
}
