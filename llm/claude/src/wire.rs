//! Anthropic Messages API wire format and its normalization.

use compact_str::CompactString;
use llm::{Completion, Error, FinishReason, FunctionCall, Result, ToolCall, Usage};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A content block in an Anthropic message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Text content.
    Text {
        /// The text string.
        text: String,
    },
    /// Tool use request from the assistant.
    ToolUse {
        /// Tool use identifier.
        id: CompactString,
        /// Tool name.
        name: CompactString,
        /// Tool input as JSON.
        input: Value,
    },
    /// Tool result, sent back under the user role.
    ToolResult {
        /// Tool use ID this result responds to.
        tool_use_id: String,
        /// Result content.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
    /// Any block type this client does not model.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<Block>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireUsage {
    #[serde(default)]
    pub input_tokens: Option<u32>,
    #[serde(default)]
    pub output_tokens: Option<u32>,
}

impl From<WireUsage> for Usage {
    fn from(usage: WireUsage) -> Self {
        let total = match (usage.input_tokens, usage.output_tokens) {
            (Some(input), Some(output)) => Some(input + output),
            _ => None,
        };
        Self {
            prompt_tokens: usage.input_tokens,
            completion_tokens: usage.output_tokens,
            total_tokens: total,
        }
    }
}

/// Map an Anthropic stop reason to the normalized enum.
pub fn parse_finish(reason: &str) -> FinishReason {
    match reason {
        "end_turn" | "stop_sequence" => FinishReason::Stop,
        "max_tokens" => FinishReason::Length,
        "tool_use" => FinishReason::ToolCalls,
        _ => FinishReason::Other,
    }
}

/// Parse a non-streaming Messages API body into a [`Completion`].
pub fn parse_response(body: &str) -> Result<Completion> {
    let response: MessagesResponse = serde_json::from_str(body)?;

    let mut fragments = Vec::new();
    let mut tool_calls = Vec::new();
    for block in response.content {
        match block {
            Block::Text { text } => {
                if !text.is_empty() {
                    fragments.push(text);
                }
            }
            Block::ToolUse { id, name, input } => {
                tool_calls.push(ToolCall {
                    id,
                    index: tool_calls.len() as u32,
                    call_type: "function".into(),
                    function: FunctionCall {
                        name,
                        arguments: input.to_string(),
                    },
                });
            }
            Block::ToolResult { .. } | Block::Unknown => {}
        }
    }

    if fragments.is_empty() && tool_calls.is_empty() {
        return Err(Error::UnexpectedResponse);
    }

    let finish = match response.stop_reason.as_deref() {
        Some(reason) => parse_finish(reason),
        None if !tool_calls.is_empty() => FinishReason::ToolCalls,
        None => FinishReason::Stop,
    };

    Ok(Completion {
        fragments,
        tool_calls,
        finish,
        usage: response.usage.map(Usage::from),
    })
}
