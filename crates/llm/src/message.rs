//! Chat messages for the unified LLM interface.

use crate::{StreamChunk, ToolCall};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// A message in the chat.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Message {
    /// The role of the message.
    pub role: Role,

    /// The content of the message.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,

    /// Base64 image payloads attached to the message. Only the Ollama
    /// adapter serializes these.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,

    /// The tool call this message answers (tool-role messages only).
    #[serde(default, skip_serializing_if = "CompactString::is_empty")]
    pub tool_call_id: CompactString,

    /// The tool calls requested by this message (assistant messages only).
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub tool_calls: SmallVec<[ToolCall; 4]>,
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            ..Default::default()
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            ..Default::default()
        }
    }

    /// Create a new user message carrying base64 images.
    pub fn user_with_images(content: impl Into<String>, images: Vec<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            images,
            ..Default::default()
        }
    }

    /// Create a new assistant message, optionally carrying the tool calls
    /// the model asked for.
    pub fn assistant(content: impl Into<String>, tool_calls: Option<&[ToolCall]>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_calls: tool_calls
                .map(|tc| tc.iter().cloned().collect())
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Create a new tool-result message answering the given call.
    pub fn tool(content: impl Into<String>, call: impl Into<CompactString>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_call_id: call.into(),
            ..Default::default()
        }
    }

    /// Create a new message builder for accumulating streaming deltas.
    pub fn builder(role: Role) -> MessageBuilder {
        MessageBuilder::new(role)
    }
}

/// Order messages for a wire-level payload: system messages first,
/// everything else in its original order.
///
/// Providers require the system prompt to lead the conversation regardless
/// of where the caller placed it in history.
pub fn order_for_wire(messages: &[Message]) -> Vec<Message> {
    if messages.first().map(|m| m.role) == Some(Role::System)
        && messages.iter().skip(1).all(|m| m.role != Role::System)
    {
        return messages.to_vec();
    }

    let mut ordered = Vec::with_capacity(messages.len());
    ordered.extend(messages.iter().filter(|m| m.role == Role::System).cloned());
    ordered.extend(messages.iter().filter(|m| m.role != Role::System).cloned());
    ordered
}

/// A builder accumulating streaming deltas into one assistant message.
pub struct MessageBuilder {
    /// The message under construction.
    message: Message,
    /// Tool calls keyed by stream index, merged as deltas arrive.
    calls: BTreeMap<u32, ToolCall>,
}

impl MessageBuilder {
    /// Create a new message builder.
    pub fn new(role: Role) -> Self {
        Self {
            message: Message {
                role,
                ..Default::default()
            },
            calls: BTreeMap::new(),
        }
    }

    /// Accept a chunk from the stream.
    ///
    /// Returns whether the chunk carried displayable text.
    pub fn accept(&mut self, chunk: &StreamChunk) -> bool {
        if let Some(calls) = chunk.calls() {
            for call in calls {
                let entry = self.calls.entry(call.index).or_default();
                entry.merge(call);
            }
        }

        let mut has_content = false;
        if let Some(content) = chunk.content() {
            self.message.content.push_str(content);
            has_content = true;
        }

        has_content
    }

    /// Build the message.
    pub fn build(mut self) -> Message {
        if !self.calls.is_empty() {
            self.message.tool_calls = self.calls.into_values().collect();
        }
        self.message
    }
}

/// The role of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
pub enum Role {
    /// The user role.
    #[serde(rename = "user")]
    #[default]
    User,
    /// The assistant role.
    #[serde(rename = "assistant")]
    Assistant,
    /// The system role.
    #[serde(rename = "system")]
    System,
    /// The tool role.
    #[serde(rename = "tool")]
    Tool,
}

impl Role {
    /// The wire-level name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
            Self::Tool => "tool",
        }
    }
}
