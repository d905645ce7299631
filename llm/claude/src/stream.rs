//! SSE event decoding for the Anthropic streaming Messages API.
//!
//! The event vocabulary: `message_start` (metadata + prompt usage),
//! `content_block_start` (begin a text or tool_use block),
//! `content_block_delta` (text_delta or input_json_delta),
//! `content_block_stop`, `message_delta` (stop reason + output usage),
//! `message_stop`, and `ping` keep-alives.

use crate::wire::{self, WireUsage};
use compact_str::CompactString;
use llm::{FunctionCall, StreamChunk, ToolCall, Usage};
use serde::Deserialize;

/// A raw SSE event from the Anthropic streaming API.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Initial message metadata.
    MessageStart {
        /// Message metadata, including prompt-side usage.
        message: MessageMeta,
    },
    /// Begin a content block.
    ContentBlockStart {
        /// Block index; doubles as the tool-call accumulation key.
        index: u32,
        /// The opening block.
        content_block: ContentBlock,
    },
    /// Incremental content within a block.
    ContentBlockDelta {
        /// Block index.
        index: u32,
        /// The delta payload.
        delta: BlockDelta,
    },
    /// End of a content block.
    ContentBlockStop {},
    /// Final message delta (stop reason + completion usage).
    MessageDelta {
        /// Stop reason carrier.
        delta: MessageDeltaBody,
        /// Completion-side usage.
        #[serde(default)]
        usage: Option<WireUsage>,
    },
    /// End of message.
    MessageStop,
    /// Keep-alive.
    Ping,
    /// Catch-all for unknown event types.
    #[serde(other)]
    Unknown,
}

/// Metadata from `message_start`.
#[derive(Debug, Deserialize)]
pub struct MessageMeta {
    /// Prompt-side usage, reported up front.
    #[serde(default)]
    pub usage: Option<WireUsage>,
}

/// The block opened by `content_block_start`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A text block, possibly pre-seeded with text.
    Text {
        /// Initial text.
        text: String,
    },
    /// A tool-use block; id and name arrive here, input streams after.
    ToolUse {
        /// Tool use identifier.
        id: CompactString,
        /// Tool name.
        name: CompactString,
    },
    /// Any block type this client does not model.
    #[serde(other)]
    Unknown,
}

/// The payload of `content_block_delta`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockDelta {
    /// Incremental text.
    TextDelta {
        /// The text fragment.
        text: String,
    },
    /// Incremental tool input JSON.
    InputJsonDelta {
        /// A piece of the input JSON string.
        partial_json: String,
    },
    /// Any delta type this client does not model.
    #[serde(other)]
    Unknown,
}

/// The body of `message_delta`.
#[derive(Debug, Deserialize)]
pub struct MessageDeltaBody {
    /// The stop reason, when the message is ending.
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl Event {
    /// Convert this event into a normalized [`StreamChunk`].
    ///
    /// Returns `None` for events with nothing to report (pings, block
    /// stops, unknown events, empty text).
    pub fn into_chunk(self) -> Option<StreamChunk> {
        match self {
            Self::MessageStart { message } => {
                let usage = message.usage.map(Usage::from)?;
                Some(StreamChunk {
                    usage: Some(usage),
                    ..Default::default()
                })
            }
            Self::ContentBlockStart {
                content_block: ContentBlock::Text { text },
                ..
            } => {
                if text.is_empty() {
                    None
                } else {
                    Some(StreamChunk::text(text))
                }
            }
            Self::ContentBlockStart {
                index,
                content_block: ContentBlock::ToolUse { id, name },
            } => Some(StreamChunk::tool_calls(vec![ToolCall {
                id,
                index,
                call_type: "function".into(),
                function: FunctionCall {
                    name,
                    arguments: String::new(),
                },
            }])),
            Self::ContentBlockDelta {
                delta: BlockDelta::TextDelta { text },
                ..
            } => {
                if text.is_empty() {
                    None
                } else {
                    Some(StreamChunk::text(text))
                }
            }
            Self::ContentBlockDelta {
                index,
                delta: BlockDelta::InputJsonDelta { partial_json },
            } => Some(StreamChunk::tool_calls(vec![ToolCall {
                index,
                function: FunctionCall {
                    arguments: partial_json,
                    ..Default::default()
                },
                ..Default::default()
            }])),
            Self::MessageDelta { delta, usage } => Some(StreamChunk {
                finish: delta.stop_reason.as_deref().map(wire::parse_finish),
                usage: usage.map(Usage::from),
                ..Default::default()
            }),
            Self::ContentBlockStart {
                content_block: ContentBlock::Unknown,
                ..
            }
            | Self::ContentBlockDelta {
                delta: BlockDelta::Unknown,
                ..
            }
            | Self::ContentBlockStop {}
            | Self::MessageStop
            | Self::Ping
            | Self::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm::{FinishReason, MessageBuilder, Role};

    fn parse(payload: &str) -> Event {
        serde_json::from_str(payload).unwrap()
    }

    #[test]
    fn text_delta_becomes_text_chunk() {
        let event = parse(r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hel"}}"#);
        let chunk = event.into_chunk().unwrap();
        assert_eq!(chunk.content(), Some("Hel"));
    }

    #[test]
    fn tool_use_start_carries_id_and_name() {
        let event = parse(r#"{"type":"content_block_start","index":1,"content_block":{"type":"tool_use","id":"toolu_1","name":"weather"}}"#);
        let chunk = event.into_chunk().unwrap();
        let calls = chunk.calls().unwrap();
        assert_eq!(calls[0].id, "toolu_1");
        assert_eq!(calls[0].index, 1);
        assert_eq!(calls[0].function.name, "weather");
    }

    #[test]
    fn message_delta_carries_finish_and_usage() {
        let event = parse(r#"{"type":"message_delta","delta":{"stop_reason":"tool_use"},"usage":{"output_tokens":7}}"#);
        let chunk = event.into_chunk().unwrap();
        assert_eq!(chunk.reason(), Some(FinishReason::ToolCalls));
        assert_eq!(chunk.usage.unwrap().completion_tokens, Some(7));
    }

    #[test]
    fn ping_and_block_stop_produce_nothing() {
        assert!(parse(r#"{"type":"ping"}"#).into_chunk().is_none());
        assert!(
            parse(r#"{"type":"content_block_stop","index":0}"#)
                .into_chunk()
                .is_none()
        );
        assert!(parse(r#"{"type":"message_stop"}"#).into_chunk().is_none());
    }

    #[test]
    fn unknown_events_are_tolerated() {
        assert!(
            parse(r#"{"type":"brand_new_event","payload":1}"#)
                .into_chunk()
                .is_none()
        );
    }

    #[test]
    fn input_json_deltas_accumulate_into_one_call() {
        let events = [
            r#"{"type":"content_block_start","index":0,"content_block":{"type":"tool_use","id":"toolu_1","name":"weather"}}"#,
            r#"{"type":"content_block_delta","index":0,"delta":{"type":"input_json_delta","partial_json":"{\"city\":"}}"#,
            r#"{"type":"content_block_delta","index":0,"delta":{"type":"input_json_delta","partial_json":"\"Paris\"}"}}"#,
        ];
        let mut builder = MessageBuilder::new(Role::Assistant);
        for event in events {
            if let Some(chunk) = parse(event).into_chunk() {
                builder.accept(&chunk);
            }
        }
        let message = builder.build();
        assert_eq!(message.tool_calls.len(), 1);
        assert_eq!(
            message.tool_calls[0].function.arguments,
            r#"{"city":"Paris"}"#
        );
    }
}
