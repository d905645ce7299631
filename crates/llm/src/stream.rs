//! Streaming abstractions for the unified LLM interface.
//!
//! [`StreamChunk`] is the normalized stream delta every provider decodes
//! into. [`SseDecoder`] and [`NdjsonDecoder`] are incremental frame
//! decoders: transport reads arrive at arbitrary byte boundaries, so both
//! carry a partial-line buffer across calls.

use crate::{FinishReason, ToolCall, Usage};

/// A normalized streaming delta.
#[derive(Debug, Clone, Default)]
pub struct StreamChunk {
    /// Incremental text, if the chunk carried any.
    pub text: Option<String>,

    /// Tool-call deltas, keyed by `ToolCall::index` for accumulation.
    pub tool_calls: Option<Vec<ToolCall>>,

    /// Terminal finish reason, present on the last meaningful chunk.
    pub finish: Option<FinishReason>,

    /// Token usage statistics (typically only on the final chunk).
    pub usage: Option<Usage>,
}

impl StreamChunk {
    /// Create a chunk carrying only text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Create a chunk carrying tool-call deltas.
    pub fn tool_calls(calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls: Some(calls),
            ..Default::default()
        }
    }

    /// Create a terminal chunk carrying a finish reason.
    pub fn finish(reason: FinishReason) -> Self {
        Self {
            finish: Some(reason),
            ..Default::default()
        }
    }

    /// Get the text of this chunk, filtering empty payloads.
    pub fn content(&self) -> Option<&str> {
        self.text.as_deref().filter(|s| !s.is_empty())
    }

    /// Get the tool-call deltas of this chunk.
    pub fn calls(&self) -> Option<&[ToolCall]> {
        self.tool_calls.as_deref()
    }

    /// Get the finish reason of this chunk.
    pub fn reason(&self) -> Option<FinishReason> {
        self.finish
    }
}

/// Incremental decoder for Server-Sent-Events `data:` payloads.
///
/// Feed raw transport bytes; complete payloads come back in order. Event
/// names, comments, and blank lines are discarded.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: String,
}

impl SseDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes, returning the complete `data:` payloads they finish.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.push_str(&String::from_utf8_lossy(bytes));

        let mut payloads = Vec::new();
        while let Some(pos) = self.buf.find('\n') {
            let line: String = self.buf.drain(..=pos).collect();
            let line = line.trim_end_matches(['\n', '\r']);
            if let Some(data) = line.strip_prefix("data:") {
                let data = data.strip_prefix(' ').unwrap_or(data);
                if !data.is_empty() {
                    payloads.push(data.to_owned());
                }
            }
        }
        payloads
    }
}

/// Incremental decoder for newline-delimited JSON.
///
/// Feed raw transport bytes; complete non-blank lines come back in order.
#[derive(Debug, Default)]
pub struct NdjsonDecoder {
    buf: String,
}

impl NdjsonDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes, returning the complete lines they finish.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.push_str(&String::from_utf8_lossy(bytes));

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.find('\n') {
            let line: String = self.buf.drain(..=pos).collect();
            let line = line.trim();
            if !line.is_empty() {
                lines.push(line.to_owned());
            }
        }
        lines
    }

    /// Return any buffered final line, for input ending without a newline.
    pub fn flush(&mut self) -> Option<String> {
        let line = self.buf.trim().to_owned();
        self.buf.clear();
        if line.is_empty() { None } else { Some(line) }
    }
}
