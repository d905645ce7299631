//! Native Ollama wire format and its normalization.
//!
//! Both endpoints answer with newline-delimited JSON objects. Tool calls
//! carry typed argument objects and no ids; normalization serializes the
//! arguments and synthesizes local call ids so the rest of the stack can
//! treat them like any other provider's.

use llm::{Completion, Error, FinishReason, FunctionCall, Result, StreamChunk, ToolCall, Usage};
use serde::Deserialize;
use serde_json::Value;

/// One `/api/chat` response object (a full response or one stream line).
#[derive(Debug, Deserialize)]
pub(crate) struct ChatLine {
    #[serde(default)]
    message: Option<WireMessage>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    done_reason: Option<String>,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    function: WireFunction,
}

#[derive(Debug, Deserialize)]
struct WireFunction {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// One `/api/generate` response object.
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateLine {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub done: bool,
}

impl GenerateLine {
    /// The usable text fragment of this line. Missing and empty
    /// `response` fields yield nothing.
    pub fn fragment(self) -> Option<String> {
        self.response.filter(|response| !response.is_empty())
    }
}

fn usage_of(line: &ChatLine) -> Option<Usage> {
    if line.prompt_eval_count.is_none() && line.eval_count.is_none() {
        return None;
    }
    let total = match (line.prompt_eval_count, line.eval_count) {
        (Some(prompt), Some(completion)) => Some(prompt + completion),
        _ => None,
    };
    Some(Usage {
        prompt_tokens: line.prompt_eval_count,
        completion_tokens: line.eval_count,
        total_tokens: total,
    })
}

fn parse_done_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        None | Some("stop") => FinishReason::Stop,
        Some("length") => FinishReason::Length,
        Some(_) => FinishReason::Other,
    }
}

/// Convert wire tool calls, synthesizing ids from the stream index.
fn convert_calls(calls: Vec<WireToolCall>, base_index: u32) -> Vec<ToolCall> {
    calls
        .into_iter()
        .enumerate()
        .map(|(i, call)| {
            let index = base_index + i as u32;
            let arguments = if call.function.arguments.is_null() {
                "{}".to_owned()
            } else {
                call.function.arguments.to_string()
            };
            ToolCall {
                id: format!("call_{index}").into(),
                index,
                call_type: "function".into(),
                function: FunctionCall {
                    name: call.function.name.into(),
                    arguments,
                },
            }
        })
        .collect()
}

/// Parse a non-streaming `/api/chat` body into a [`Completion`].
pub fn parse_chat_response(body: &str) -> Result<Completion> {
    let line: ChatLine = serde_json::from_str(body)?;
    let usage = usage_of(&line);
    let message = line.message.ok_or(Error::UnexpectedResponse)?;

    let tool_calls = convert_calls(message.tool_calls.unwrap_or_default(), 0);
    if message.content.is_none() && tool_calls.is_empty() {
        return Err(Error::UnexpectedResponse);
    }

    let fragments = message
        .content
        .filter(|content| !content.is_empty())
        .map(|content| vec![content])
        .unwrap_or_default();

    let finish = if tool_calls.is_empty() {
        parse_done_reason(line.done_reason.as_deref())
    } else {
        FinishReason::ToolCalls
    };

    Ok(Completion {
        fragments,
        tool_calls,
        finish,
        usage,
    })
}

/// Decode one `/api/chat` stream line.
///
/// Returns `None` for lines with nothing to report: no message, a
/// non-assistant role, or empty content. `base_index` keys synthesized
/// tool-call ids across the lines of one stream.
pub fn decode_chat_line(payload: &str, base_index: u32) -> Result<Option<StreamChunk>> {
    let line: ChatLine = serde_json::from_str(payload)?;

    if line.done {
        let finish = parse_done_reason(line.done_reason.as_deref());
        return Ok(Some(StreamChunk {
            finish: Some(finish),
            usage: usage_of(&line),
            ..Default::default()
        }));
    }

    let Some(message) = line.message else {
        return Ok(None);
    };
    if message.role.as_deref() != Some("assistant") {
        return Ok(None);
    }

    let calls = message.tool_calls.unwrap_or_default();
    let text = message.content.filter(|content| !content.is_empty());
    if calls.is_empty() && text.is_none() {
        return Ok(None);
    }

    Ok(Some(StreamChunk {
        text,
        tool_calls: if calls.is_empty() {
            None
        } else {
            Some(convert_calls(calls, base_index))
        },
        ..Default::default()
    }))
}

/// Parse a non-streaming `/api/generate` body into its response text.
pub fn parse_generate_response(body: &str) -> Result<String> {
    let line: GenerateLine = serde_json::from_str(body)?;
    line.response.ok_or(Error::UnexpectedResponse)
}

/// Decode one `/api/generate` stream line into a text fragment.
///
/// Returns `None` for lines without a usable `response`; `done` is
/// reported through the returned line so the caller can stop reading.
pub(crate) fn decode_generate_line(payload: &str) -> Result<GenerateLine> {
    serde_json::from_str(payload).map_err(Error::from)
}
