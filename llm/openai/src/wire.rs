//! OpenAI chat completions wire format and its normalization.
//!
//! Shared by every OpenAI-compatible provider: the non-streaming body maps
//! into [`Completion`], each SSE payload into a [`StreamChunk`]. Streamed
//! tool calls arrive as partial deltas keyed by index; they are only
//! complete once a terminal finish reason appears, which is the caller's
//! accumulation job ([`llm::MessageBuilder`]).

use llm::{Completion, Error, FinishReason, Result, StreamChunk, ToolCall, Usage};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: WireMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
struct StreamEvent {
    #[serde(default)]
    choices: Vec<DeltaChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct DeltaChoice {
    #[serde(default)]
    delta: Delta,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: Option<u32>,
    #[serde(default)]
    completion_tokens: Option<u32>,
    #[serde(default)]
    total_tokens: Option<u32>,
}

impl From<WireUsage> for Usage {
    fn from(usage: WireUsage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

/// Map an OpenAI finish reason string to the normalized enum.
pub fn parse_finish(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        // Legacy deployments still report `function_call`.
        "tool_calls" | "function_call" => FinishReason::ToolCalls,
        "length" => FinishReason::Length,
        _ => FinishReason::Other,
    }
}

/// Parse a non-streaming response body into a [`Completion`].
pub fn parse_response(body: &str) -> Result<Completion> {
    let response: ChatResponse = serde_json::from_str(body)?;
    let choice = response.choices.into_iter().next().ok_or(Error::UnexpectedResponse)?;

    let tool_calls = choice.message.tool_calls.unwrap_or_default();
    if choice.message.content.is_none() && tool_calls.is_empty() {
        return Err(Error::UnexpectedResponse);
    }

    let fragments = choice
        .message
        .content
        .filter(|content| !content.is_empty())
        .map(|content| vec![content])
        .unwrap_or_default();

    let finish = match choice.finish_reason.as_deref() {
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

/// Parse one SSE `data:` payload into a [`StreamChunk`].
pub fn parse_stream_event(payload: &str) -> Result<StreamChunk> {
    let event: StreamEvent = serde_json::from_str(payload)?;
    let usage = event.usage.map(Usage::from);
    let Some(choice) = event.choices.into_iter().next() else {
        // Usage-only frame (stream_options.include_usage).
        return Ok(StreamChunk {
            usage,
            ..Default::default()
        });
    };

    Ok(StreamChunk {
        text: choice.delta.content,
        tool_calls: choice.delta.tool_calls,
        finish: choice.finish_reason.as_deref().map(parse_finish),
        usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm::{MessageBuilder, Role};

    #[test]
    fn parse_response_with_text() {
        let body = r#"{
            "choices": [{"message": {"content": "hello"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
        }"#;
        let completion = parse_response(body).unwrap();
        assert_eq!(completion.text(), "hello");
        assert_eq!(completion.finish, FinishReason::Stop);
        assert!(!completion.wants_tools());
        let usage = completion.usage.unwrap();
        assert_eq!(usage.total_tokens, Some(12));
    }

    #[test]
    fn parse_response_with_tool_calls() {
        let body = r#"{
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "weather", "arguments": "{\"city\":\"Paris\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        }"#;
        let completion = parse_response(body).unwrap();
        assert!(completion.wants_tools());
        assert_eq!(completion.tool_calls.len(), 1);
        assert_eq!(completion.tool_calls[0].id, "call_1");
        assert_eq!(completion.tool_calls[0].function.name, "weather");
        assert!(completion.fragments.is_empty());
    }

    #[test]
    fn legacy_function_call_reason_wants_tools() {
        let body = r#"{
            "choices": [{
                "message": {
                    "tool_calls": [{"id": "c", "function": {"name": "f", "arguments": "{}"}}]
                },
                "finish_reason": "function_call"
            }]
        }"#;
        let completion = parse_response(body).unwrap();
        assert!(completion.wants_tools());
    }

    #[test]
    fn parse_response_without_text_or_tools_is_rejected() {
        let body = r#"{"choices": [{"message": {"content": null}, "finish_reason": "stop"}]}"#;
        assert!(matches!(
            parse_response(body),
            Err(Error::UnexpectedResponse)
        ));
    }

    #[test]
    fn parse_response_without_choices_is_rejected() {
        assert!(matches!(
            parse_response(r#"{"choices": []}"#),
            Err(Error::UnexpectedResponse)
        ));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        assert!(matches!(parse_response("not json"), Err(Error::Decode(_))));
    }

    #[test]
    fn parse_stream_event_text_delta() {
        let chunk = parse_stream_event(r#"{"choices":[{"delta":{"content":"Hel"}}]}"#).unwrap();
        assert_eq!(chunk.content(), Some("Hel"));
        assert!(chunk.reason().is_none());
    }

    #[test]
    fn parse_stream_event_finish() {
        let chunk =
            parse_stream_event(r#"{"choices":[{"delta":{},"finish_reason":"tool_calls"}]}"#)
                .unwrap();
        assert_eq!(chunk.reason(), Some(FinishReason::ToolCalls));
    }

    #[test]
    fn parse_stream_event_usage_only_frame() {
        let chunk = parse_stream_event(
            r#"{"choices":[],"usage":{"prompt_tokens":1,"completion_tokens":2,"total_tokens":3}}"#,
        )
        .unwrap();
        assert!(chunk.content().is_none());
        assert_eq!(chunk.usage.unwrap().total_tokens, Some(3));
    }

    #[test]
    fn streamed_tool_call_deltas_accumulate_by_index() {
        let events = [
            r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"id":"call_1","type":"function","function":{"name":"weather","arguments":""}}]}}]}"#,
            r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"function":{"arguments":"{\"city\":"}}]}}]}"#,
            r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"function":{"arguments":"\"Paris\"}"}}]}}]}"#,
            r#"{"choices":[{"delta":{},"finish_reason":"tool_calls"}]}"#,
        ];

        let mut builder = MessageBuilder::new(Role::Assistant);
        let mut finish = None;
        for event in events {
            let chunk = parse_stream_event(event).unwrap();
            builder.accept(&chunk);
            if let Some(reason) = chunk.reason() {
                finish = Some(reason);
            }
        }

        assert_eq!(finish, Some(FinishReason::ToolCalls));
        let message = builder.build();
        assert_eq!(message.tool_calls.len(), 1);
        assert_eq!(message.tool_calls[0].id, "call_1");
        assert_eq!(message.tool_calls[0].function.name, "weather");
        assert_eq!(
            message.tool_calls[0].function.arguments,
            "{\"city\":\"Paris\"}"
        );
    }
}
