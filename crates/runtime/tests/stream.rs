//! Streaming tests: incremental fragments, skip rules, and the mode
//! switch into a synchronous tool turn.

use futures_util::StreamExt;
use llm::{
    Completion, FinishReason, FunctionCall, General, Message, MockProvider, Role, StreamChunk,
    Tool, ToolCall, Usage,
};
use narwhal_runtime::{Chat, Runtime};
use serde_json::Value;

fn weather_tool() -> Tool {
    Tool::new(
        "weather",
        "Current weather for a city",
        schemars::schema_for!(String),
    )
}

fn tool_call_chunk() -> StreamChunk {
    StreamChunk::tool_calls(vec![ToolCall {
        id: "call_1".into(),
        index: 0,
        call_type: "function".into(),
        function: FunctionCall {
            name: "weather".into(),
            arguments: r#"{"city":"Paris"}"#.into(),
        },
    }])
}

async fn collect(stream: impl futures_core::Stream<Item = llm::Result<String>>) -> Vec<String> {
    futures_util::pin_mut!(stream);
    let mut fragments = Vec::new();
    while let Some(item) = stream.next().await {
        fragments.push(item.unwrap());
    }
    fragments
}

#[tokio::test]
async fn plain_stream_yields_fragments_in_order() {
    let provider = MockProvider::new();
    provider.push_stream(vec![
        StreamChunk::text("Hel"),
        StreamChunk::text("lo"),
        StreamChunk::finish(FinishReason::Stop),
    ]);

    let runtime = Runtime::new(General::default(), provider);
    let mut chat = Chat::new();
    let fragments = collect(runtime.stream(&mut chat, Message::user("hi"))).await;

    assert_eq!(fragments, vec!["Hel", "lo"]);
    // The accumulated assistant message landed in history.
    assert_eq!(chat.messages[1].role, Role::Assistant);
    assert_eq!(chat.messages[1].content, "Hello");
}

#[tokio::test]
async fn empty_chunks_do_not_become_fragments() {
    let provider = MockProvider::new();
    provider.push_stream(vec![
        StreamChunk::text(""),
        StreamChunk::default(),
        StreamChunk::text("hi"),
        StreamChunk::finish(FinishReason::Stop),
    ]);

    let runtime = Runtime::new(General::default(), provider);
    let mut chat = Chat::new();
    let fragments = collect(runtime.stream(&mut chat, Message::user("hi"))).await;

    assert_eq!(fragments, vec!["hi"]);
}

#[tokio::test]
async fn tool_round_splices_final_text_into_the_stream() {
    let provider = MockProvider::new();
    provider.push_stream(vec![
        StreamChunk::text("Hel"),
        StreamChunk::text("lo"),
        tool_call_chunk(),
        StreamChunk::finish(FinishReason::ToolCalls),
    ]);
    // The synchronous continuation turn.
    provider.push_completion(Completion {
        fragments: vec!["done".into()],
        finish: FinishReason::Stop,
        ..Default::default()
    });

    let mut runtime = Runtime::new(General::default(), provider.clone());
    runtime.register(weather_tool(), |_| async move {
        Ok(Value::String("sunny".into()))
    });

    let mut chat = Chat::new();
    let fragments = collect(runtime.stream(&mut chat, Message::user("weather?"))).await;

    assert_eq!(fragments, vec!["Hel", "lo", "done"]);

    // The continuation request saw the tool round in history.
    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    let second = &requests[1];
    assert_eq!(second[1].role, Role::Assistant);
    assert_eq!(second[1].tool_calls[0].id, "call_1");
    assert_eq!(second[2].role, Role::Tool);
    assert_eq!(second[2].content, "sunny");
}

#[tokio::test]
async fn streamed_tool_arguments_accumulate_before_dispatch() {
    let provider = MockProvider::new();
    provider.push_stream(vec![
        StreamChunk::tool_calls(vec![ToolCall {
            id: "call_1".into(),
            index: 0,
            call_type: "function".into(),
            function: FunctionCall {
                name: "weather".into(),
                arguments: "{\"city\":".into(),
            },
        }]),
        StreamChunk::tool_calls(vec![ToolCall {
            index: 0,
            function: FunctionCall {
                arguments: "\"Paris\"}".into(),
                ..Default::default()
            },
            ..Default::default()
        }]),
        StreamChunk::finish(FinishReason::ToolCalls),
    ]);
    provider.push_completion(Completion {
        fragments: vec!["21C in Paris".into()],
        finish: FinishReason::Stop,
        ..Default::default()
    });

    let mut runtime = Runtime::new(General::default(), provider.clone());
    runtime.register(weather_tool(), |args| async move {
        assert_eq!(args["city"], "Paris");
        Ok(Value::String("21C".into()))
    });

    let mut chat = Chat::new();
    let fragments = collect(runtime.stream(&mut chat, Message::user("weather?"))).await;
    assert_eq!(fragments, vec!["21C in Paris"]);
}

#[tokio::test]
async fn unknown_tool_in_stream_surfaces_the_error() {
    let provider = MockProvider::new();
    provider.push_stream(vec![
        StreamChunk::tool_calls(vec![ToolCall {
            id: "call_1".into(),
            index: 0,
            call_type: "function".into(),
            function: FunctionCall {
                name: "doesNotExist".into(),
                arguments: "{}".into(),
            },
        }]),
        StreamChunk::finish(FinishReason::ToolCalls),
    ]);

    let runtime = Runtime::new(General::default(), provider.clone());
    let mut chat = Chat::new();
    let stream = runtime.stream(&mut chat, Message::user("hi"));
    futures_util::pin_mut!(stream);

    let mut saw_error = false;
    while let Some(item) = stream.next().await {
        if item.is_err() {
            saw_error = true;
        }
    }
    assert!(saw_error);
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn stream_usage_accumulates_into_the_session() {
    let provider = MockProvider::new();
    provider.push_stream(vec![
        StreamChunk::text("hi"),
        StreamChunk {
            finish: Some(FinishReason::Stop),
            usage: Some(Usage {
                prompt_tokens: Some(4),
                completion_tokens: Some(2),
                total_tokens: Some(6),
            }),
            ..Default::default()
        },
    ]);

    let runtime = Runtime::new(General::default(), provider);
    let mut chat = Chat::new();
    collect(runtime.stream(&mut chat, Message::user("hi"))).await;

    assert_eq!(chat.usage.total_tokens, 6);
}
