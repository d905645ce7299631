//! Tests for the OpenAI-compatible request type.

use llm::{Config, General, Message, ToolChoice};
use narwhal_openai::Request;

fn tool() -> llm::Tool {
    llm::Tool::new("search", "find docs", schemars::schema_for!(String))
}

#[test]
fn request_from_general_sets_model() {
    let general = General {
        model: "gpt-4o".into(),
        ..General::default()
    };
    let req = Request::from(general);
    assert_eq!(req.model, "gpt-4o");
}

#[test]
fn request_from_general_carries_sampling_options() {
    let general = General {
        model: "gpt-4o".into(),
        max_tokens: Some(256),
        temperature: Some(0.2),
        ..General::default()
    };
    let req = Request::from(general);
    assert_eq!(req.max_tokens, Some(256));
    assert_eq!(req.temperature, Some(0.2));
}

#[test]
fn request_from_general_with_tools() {
    let general = General {
        model: "gpt-4o".into(),
        tools: Some(vec![tool()]),
        ..General::default()
    };
    let req = Request::from(general);
    let tools = req.tools.expect("tools");
    assert_eq!(tools[0]["type"], "function");
    assert_eq!(tools[0]["function"]["name"], "search");
}

#[test]
fn request_with_tool_choice_auto() {
    let req = Request::from(General::default()).with_tool_choice(ToolChoice::Auto);
    assert_eq!(
        req.tool_choice.expect("tool_choice"),
        serde_json::json!("auto")
    );
}

#[test]
fn request_with_tool_choice_none() {
    let req = Request::from(General::default()).with_tool_choice(ToolChoice::None);
    assert_eq!(
        req.tool_choice.expect("tool_choice"),
        serde_json::json!("none")
    );
}

#[test]
fn request_with_tool_choice_function() {
    let req =
        Request::from(General::default()).with_tool_choice(ToolChoice::Function("search".into()));
    let choice = req.tool_choice.expect("tool_choice");
    assert_eq!(choice["type"], "function");
    assert_eq!(choice["function"]["name"], "search");
}

#[test]
fn request_stream_sets_include_usage() {
    let req = Request::from(General::default()).stream(true);
    assert_eq!(req.stream, Some(true));
    let opts = req.stream_options.expect("stream_options");
    assert_eq!(opts["include_usage"], true);
}

#[test]
fn request_stream_without_usage_omits_stream_options() {
    let req = Request::from(General::default()).stream(false);
    assert_eq!(req.stream, Some(true));
    assert!(req.stream_options.is_none());
}

#[test]
fn messages_place_system_first() {
    let history = vec![
        Message::user("hello"),
        Message::system("be brief"),
    ];
    let req = Request::from(General::default()).messages(&history);
    assert_eq!(req.messages[0].role, llm::Role::System);
    assert_eq!(req.messages[1].content, "hello");
}

#[test]
fn serialized_tool_message_carries_call_id() {
    let history = vec![Message::tool("42", "call_1")];
    let req = Request::from(General::default()).messages(&history);
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["messages"][0]["role"], "tool");
    assert_eq!(json["messages"][0]["tool_call_id"], "call_1");
}
