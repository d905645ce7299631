//! Tool registry and invoker.
//!
//! Holds declared tools with their bound handlers, resolves model-requested
//! names, and executes calls. A handler is arbitrary caller-supplied code;
//! the registry performs no sandboxing; that is a caller responsibility.

use compact_str::CompactString;
use llm::{Error, Message, Result, Tool, ToolCall};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::pin::Pin;
use std::sync::Arc;

/// A type-erased async tool handler.
///
/// Receives the decoded argument object and returns a serializable value,
/// or an error string that is reported back to the model.
pub type Handler = Arc<
    dyn Fn(Value) -> Pin<Box<dyn Future<Output = Result<Value, String>> + Send>> + Send + Sync,
>;

/// A registry of callable tools.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<CompactString, (Tool, Handler)>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool with its handler. A second registration under the
    /// same name replaces the first.
    pub fn register<F, Fut>(&mut self, tool: Tool, handler: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, String>> + Send + 'static,
    {
        let name = CompactString::from(tool.name.as_str());
        let handler: Handler = Arc::new(move |args| Box::pin(handler(args)));
        self.tools.insert(name, (tool, handler));
    }

    /// Resolve a tool by name.
    pub fn resolve(&self, name: &str) -> Result<&Tool> {
        self.tools
            .get(name)
            .map(|(tool, _)| tool)
            .ok_or_else(|| Error::ToolNotFound(name.to_owned()))
    }

    /// Schemas of every registered tool, in name order.
    pub fn schemas(&self) -> Vec<Tool> {
        self.tools.values().map(|(tool, _)| tool.clone()).collect()
    }

    /// Whether no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute tool calls in order and collect tool-result messages.
    ///
    /// A call naming an unregistered tool aborts with
    /// [`Error::ToolNotFound`]. Handler failures and undecodable arguments
    /// become error-text tool messages so the model can self-correct.
    /// Results that decode to JSON `null` produce no message.
    pub async fn dispatch(&self, calls: &[ToolCall]) -> Result<Vec<Message>> {
        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            let name = call.function.name.as_str();
            let (_, handler) = self
                .tools
                .get(name)
                .ok_or_else(|| Error::ToolNotFound(name.to_owned()))?;

            let outcome = match decode_arguments(name, &call.function.arguments) {
                Ok(arguments) => handler(arguments).await,
                Err(Error::MalformedArguments { reason, .. }) => {
                    Err(format!("malformed arguments: {reason}"))
                }
                Err(e) => return Err(e),
            };

            match outcome {
                Ok(Value::Null) => {
                    tracing::debug!(tool = name, "tool returned no usable result");
                }
                Ok(Value::String(text)) => results.push(Message::tool(text, call.id.clone())),
                Ok(value) => results.push(Message::tool(value.to_string(), call.id.clone())),
                Err(error) => {
                    tracing::warn!(tool = name, %error, "tool invocation failed");
                    results.push(Message::tool(format!("error: {error}"), call.id.clone()));
                }
            }
        }
        Ok(results)
    }
}

/// Decode a raw argument string into the object a handler expects.
///
/// An empty string means "no arguments"; anything else must be valid JSON.
fn decode_arguments(tool: &str, raw: &str) -> Result<Value> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(raw).map_err(|e| Error::MalformedArguments {
        tool: tool.to_owned(),
        reason: e.to_string(),
    })
}
