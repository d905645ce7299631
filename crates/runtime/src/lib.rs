//! Narwhal runtime: the chat orchestrator.
//!
//! [`Runtime`] owns a provider, a [`ToolRegistry`], and the tool-calling
//! loop: send a request, inspect the normalized completion, invoke any
//! requested tools, fold the results back into history, and re-send until
//! the model produces a final answer. The loop is iterative and bounded;
//! a misbehaving model that never stops requesting tools ends in
//! [`Error::ToolLoopExceeded`] instead of unbounded recursion.
//!
//! # Example
//!
//! ```rust,ignore
//! use runtime::{Chat, Provider, Runtime};
//! use llm::{Client, General, Message};
//!
//! let provider = Provider::new("deepseek-chat", Client::new(), &key)?;
//! let mut runtime = Runtime::new(General::default(), provider);
//! runtime.register(weather_tool(), |args| async move { .. });
//! let mut chat = Chat::with_system("You are helpful.");
//! let answer = runtime.send(&mut chat, Message::user("hello")).await?;
//! ```

pub use chat::{Chat, Reply, UsageAccumulator};
pub use provider::Provider;
pub use registry::{Handler, ToolRegistry};

use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{
    Error, FinishReason, General, LLM, Message, MessageBuilder, Result, Role, Tool, order_for_wire,
};
use serde_json::Value;

mod chat;
mod provider;
mod registry;

/// Default bound on tool-calling rounds per turn.
const MAX_TOOL_ROUNDS: usize = 16;

/// The chat orchestrator.
///
/// Generic over the provider so tests can script one; [`Provider`] is the
/// batteries-included default covering all four back ends.
pub struct Runtime<P: LLM = Provider> {
    provider: P,
    config: General,
    tools: ToolRegistry,
    max_rounds: usize,
}

impl<P: LLM> Runtime<P> {
    /// Create a new runtime with the given config and provider.
    pub fn new(config: General, provider: P) -> Self {
        Self {
            provider,
            config,
            tools: ToolRegistry::new(),
            max_rounds: MAX_TOOL_ROUNDS,
        }
    }

    /// Override the tool-loop round bound.
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Register a tool with its handler.
    pub fn register<F, Fut>(&mut self, tool: Tool, handler: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, String>> + Send + 'static,
    {
        self.tools.register(tool, handler);
    }

    /// The tool registry.
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// The runtime configuration.
    pub fn config(&self) -> &General {
        &self.config
    }

    /// Build the message list for an API request: session system prompt
    /// first (when the history does not already carry one), then history
    /// in wire order.
    fn api_messages(&self, chat: &Chat) -> Vec<Message> {
        let mut messages = chat.messages.clone();
        if let Some(system) = chat.system() {
            if messages.first().map(|m| m.role) != Some(Role::System) {
                messages.insert(0, Message::system(system));
            }
        }
        order_for_wire(&messages)
    }

    /// Build the provider request config, exposing registered tools.
    fn build_config(&self) -> P::ChatConfig {
        let mut general = self.config.clone();
        let tools = self.tools.schemas();
        if !tools.is_empty() && general.tools.is_none() {
            general.tools = Some(tools);
        }
        P::ChatConfig::from(general)
    }

    /// One-shot: run a prompt through a fresh session and return the
    /// final text.
    pub async fn prompt(&self, text: &str) -> Result<String> {
        let mut chat = Chat::new();
        self.send(&mut chat, Message::user(text)).await
    }

    /// Send a message through a session, running the tool loop to
    /// completion, and return the final text.
    pub async fn send(&self, chat: &mut Chat, message: Message) -> Result<String> {
        chat.messages.push(message);
        self.resume(chat).await
    }

    /// Run the tool loop from the session's current history.
    async fn resume(&self, chat: &mut Chat) -> Result<String> {
        for round in 0..self.max_rounds {
            let messages = self.api_messages(chat);
            let cfg = self.build_config();
            let completion = self.provider.send(&cfg, &messages).await?;
            if let Some(usage) = &completion.usage {
                chat.usage.add(usage);
            }

            let text = completion.text();
            if !completion.wants_tools() {
                chat.messages.push(Message::assistant(&text, None));
                return Ok(text);
            }

            tracing::debug!(round, calls = completion.tool_calls.len(), "dispatching tools");
            let results = self.tools.dispatch(&completion.tool_calls).await?;
            if results.is_empty() {
                // Nothing usable to report back; answer with what we have.
                // The tool request is not kept in history, since a request
                // without results is not a valid conversation state.
                chat.messages.push(Message::assistant(&text, None));
                return Ok(text);
            }
            chat.messages
                .push(Message::assistant(&text, Some(&completion.tool_calls)));
            chat.messages.extend(results);
        }

        Err(Error::ToolLoopExceeded(self.max_rounds))
    }

    /// Send a message but stop before invoking tools: the model's pending
    /// calls are returned to the caller instead of being executed.
    pub async fn send_deferred(&self, chat: &mut Chat, message: Message) -> Result<Reply> {
        chat.messages.push(message);
        let messages = self.api_messages(chat);
        let cfg = self.build_config();
        let completion = self.provider.send(&cfg, &messages).await?;
        if let Some(usage) = &completion.usage {
            chat.usage.add(usage);
        }

        let text = completion.text();
        if completion.wants_tools() {
            chat.messages
                .push(Message::assistant(&text, Some(&completion.tool_calls)));
            return Ok(Reply::ToolCalls(completion.tool_calls));
        }

        chat.messages.push(Message::assistant(&text, None));
        Ok(Reply::Text(text))
    }

    /// Stream a message through a session, yielding text fragments.
    ///
    /// When the stream ends with a completed tool request, the runtime
    /// switches modes: it invokes the tools, extends history, runs one
    /// full non-streaming turn (which may itself loop through further tool
    /// rounds), and yields that turn's final text as the terminal
    /// fragment. Pulling that fragment therefore takes as long as a full
    /// tool round trip. Dropping the stream is the only cancellation
    /// point; an in-flight tool invocation is never interrupted.
    pub fn stream<'a>(
        &'a self,
        chat: &'a mut Chat,
        message: Message,
    ) -> impl Stream<Item = Result<String>> + 'a {
        try_stream! {
            chat.messages.push(message);
            let messages = self.api_messages(chat);
            let cfg = self.build_config();

            let mut builder = MessageBuilder::new(Role::Assistant);
            let mut finish = None;
            {
                let inner = self.provider.stream(cfg, &messages, self.config.usage);
                futures_util::pin_mut!(inner);
                while let Some(result) = inner.next().await {
                    let chunk = result?;
                    if let Some(usage) = &chunk.usage {
                        chat.usage.add(usage);
                    }

                    let reason = chunk.reason();
                    if builder.accept(&chunk) {
                        if let Some(text) = chunk.content() {
                            yield text.to_owned();
                        }
                    }
                    if let Some(reason) = reason {
                        finish = Some(reason);
                        break;
                    }
                }
            }

            let mut assistant = builder.build();
            if finish == Some(FinishReason::ToolCalls) && !assistant.tool_calls.is_empty() {
                let calls: Vec<_> = assistant.tool_calls.to_vec();
                let results = self.tools.dispatch(&calls).await?;
                if results.is_empty() {
                    assistant.tool_calls.clear();
                    chat.messages.push(assistant);
                    return;
                }
                chat.messages.push(assistant);
                chat.messages.extend(results);
                // Mode switch: one synchronous turn answers for the rest
                // of the stream.
                let text = self.resume(chat).await?;
                yield text;
            } else {
                chat.messages.push(assistant);
            }
        }
    }
}
