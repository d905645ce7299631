//! Chat sessions and usage accounting.

use llm::{Message, ToolCall, Usage};

/// A chat session: caller-owned history plus accumulated usage.
///
/// There is no server-side session state; the full history is re-supplied
/// on every request.
#[derive(Debug, Clone, Default)]
pub struct Chat {
    /// Conversation messages.
    pub messages: Vec<Message>,

    /// Token usage accumulated across every request of this session.
    pub usage: UsageAccumulator,

    /// Optional session system prompt, inserted first at request time when
    /// the history does not already lead with one.
    system: Option<String>,
}

impl Chat {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with a system prompt.
    pub fn with_system(system: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            ..Self::default()
        }
    }

    /// Set or replace the session system prompt.
    pub fn set_system_message(&mut self, system: impl Into<String>) {
        self.system = Some(system.into());
    }

    /// The session system prompt, if set.
    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }
}

/// Token usage accumulated across the requests of one session.
///
/// Owned by the session, never global: concurrent sessions each keep their
/// own counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageAccumulator {
    /// Prompt tokens across all requests.
    pub prompt_tokens: u64,
    /// Completion tokens across all requests.
    pub completion_tokens: u64,
    /// Total tokens across all requests.
    pub total_tokens: u64,
}

impl UsageAccumulator {
    /// Fold one response's usage into the running totals. Absent counts
    /// contribute nothing.
    pub fn add(&mut self, usage: &Usage) {
        self.prompt_tokens += u64::from(usage.prompt_tokens.unwrap_or(0));
        self.completion_tokens += u64::from(usage.completion_tokens.unwrap_or(0));
        self.total_tokens += u64::from(usage.total_tokens.unwrap_or(0));
    }
}

/// The outcome of a deferred turn: either final text, or the tool calls
/// the model wants executed, returned to the caller uninvoked.
#[derive(Debug, Clone)]
pub enum Reply {
    /// The model produced a final answer.
    Text(String),
    /// The model requested tool execution; the caller runs the calls.
    ToolCalls(Vec<ToolCall>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulator_sums_partial_usage() {
        let mut acc = UsageAccumulator::default();
        acc.add(&Usage {
            prompt_tokens: Some(10),
            completion_tokens: None,
            total_tokens: None,
        });
        acc.add(&Usage {
            prompt_tokens: None,
            completion_tokens: Some(5),
            total_tokens: Some(5),
        });
        assert_eq!(acc.prompt_tokens, 10);
        assert_eq!(acc.completion_tokens, 5);
        assert_eq!(acc.total_tokens, 5);
    }

    #[test]
    fn system_prompt_is_settable() {
        let mut chat = Chat::new();
        assert!(chat.system().is_none());
        chat.set_system_message("be brief");
        assert_eq!(chat.system(), Some("be brief"));
    }
}
