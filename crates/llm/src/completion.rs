//! Normalized chat completion for the unified LLM interface.
//!
//! [`Completion`] is the single normalization point: every provider's
//! non-streaming response shape is mapped into exactly this struct before
//! the orchestration loop acts on it.

use crate::ToolCall;
use serde::{Deserialize, Serialize};

/// A normalized chat completion.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    /// Ordered text fragments. Most providers produce at most one; block
    /// oriented providers produce one per text block.
    pub fragments: Vec<String>,

    /// Ordered tool calls requested by the model, possibly empty.
    pub tool_calls: Vec<ToolCall>,

    /// The reason the model stopped generating.
    pub finish: FinishReason,

    /// Token usage statistics, when the provider reports them.
    pub usage: Option<Usage>,
}

impl Completion {
    /// The completion text: fragments joined with a newline when more than
    /// one is present.
    pub fn text(&self) -> String {
        self.fragments.join("\n")
    }

    /// Whether the model is asking for tool execution.
    pub fn wants_tools(&self) -> bool {
        self.finish == FinishReason::ToolCalls && !self.tool_calls.is_empty()
    }
}

/// The reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The model finished naturally.
    #[default]
    Stop,

    /// The model hit the max token limit.
    Length,

    /// The model is making tool calls.
    ToolCalls,

    /// Any other provider-specific reason.
    #[serde(other)]
    Other,
}

/// Token usage statistics. Not every provider reports every count.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct Usage {
    /// Number of tokens in the prompt.
    pub prompt_tokens: Option<u32>,

    /// Number of tokens in the completion.
    pub completion_tokens: Option<u32>,

    /// Total number of tokens used.
    pub total_tokens: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_joins_fragments_with_newline() {
        let completion = Completion {
            fragments: vec!["first".into(), "second".into()],
            ..Default::default()
        };
        assert_eq!(completion.text(), "first\nsecond");
    }

    #[test]
    fn single_fragment_has_no_separator() {
        let completion = Completion {
            fragments: vec!["only".into()],
            ..Default::default()
        };
        assert_eq!(completion.text(), "only");
    }

    #[test]
    fn wants_tools_requires_both_signals() {
        let mut completion = Completion {
            finish: FinishReason::ToolCalls,
            ..Default::default()
        };
        assert!(!completion.wants_tools());

        completion.tool_calls.push(crate::ToolCall::default());
        assert!(completion.wants_tools());

        completion.finish = FinishReason::Stop;
        assert!(!completion.wants_tools());
    }
}
