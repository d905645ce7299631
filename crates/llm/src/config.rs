//! Configuration for a chat.

use crate::{Tool, ToolChoice};
use serde::{Deserialize, Serialize};

/// LLM configuration.
///
/// Each provider defines its own request type implementing this trait;
/// [`General`] is the provider-agnostic form every request type can be
/// built from.
pub trait Config: From<General> + Sized + Clone {
    /// Create a new configuration with tools.
    fn with_tools(self, tools: Vec<Tool>) -> Self;

    /// Create a new configuration with tool choice.
    fn with_tool_choice(self, tool_choice: ToolChoice) -> Self;
}

/// Chat configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct General {
    /// The model to use.
    pub model: String,

    /// Maximum tokens to generate. Required by some providers; adapters
    /// fall back to their own default when unset.
    pub max_tokens: Option<usize>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// The tools to expose to the model.
    pub tools: Option<Vec<Tool>>,

    /// Tool choice control.
    pub tool_choice: Option<ToolChoice>,

    /// Whether to request usage information in stream mode.
    pub usage: bool,

    /// Context window limit override (in tokens).
    /// If `None`, the provider uses its default for the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_limit: Option<usize>,
}

impl General {
    /// Create a new configuration.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }
}

impl Default for General {
    fn default() -> Self {
        Self {
            model: "deepseek-chat".into(),
            max_tokens: None,
            temperature: None,
            tools: None,
            tool_choice: None,
            usage: false,
            context_limit: None,
        }
    }
}

impl Config for General {
    fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = Some(tools);
        self
    }

    fn with_tool_choice(mut self, tool_choice: ToolChoice) -> Self {
        self.tool_choice = Some(tool_choice);
        self
    }
}
