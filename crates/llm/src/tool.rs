//! Tool abstractions for the unified LLM interface.

use compact_str::CompactString;
use schemars::Schema;
use serde::{Deserialize, Serialize};

/// A tool the model may call.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tool {
    /// The name of the tool, unique within a registry.
    pub name: String,

    /// The description of the tool.
    pub description: String,

    /// JSON Schema for the tool parameters.
    pub parameters: Schema,

    /// Whether to strictly validate the parameters.
    pub strict: bool,
}

impl Tool {
    /// Create a new tool definition.
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Schema) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            strict: false,
        }
    }
}

/// A tool call made by the model.
///
/// Arguments are canonically a JSON string at this layer; providers whose
/// wire carries typed input serialize it during normalization, and the
/// registry performs the single decode step before invocation.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ToolCall {
    /// The ID of the tool call. Providers without call ids get a locally
    /// synthesized one.
    #[serde(default, skip_serializing_if = "CompactString::is_empty")]
    pub id: CompactString,

    /// The index of the tool call (used to merge streaming deltas).
    #[serde(default, skip_serializing)]
    pub index: u32,

    /// The type of tool (currently only "function").
    #[serde(default, rename = "type")]
    pub call_type: CompactString,

    /// The function to call.
    pub function: FunctionCall,
}

impl ToolCall {
    /// Merge a streaming delta into this call.
    ///
    /// Ids, types, and names replace when present; argument text is
    /// appended, since providers stream it piecewise.
    pub fn merge(&mut self, call: &Self) {
        if !call.id.is_empty() {
            self.id.clone_from(&call.id);
        }
        if !call.call_type.is_empty() {
            self.call_type.clone_from(&call.call_type);
        }
        if !call.function.name.is_empty() {
            self.function.name.clone_from(&call.function.name);
        }
        self.function.arguments.push_str(&call.function.arguments);
    }
}

/// A function call within a tool call.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct FunctionCall {
    /// The name of the function to call.
    #[serde(default, skip_serializing_if = "CompactString::is_empty")]
    pub name: CompactString,

    /// The arguments to pass to the function (JSON string).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub arguments: String,
}

/// Controls which tool is called by the model.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub enum ToolChoice {
    /// Model will not call any tool.
    None,

    /// Model can pick between generating a message or calling tools.
    #[default]
    Auto,

    /// Model must call one or more tools.
    Required,

    /// Model must call the named function.
    Function(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_appends_arguments() {
        let mut call = ToolCall {
            id: "call_1".into(),
            index: 0,
            call_type: "function".into(),
            function: FunctionCall {
                name: "echo".into(),
                arguments: "{\"text\":".into(),
            },
        };
        call.merge(&ToolCall {
            index: 0,
            function: FunctionCall {
                arguments: "\"hi\"}".into(),
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(call.function.arguments, "{\"text\":\"hi\"}");
        assert_eq!(call.function.name, "echo");
        assert_eq!(call.id, "call_1");
    }

    #[test]
    fn merge_fills_late_id_and_name() {
        let mut call = ToolCall::default();
        call.merge(&ToolCall {
            id: "call_9".into(),
            call_type: "function".into(),
            function: FunctionCall {
                name: "search".into(),
                arguments: "{}".into(),
            },
            ..Default::default()
        });
        assert_eq!(call.id, "call_9");
        assert_eq!(call.function.name, "search");
    }
}
