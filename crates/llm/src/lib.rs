//! Unified LLM interface types and traits.
//!
//! This crate provides the shared types used across all LLM providers:
//! [`Message`], [`Completion`], [`StreamChunk`], [`Tool`], [`Config`], and
//! the [`LLM`] trait. Every provider maps its wire format into exactly these
//! types; the orchestration layer never sees provider-specific JSON.
//!
//! With the `http` feature (default) it also provides [`HttpProvider`], the
//! shared HTTP transport helper, plus the incremental [`SseDecoder`] and
//! [`NdjsonDecoder`] frame decoders used by the streaming paths.

pub use completion::{Completion, FinishReason, Usage};
pub use config::{Config, General};
pub use error::{Error, Result};
#[cfg(feature = "http")]
pub use http::HttpProvider;
pub use message::{Message, MessageBuilder, Role, order_for_wire};
#[cfg(feature = "test-utils")]
pub use mock::MockProvider;
pub use noop::NoopProvider;
pub use provider::LLM;
#[cfg(feature = "http")]
pub use reqwest::{self, Client};
pub use stream::{NdjsonDecoder, SseDecoder, StreamChunk};
pub use tool::{FunctionCall, Tool, ToolCall, ToolChoice};

mod completion;
mod config;
mod error;
#[cfg(feature = "http")]
mod http;
mod message;
#[cfg(feature = "test-utils")]
mod mock;
mod noop;
mod provider;
mod stream;
mod tool;
