//! Provider abstractions for the unified LLM interface.

use crate::{Completion, Error, Message, StreamChunk};
use futures_core::Stream;

/// A trait for LLM providers.
///
/// `send` returns the normalized [`Completion`]; `stream` returns
/// normalized [`StreamChunk`]s. All provider-specific wire handling lives
/// behind these two methods.
pub trait LLM: Sized + Clone {
    /// The chat configuration (the provider's request type).
    type ChatConfig: crate::Config + Send + Sync;

    /// Send a conversation to the LLM.
    fn send(
        &self,
        config: &Self::ChatConfig,
        messages: &[Message],
    ) -> impl Future<Output = Result<Completion, Error>> + Send;

    /// Send a conversation to the LLM with streaming.
    ///
    /// `usage` asks the provider to report token usage on the final chunk,
    /// where supported.
    fn stream(
        &self,
        config: Self::ChatConfig,
        messages: &[Message],
        usage: bool,
    ) -> impl Stream<Item = Result<StreamChunk, Error>> + Send;
}
