//! No-op LLM provider for testing.
//!
//! Implements [`LLM`] but panics on `send` and `stream`. Intended for
//! unit tests that exercise registry and session logic without making
//! real LLM calls.

use crate::{Completion, Error, General, LLM, Message, StreamChunk};
use futures_core::Stream;

/// A no-op LLM provider that panics on any actual LLM call.
///
/// # Panics
///
/// Both `send` and `stream` panic if called. Only use this provider
/// in tests that never invoke LLM methods.
#[derive(Clone, Copy)]
pub struct NoopProvider;

impl LLM for NoopProvider {
    type ChatConfig = General;

    async fn send(&self, _config: &General, _messages: &[Message]) -> Result<Completion, Error> {
        panic!("NoopProvider::send called — not intended for real LLM calls");
    }

    fn stream(
        &self,
        _config: General,
        _messages: &[Message],
        _usage: bool,
    ) -> impl Stream<Item = Result<StreamChunk, Error>> + Send {
        async_stream::stream! {
            panic!("NoopProvider::stream called — not intended for real LLM calls");
            #[allow(unreachable_code)]
            {
                yield Ok(StreamChunk::default());
            }
        }
    }
}
