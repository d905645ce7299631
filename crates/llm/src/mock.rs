//! Scripted LLM provider for orchestration tests.
//!
//! Unlike [`NoopProvider`](crate::NoopProvider), this provider answers:
//! queued completions feed `send`, queued chunk scripts feed `stream`, and
//! every request's message list is captured for later inspection. Clones
//! share state, so a test can keep a handle while the runtime owns another.

use crate::{Completion, Error, General, LLM, Message, StreamChunk};
use futures_core::Stream;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A scripted LLM provider.
#[derive(Clone, Default)]
pub struct MockProvider {
    completions: Arc<Mutex<VecDeque<Completion>>>,
    scripts: Arc<Mutex<VecDeque<Vec<StreamChunk>>>>,
    requests: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockProvider {
    /// Create an empty mock provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a completion for the next `send` call.
    pub fn push_completion(&self, completion: Completion) {
        self.completions.lock().unwrap().push_back(completion);
    }

    /// Queue a chunk script for the next `stream` call.
    pub fn push_stream(&self, chunks: Vec<StreamChunk>) {
        self.scripts.lock().unwrap().push_back(chunks);
    }

    /// The message lists of every request received so far.
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }

    /// How many requests (send or stream) were received.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl LLM for MockProvider {
    type ChatConfig = General;

    async fn send(&self, _config: &General, messages: &[Message]) -> Result<Completion, Error> {
        self.requests.lock().unwrap().push(messages.to_vec());
        self.completions
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Transport {
                status: None,
                body: "mock provider has no queued completion".into(),
            })
    }

    fn stream(
        &self,
        _config: General,
        messages: &[Message],
        _usage: bool,
    ) -> impl Stream<Item = Result<StreamChunk, Error>> + Send {
        self.requests.lock().unwrap().push(messages.to_vec());
        let chunks = self.scripts.lock().unwrap().pop_front();

        async_stream::try_stream! {
            let chunks = chunks.ok_or_else(|| Error::Transport {
                status: None,
                body: "mock provider has no queued stream".into(),
            })?;
            for chunk in chunks {
                yield chunk;
            }
        }
    }
}
