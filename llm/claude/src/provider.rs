//! LLM trait implementation for the Claude provider.

use crate::{Claude, Request, stream::Event, wire};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::{StreamExt, pin_mut};
use llm::{Completion, Error, LLM, Message, SseDecoder, StreamChunk};

impl LLM for Claude {
    type ChatConfig = Request;

    async fn send(&self, config: &Request, messages: &[Message]) -> Result<Completion, Error> {
        let body = config.messages(messages);
        tracing::debug!(model = %body.model, messages = body.messages.len(), "messages request");
        let text = self.http().post_json(&body).await?;
        tracing::trace!(response = %text);
        wire::parse_response(&text)
    }

    fn stream(
        &self,
        config: Request,
        messages: &[Message],
        _usage: bool,
    ) -> impl Stream<Item = Result<StreamChunk, Error>> + Send {
        // Usage is always reported by this API (message_start/message_delta).
        let body = config.messages(messages).stream();
        let http = self.http().clone();

        try_stream! {
            tracing::debug!(model = %body.model, "messages stream");
            let bytes = http.post_stream(&body).await?;
            pin_mut!(bytes);

            let mut decoder = SseDecoder::new();
            while let Some(chunk) = bytes.next().await {
                for payload in decoder.feed(&chunk?) {
                    let event: Event = serde_json::from_str(&payload)
                        .map_err(|e| Error::Decode(e.to_string()))?;
                    if matches!(event, Event::MessageStop) {
                        return;
                    }
                    if let Some(chunk) = event.into_chunk() {
                        yield chunk;
                    }
                }
            }
        }
    }
}
