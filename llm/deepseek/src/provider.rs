//! LLM trait implementation for the DeepSeek provider.

use crate::{DeepSeek, Request};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::{StreamExt, pin_mut};
use llm::{Completion, Error, LLM, Message, SseDecoder, StreamChunk};
use openai::wire;

impl LLM for DeepSeek {
    type ChatConfig = Request;

    async fn send(&self, config: &Request, messages: &[Message]) -> Result<Completion, Error> {
        let body = config.messages(messages);
        tracing::debug!(model = %body.model, messages = body.messages.len(), "chat completion");
        let text = self.http().post_json(&body).await?;
        tracing::trace!(response = %text);
        wire::parse_response(&text)
    }

    fn stream(
        &self,
        config: Request,
        messages: &[Message],
        usage: bool,
    ) -> impl Stream<Item = Result<StreamChunk, Error>> + Send {
        let body = config.messages(messages).stream(usage);
        let http = self.http().clone();

        try_stream! {
            tracing::debug!(model = %body.model, "chat completion stream");
            let bytes = http.post_stream(&body).await?;
            pin_mut!(bytes);

            let mut decoder = SseDecoder::new();
            while let Some(chunk) = bytes.next().await {
                for payload in decoder.feed(&chunk?) {
                    if payload == "[DONE]" {
                        return;
                    }
                    yield wire::parse_stream_event(&payload)?;
                }
            }
        }
    }
}
