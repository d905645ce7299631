//! LLM trait implementation for the Ollama provider.

use crate::{Ollama, Request, wire};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::{StreamExt, pin_mut};
use llm::{Completion, Error, LLM, Message, NdjsonDecoder, StreamChunk};

impl LLM for Ollama {
    type ChatConfig = Request;

    async fn send(&self, config: &Request, messages: &[Message]) -> Result<Completion, Error> {
        let body = config.messages(messages);
        tracing::debug!(model = %body.model, messages = body.messages.len(), "chat request");
        let text = self.chat_http().post_json(&body).await?;
        tracing::trace!(response = %text);
        wire::parse_chat_response(&text)
    }

    // The native API has no usage opt-in; counts ride on the final line.
    fn stream(
        &self,
        config: Request,
        messages: &[Message],
        _usage: bool,
    ) -> impl Stream<Item = Result<StreamChunk, Error>> + Send {
        let body = config.messages(messages).stream();
        let http = self.chat_http().clone();

        try_stream! {
            tracing::debug!(model = %body.model, "chat stream");
            let bytes = http.post_stream(&body).await?;
            pin_mut!(bytes);

            let mut decoder = NdjsonDecoder::new();
            let mut next_index = 0u32;
            while let Some(chunk) = bytes.next().await {
                for line in decoder.feed(&chunk?) {
                    let Some(decoded) = wire::decode_chat_line(&line, next_index)? else {
                        continue;
                    };
                    if let Some(calls) = decoded.calls() {
                        next_index += calls.len() as u32;
                    }
                    let done = decoded.reason().is_some();
                    yield decoded;
                    if done {
                        return;
                    }
                }
            }
            if let Some(line) = decoder.flush() {
                if let Some(decoded) = wire::decode_chat_line(&line, next_index)? {
                    yield decoded;
                }
            }
        }
    }
}
