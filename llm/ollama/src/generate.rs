//! The `/api/generate` completion endpoint.
//!
//! Bare prompt-to-text completions, separate from the chat path: no
//! history, no tools, optional top-level system prompt and JSON format
//! constraint.

use crate::{GenerateRequest, Ollama, wire};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::{StreamExt, pin_mut};
use llm::{Error, NdjsonDecoder, Result};

impl Ollama {
    /// Run a completion and return its full response text.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<String> {
        tracing::debug!(model = %request.model, "generate request");
        let text = self.generate_http().post_json(request).await?;
        wire::parse_generate_response(&text)
    }

    /// Run a streaming completion, yielding response fragments.
    ///
    /// Lines without a usable `response` are skipped; a line with
    /// `done=true` ends the sequence without emitting a fragment.
    pub fn generate_stream(
        &self,
        request: GenerateRequest,
    ) -> impl Stream<Item = Result<String, Error>> + Send {
        let body = request.stream();
        let http = self.generate_http().clone();

        try_stream! {
            tracing::debug!(model = %body.model, "generate stream");
            let bytes = http.post_stream(&body).await?;
            pin_mut!(bytes);

            let mut decoder = NdjsonDecoder::new();
            while let Some(chunk) = bytes.next().await {
                for line in decoder.feed(&chunk?) {
                    let decoded = wire::decode_generate_line(&line)?;
                    if decoded.done {
                        return;
                    }
                    if let Some(fragment) = decoded.fragment() {
                        yield fragment;
                    }
                }
            }
            if let Some(line) = decoder.flush() {
                let decoded = wire::decode_generate_line(&line)?;
                if !decoded.done {
                    if let Some(fragment) = decoded.fragment() {
                        yield fragment;
                    }
                }
            }
        }
    }
}
