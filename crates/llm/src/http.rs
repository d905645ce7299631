//! Shared HTTP transport for providers.
//!
//! [`HttpProvider`] bundles a [`Client`], a header set, and an endpoint,
//! and centralizes the status check: non-2xx responses become
//! [`Error::Transport`] carrying status and body. No retries happen here;
//! retry policy, if any, belongs to the caller's `Client` configuration.

use crate::{Error, Result};
use bytes::Bytes;
use futures_core::Stream;
use futures_util::TryStreamExt;
use reqwest::{
    Client,
    header::{self, HeaderMap, HeaderName},
};
use serde::Serialize;

/// A provider transport: client + headers + endpoint.
#[derive(Clone)]
pub struct HttpProvider {
    /// The HTTP client.
    client: Client,
    /// Request headers (authorization, content-type).
    headers: HeaderMap,
    /// Endpoint URL.
    endpoint: String,
}

impl HttpProvider {
    /// Create a transport with bearer authorization.
    pub fn bearer(client: Client, key: &str, endpoint: &str) -> Result<Self> {
        let mut provider = Self::no_auth(client, endpoint);
        provider
            .headers
            .insert(header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        Ok(provider)
    }

    /// Create a transport without authorization.
    pub fn no_auth(client: Client, endpoint: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
        }
    }

    /// Create a transport authorizing through a custom header.
    pub fn custom_header(client: Client, name: &str, value: &str, endpoint: &str) -> Result<Self> {
        Self::no_auth(client, endpoint).header(name, value)
    }

    /// Add a header, consuming and returning the transport.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = name
            .parse::<HeaderName>()
            .map_err(|e| Error::Config(e.to_string()))?;
        self.headers.insert(name, value.parse()?);
        Ok(self)
    }

    /// The configured headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST a JSON body and return the response body text.
    pub async fn post_json<T: Serialize + ?Sized>(&self, body: &T) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::Transport {
                status: Some(status.as_u16()),
                body: text,
            });
        }

        tracing::debug!(endpoint = %self.endpoint, status = %status, "received response");
        Ok(text)
    }

    /// POST a JSON body and return the raw response byte stream.
    pub async fn post_stream<T: Serialize + ?Sized>(
        &self,
        body: &T,
    ) -> Result<impl Stream<Item = Result<Bytes>> + Send> {
        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport {
                status: Some(status.as_u16()),
                body,
            });
        }

        tracing::debug!(endpoint = %self.endpoint, status = %status, "streaming response");
        Ok(response.bytes_stream().map_err(Error::from))
    }
}
