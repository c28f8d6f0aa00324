//! HTTP transport abstraction for the Twitch API
//!
//! The client only ever needs the status code and the full body text, so the
//! transport reads the body exactly once and hands back an [`HttpResponse`].
//! The trait keeps the network out of unit tests.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;

/// Trait for sending HTTP requests
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a GET request and returns the buffered response
    async fn get_response(&self, url: &str, headers: &HeaderMap) -> Result<HttpResponse>;

    /// Sends a POST request with an empty body and returns the buffered response
    async fn post_response(&self, url: &str, headers: &HeaderMap) -> Result<HttpResponse>;
}

/// Response from an HTTP request, body already read into memory
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Production HTTP client using reqwest
///
/// Clone is cheap, the inner client shares its connection pool. Errors never
/// include the request URL, since the token endpoint carries credentials in
/// its query string.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a reqwest-based HTTP client with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { inner })
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to read response body")?;

        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get_response(&self, url: &str, headers: &HeaderMap) -> Result<HttpResponse> {
        let response = self
            .inner
            .get(url)
            .headers(headers.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to send request")?;

        Self::read(response).await
    }

    async fn post_response(&self, url: &str, headers: &HeaderMap) -> Result<HttpResponse> {
        let response = self
            .inner
            .post(url)
            .headers(headers.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to send request")?;

        Self::read(response).await
    }
}
