//! Outbound GET seam.
//!
//! `Transport` returns the raw body text; interpretation lives in
//! `response`. `HttpTransport` is the reqwest-backed implementation used by
//! the host; tests plug in canned bodies instead.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use super::FetchError;

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, target: &str) -> Result<String, FetchError>;
}

/// Shared reqwest client. One per host session.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tianxing/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, target: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            crate::log_debug!("non-success HTTP status {status}; interpreting body anyway");
        }

        resp.text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}
