//! HTTP client for talking to a running plan advisor instance
//!
//! Used by the `reload` command to trigger a catalog reload over the
//! admin endpoint instead of signalling the process.

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

/// Body returned by `/api/plans/reload`
#[derive(Debug, Deserialize)]
pub struct ReloadResponse {
    pub message: String,
    pub plans: usize,
}

/// Thin wrapper around a reqwest client bound to one server
pub struct AdminClient {
    client: Client,
    base_url: String,
}

impl AdminClient {
    /// Create a client for the server at `base_url` (e.g. "http://127.0.0.1:5000")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the server to reload its plan catalog from disk
    ///
    /// # Errors
    /// Returns an error if the request fails, the server answers with a
    /// non-2xx status, or the body is not a reload summary.
    pub async fn reload_catalog(&self) -> Result<ReloadResponse> {
        let url = format!("{}/api/plans/reload", self.base_url);
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to reach {}: {}", url, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Reload failed: HTTP {} {}", status, body);
        }

        let summary = response
            .json::<ReloadResponse>()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read reload response: {}", e))?;

        Ok(summary)
    }
}
