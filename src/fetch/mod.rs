//! Dataset retrieval over HTTP or from the local filesystem.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;

/// Issues a GET for `url` and returns the response body.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the request fails, or the server
/// answers with a non-success status.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("invalid dataset URL '{url}'"))?,
    );

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        anyhow::bail!("dataset request to {url} returned status {status}");
    }

    let bytes = resp.bytes().await?.to_vec();
    debug!(url, bytes = bytes.len(), "Dataset downloaded");
    Ok(bytes)
}

/// Loads the dataset from a local path, or over HTTP when `source` is a URL.
#[tracing::instrument(skip(timeout))]
pub async fn load_source(source: &str, timeout: Duration) -> Result<Vec<u8>> {
    if source.starts_with("http") {
        let client = BasicClient::new(timeout)?;
        fetch_bytes(&client, source).await
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("failed to read dataset file '{source}'"))
    }
}
