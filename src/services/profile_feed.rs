//! Profile feed
//!
//! Client side of the `/profiles` contract. One call, one snapshot: a fetch
//! either yields the complete list or a [`FetchError`], never a partial list.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::profile::Profile;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The request could not complete (DNS, connect, timeout, reset)
    #[error("network error: {0}")]
    Network(String),
    /// The endpoint answered with a non-2xx status
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    /// 2xx, but the body is not `{ "profiles": [...] }`
    #[error("malformed response body: {0}")]
    Body(String),
}

impl FetchError {
    /// Non-2xx and malformed bodies both count as protocol failures
    pub fn is_protocol(&self) -> bool {
        matches!(self, FetchError::Status { .. } | FetchError::Body(_))
    }
}

/// Anything that can produce a full profile snapshot
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profiles(&self) -> Result<Vec<Profile>, FetchError>;
}

#[derive(Debug, Deserialize)]
struct ProfilesBody {
    profiles: Vec<Profile>,
}

/// HTTP implementation polling `GET {base_url}/profiles`
#[derive(Clone)]
pub struct HttpProfileFeed {
    client: Client,
    base_url: String,
}

impl HttpProfileFeed {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn profiles_url(&self) -> String {
        format!("{}/profiles", self.base_url)
    }
}

#[async_trait]
impl ProfileSource for HttpProfileFeed {
    async fn fetch_profiles(&self) -> Result<Vec<Profile>, FetchError> {
        let url = self.profiles_url();
        tracing::debug!("Fetching profiles from {}", url);

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate(&body, 200),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let profiles = parse_profiles_body(&bytes)?;
        tracing::debug!("Fetched {} profiles ({})", profiles.len(), status_text(status));

        Ok(profiles)
    }
}

/// Decode a `/profiles` body. `profiles` must be present and an array.
pub fn parse_profiles_body(bytes: &[u8]) -> Result<Vec<Profile>, FetchError> {
    serde_json::from_slice::<ProfilesBody>(bytes)
        .map(|body| body.profiles)
        .map_err(|e| FetchError::Body(e.to_string()))
}

fn status_text(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("OK")
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}…", head)
    }
}
