//! Upstream HTTP abstraction.
//!
//! Chain handlers only speak to third-party APIs through the [`Transport`]
//! trait, so each handler can be exercised against canned replies. The
//! production implementation is [`HttpTransport`]; tests use
//! `mock::MockTransport`.

mod http;
#[cfg(test)]
pub mod mock;

pub use http::HttpTransport;

use async_trait::async_trait;
use reqwest::Url;

use crate::error::{CoreError, UpstreamError};

/// Raw upstream reply. Status handling is left to the caller because some
/// APIs signal "not found" through the status code.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON, treating any non-2xx status as a failure.
    pub fn into_json(self) -> Result<serde_json::Value, CoreError> {
        if !self.is_success() {
            return Err(UpstreamError::HttpStatus {
                status: self.status,
                body: self.body,
            }
            .into());
        }
        self.json()
    }

    /// Decode the body as JSON regardless of status.
    pub fn json(&self) -> Result<serde_json::Value, CoreError> {
        serde_json::from_str(&self.body).map_err(|e| {
            CoreError::invalid_response(format!("decode JSON response: {e}; body={}", self.body))
        })
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpReply, CoreError>;

    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> Result<HttpReply, CoreError>;
}
