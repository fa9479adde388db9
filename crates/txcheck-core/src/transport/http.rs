use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Url};
use tracing::{debug, trace};

use crate::error::{CoreError, UpstreamError};

use super::{HttpReply, Transport};

/// Shared `reqwest` client with one request timeout applied to every
/// upstream call.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, CoreError> {
        if timeout.is_zero() {
            return Err(CoreError::InvalidConfig(
                "upstream timeout must be at least 1 second".to_owned(),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .timeout(timeout)
            .pool_max_idle_per_host(8)
            .tcp_nodelay(true)
            .user_agent(concat!("txcheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CoreError::InvalidConfig(format!("build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    async fn finish(
        &self,
        method: &str,
        url: &Url,
        builder: reqwest::RequestBuilder,
    ) -> Result<HttpReply, CoreError> {
        let response = builder.send().await.map_err(UpstreamError::from)?;
        let status = response.status();
        let body = response.text().await.map_err(UpstreamError::from)?;

        debug!(
            http.method = method,
            http.host = url.host_str().unwrap_or_default(),
            %status,
            body_len = body.len(),
            "upstream response"
        );
        trace!(http.method = method, %url, body = %body, "upstream response body");

        Ok(HttpReply {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<HttpReply, CoreError> {
        debug!(http.method = "GET", http.path = url.path(), "upstream request");
        let builder = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "application/json");
        self.finish("GET", url, builder).await
    }

    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> Result<HttpReply, CoreError> {
        debug!(http.method = "POST", http.path = url.path(), "upstream request");
        let builder = self
            .client
            .post(url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(body);
        self.finish("POST", url, builder).await
    }
}
