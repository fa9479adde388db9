use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Url;

use crate::error::{CoreError, UpstreamError};

use super::{HttpReply, Transport};

#[derive(Clone)]
enum Canned {
    Reply(HttpReply),
    Timeout,
}

struct Route {
    method: &'static str,
    path_contains: String,
    /// JSON-RPC method to match in a POST body, if any.
    rpc_method: Option<String>,
    canned: Canned,
}

/// A mock upstream for handler tests. Routes are matched in insertion order;
/// unmatched requests get a 500. Every call is counted and its URL recorded.
pub struct MockTransport {
    routes: Vec<Route>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder { routes: Vec::new() }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_urls(&self) -> Vec<String> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn respond(
        &self,
        method: &str,
        url: &Url,
        body: Option<&serde_json::Value>,
    ) -> Result<HttpReply, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(url.to_string());
        }

        let rpc_method = body
            .and_then(|b| b.get("method"))
            .and_then(serde_json::Value::as_str);

        let route = self.routes.iter().find(|route| {
            route.method == method
                && url.as_str().contains(&route.path_contains)
                && route
                    .rpc_method
                    .as_deref()
                    .map_or(true, |wanted| rpc_method == Some(wanted))
        });

        match route.map(|r| r.canned.clone()) {
            Some(Canned::Reply(reply)) => Ok(reply),
            Some(Canned::Timeout) => Err(UpstreamError::Timeout.into()),
            None => Ok(HttpReply {
                status: 500,
                body: "no mock route".into(),
            }),
        }
    }
}

pub struct MockTransportBuilder {
    routes: Vec<Route>,
}

impl MockTransportBuilder {
    fn push(
        mut self,
        method: &'static str,
        path_contains: &str,
        rpc_method: Option<&str>,
        canned: Canned,
    ) -> Self {
        self.routes.push(Route {
            method,
            path_contains: path_contains.to_owned(),
            rpc_method: rpc_method.map(str::to_owned),
            canned,
        });
        self
    }

    pub fn get_json(self, path_contains: &str, status: u16, body: serde_json::Value) -> Self {
        self.get_text(path_contains, status, &body.to_string())
    }

    pub fn get_text(self, path_contains: &str, status: u16, body: &str) -> Self {
        let reply = HttpReply {
            status,
            body: body.to_owned(),
        };
        self.push("GET", path_contains, None, Canned::Reply(reply))
    }

    pub fn post_json(self, path_contains: &str, status: u16, body: serde_json::Value) -> Self {
        let reply = HttpReply {
            status,
            body: body.to_string(),
        };
        self.push("POST", path_contains, None, Canned::Reply(reply))
    }

    /// Answer a JSON-RPC call by method name with `{"result": result}`.
    pub fn rpc_result(self, rpc_method: &str, result: serde_json::Value) -> Self {
        let body = serde_json::json!({ "jsonrpc": "2.0", "id": 1, "result": result });
        let reply = HttpReply {
            status: 200,
            body: body.to_string(),
        };
        self.push("POST", "", Some(rpc_method), Canned::Reply(reply))
    }

    pub fn rpc_timeout(self, rpc_method: &str) -> Self {
        self.push("POST", "", Some(rpc_method), Canned::Timeout)
    }

    pub fn post_timeout(self, path_contains: &str) -> Self {
        self.push("POST", path_contains, None, Canned::Timeout)
    }

    pub fn timeout_all(self) -> Self {
        self.push("GET", "", None, Canned::Timeout)
            .push("POST", "", None, Canned::Timeout)
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            routes: self.routes,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &Url) -> Result<HttpReply, CoreError> {
        self.respond("GET", url, None)
    }

    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> Result<HttpReply, CoreError> {
        self.respond("POST", url, Some(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).expect("static test url must parse")
    }

    #[tokio::test]
    async fn unmatched_request_returns_500_and_is_counted() {
        let mock = MockTransport::builder().build();
        let reply = mock.get(&url("http://example.test/tx/1")).await.unwrap();
        assert_eq!(reply.status, 500);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn rpc_routes_match_on_method_name() {
        let mock = MockTransport::builder()
            .rpc_result("a", serde_json::json!(1))
            .rpc_result("b", serde_json::json!(2))
            .build();
        let reply = mock
            .post_json(&url("http://rpc.test/"), &serde_json::json!({ "method": "b" }))
            .await
            .unwrap();
        assert_eq!(reply.json().unwrap()["result"], 2);
    }
}
