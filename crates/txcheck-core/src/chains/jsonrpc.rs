use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use reqwest::Url;
use tracing::debug;

use crate::error::{CoreError, UpstreamError};
use crate::transport::Transport;

#[derive(serde::Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(serde::Deserialize)]
struct JsonRpcResponse {
    result: Option<serde_json::Value>,
    error: Option<serde_json::Value>,
}

/// Minimal JSON-RPC 2.0 caller used by the EVM, XRP and Solana handlers.
pub(crate) struct JsonRpcEndpoint {
    transport: Arc<dyn Transport>,
    url: Url,
    next_id: AtomicU64,
}

impl JsonRpcEndpoint {
    pub(crate) fn new(transport: Arc<dyn Transport>, url: Url) -> Self {
        Self {
            transport,
            url,
            next_id: AtomicU64::new(1),
        }
    }

    /// Issue one call and return its `result`, `Null` when absent.
    pub(crate) async fn call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, CoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(rpc.id = id, rpc.method = method, "rpc call");

        let req = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        let body = serde_json::to_value(&req)
            .map_err(|e| CoreError::invalid_response(format!("encode JSON-RPC request: {e}")))?;

        let decoded: JsonRpcResponse = serde_json::from_value(
            self.transport.post_json(&self.url, &body).await?.into_json()?,
        )
        .map_err(|e| CoreError::invalid_response(format!("decode JSON-RPC response: {e}")))?;

        if let Some(err) = decoded.error {
            return Err(parse_jsonrpc_error(err));
        }

        Ok(decoded.result.unwrap_or(serde_json::Value::Null))
    }
}

/// Parse a JSON-RPC error value into a structured `CoreError`.
///
/// Errors shaped `{"code": <int>, "message": <string>}` become `ServerError`;
/// anything else falls back to `InvalidResponse` with the raw JSON.
pub(crate) fn parse_jsonrpc_error(err: serde_json::Value) -> CoreError {
    #[derive(serde::Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
    }

    match serde_json::from_value::<JsonRpcError>(err.clone()) {
        Ok(parsed) => UpstreamError::ServerError {
            code: parsed.code,
            message: parsed.message,
        }
        .into(),
        Err(_) => CoreError::invalid_response(format!("non-standard JSON-RPC error: {err}")),
    }
}
