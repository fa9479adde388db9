use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use txcheck_core::gateway::indeterminate_result;
use txcheck_core::{CoreError, LookupRequest, LookupResult};

use super::error::{map_input_error, AppError};
use super::SharedState;

// ==============================================================================
// DTOs
// ==============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LookupQuery {
    tx_hash: Option<String>,
    network: Option<String>,
}

// ==============================================================================
// Handler
// ==============================================================================

pub(super) async fn lookup_tx(
    State(state): State<SharedState>,
    query: Result<Query<LookupQuery>, QueryRejection>,
) -> Result<Json<LookupResult>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let request = LookupRequest::parse(query.tx_hash.as_deref(), query.network.as_deref())
        .map_err(map_input_error)?;

    match state.lookup.lookup(&request).await {
        Ok(result) => Ok(Json(result)),
        Err(err @ CoreError::Upstream(_)) => {
            Err(AppError::Upstream(indeterminate_result(request.network, &err)))
        }
        Err(CoreError::InvalidInput(msg)) => Err(AppError::BadRequest(msg)),
        Err(other) => Err(AppError::Internal(format!(
            "lookup {} on {}: {other}",
            request.tx_hash, request.network
        ))),
    }
}
