use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chargedb_sync::Reconciler;
use serde::Serialize;

use super::{ApiError, AppState};
use crate::middleware::RequestId;

/// Success body of `POST /sync`.
///
/// `chargers_count` is the number of distinct chargers written in this pass.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SyncResponse {
    message: &'static str,
    chargers_count: usize,
    deleted_count: usize,
}

/// `POST /sync`: one full reconciliation pass, for external schedulers.
pub(super) async fn trigger_sync(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    tracing::info!(request_id = %req_id.0, "charger sync triggered");
    let reconciler = Reconciler::new(state.source, state.store, state.settings);

    match reconciler.run().await {
        Ok(report) => Json(SyncResponse {
            message: "sync succeeded",
            chargers_count: report.upserted,
            deleted_count: report.deleted,
        })
        .into_response(),
        Err(err) => ApiError::sync_failed(err.to_string()).into_response(),
    }
}
