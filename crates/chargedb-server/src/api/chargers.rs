use axum::{
    extract::{RawPathParams, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chargedb_sync::{get_chargers_by_town, now_epoch_secs, ErrorKind};

use super::{ApiError, AppState};
use crate::middleware::RequestId;

/// `GET /chargers/{town}`.
///
/// The segment is taken raw so that decoding happens exactly once, in the
/// query service.
pub(super) async fn get_by_town(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    params: RawPathParams,
) -> Response {
    let raw_town = params
        .iter()
        .find_map(|(key, value)| (key == "town").then_some(value));

    match get_chargers_by_town(state.store.as_ref(), raw_town, now_epoch_secs()).await {
        Ok(result) => {
            tracing::info!(
                request_id = %req_id.0,
                town = %result.town,
                count = result.count,
                "chargers by town"
            );
            Json(result).into_response()
        }
        Err(err) if err.kind() == ErrorKind::BadRequest => {
            ApiError::bad_request(err.to_string()).into_response()
        }
        Err(err) => {
            tracing::error!(
                request_id = %req_id.0,
                kind = %err.kind(),
                error = %err,
                "chargers by town failed"
            );
            ApiError::internal(err.to_string()).into_response()
        }
    }
}

/// `GET /chargers` with no town segment.
pub(super) async fn missing_town() -> ApiError {
    ApiError::bad_request("town is required")
}
