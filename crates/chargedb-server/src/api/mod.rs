mod chargers;
mod sync;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chargedb_sync::{ChargerSource, ChargerStore, SyncSettings};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

/// Usage hint returned with read-endpoint 400s.
pub(super) const CHARGERS_USAGE: &str = "GET /chargers/{town}";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ChargerStore>,
    pub source: Arc<dyn ChargerSource>,
    pub settings: SyncSettings,
}

/// JSON error body. `usage` and `details` are only present where the
/// endpoint contract includes them.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: message.into(),
                usage: Some(CHARGERS_USAGE),
                details: None,
            },
        }
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                error: "server error".to_string(),
                usage: None,
                details: Some(details.into()),
            },
        }
    }

    pub fn sync_failed(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                error: message.into(),
                usage: None,
                details: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// CORS for the browser-facing read endpoint: one origin, read-only.
fn read_cors(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

fn sync_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

fn chargers_router(allowed_origin: HeaderValue) -> Router<AppState> {
    Router::new()
        .route("/chargers", get(chargers::missing_town))
        .route("/chargers/", get(chargers::missing_town))
        .route("/chargers/{town}", get(chargers::get_by_town))
        .layer(read_cors(allowed_origin))
}

fn sync_router() -> Router<AppState> {
    Router::new()
        .route("/sync", post(sync::trigger_sync))
        .layer(sync_cors())
}

pub fn build_app(state: AppState, allowed_origin: HeaderValue) -> Router {
    let public_routes = Router::new().route("/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(chargers_router(allowed_origin))
        .merge(sync_router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(request_id = %req_id.0, error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
