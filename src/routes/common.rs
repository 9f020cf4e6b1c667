//! Common routes: service info, health, readiness, and the JSON 404 fallback.

use crate::error::{ErrorBody, ROUTE_NOT_FOUND};
use crate::response::{HealthBody, ReadyBody, ServiceInfo};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};

async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "Tienda API",
        health: "/api/health",
        productos: "/api/productos",
    })
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

async fn ready(State(state): State<AppState>) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    if let Err(e) = state.store.ping().await {
        tracing::warn!(error = %e, "readiness check failed");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: "unavailable",
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: "ok",
    }))
}

pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: ROUTE_NOT_FOUND.into(),
        }),
    )
}

/// GET /, GET /api/health, GET /api/ready.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(info).fallback(not_found))
        .route("/api/health", get(health).fallback(not_found))
        .route("/api/ready", get(ready).fallback(not_found))
        .with_state(state)
}
