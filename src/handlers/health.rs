use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::utils::logging::*;
use crate::AppState;

const SERVICE_NAME: &str = "hubspot-integration-middleware";

pub async fn health_check() -> Json<Value> {
    log_health_check();

    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Pronto quando o cache responde (state e credenciais dependem dele)
pub async fn ready_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let cache_status = match state.cache.health_check().await {
        Ok(()) => "connected",
        Err(e) => {
            log_warning(&format!("⚠️ Cache indisponível: {}", e));
            "disconnected"
        }
    };

    let ready = cache_status == "connected";
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "ready": ready,
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "dependencies": {
                "cache": {
                    "backend": state.cache.backend_name(),
                    "status": cache_status
                }
            }
        })),
    )
}
