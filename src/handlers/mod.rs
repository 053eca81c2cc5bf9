//! Handlers HTTP e montagem do router

pub mod form;
pub mod health;
pub mod items;

pub use form::FormFields;
pub use health::{health_check, ready_check};
pub use items::load_hubspot_items;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{authorize_hubspot, get_hubspot_credentials, oauth2callback_hubspot};
use crate::utils::logging::log_warning;
use crate::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.settings.server.cors_origins);

    Router::new()
        // Health checks
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        // OAuth2
        .route("/integrations/hubspot/authorize", post(authorize_hubspot))
        .route("/integrations/hubspot/oauth2callback", get(oauth2callback_hubspot))
        .route("/integrations/hubspot/credentials", post(get_hubspot_credentials))
        // Itens do CRM
        .route("/integrations/hubspot/load", post(load_hubspot_items))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                log_warning(&format!("⚠️ Origem CORS ignorada: {}", origin));
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
