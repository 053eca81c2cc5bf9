use axum::{extract::State, response::Json};
use std::sync::Arc;
use tokio::time::Instant;

use super::FormFields;
use crate::models::IntegrationItem;
use crate::utils::logging::*;
use crate::utils::AppResult;
use crate::AppState;

/// POST /integrations/hubspot/load (form: `credentials`)
///
/// `credentials` é o JSON devolvido por `/integrations/hubspot/credentials`
pub async fn load_hubspot_items(
    State(state): State<Arc<AppState>>,
    form: FormFields,
) -> AppResult<Json<Vec<IntegrationItem>>> {
    let start_time = Instant::now();
    log_request_received("/integrations/hubspot/load", "POST");

    let credentials = form.required("credentials")?;
    let items = state.items.load_items(credentials).await?;

    log_request_processed(
        "/integrations/hubspot/load",
        200,
        start_time.elapsed().as_millis() as u64,
    );
    Ok(Json(items))
}
