//! OAuth2 HTTP Handlers
//!
//! Endpoints HTTP para iniciar e completar o fluxo OAuth2 e ler as credenciais

use axum::{
    extract::{Query, State},
    response::{Html, Json},
};
use std::sync::Arc;

use super::{Credentials, OAuthCallbackParams};
use crate::handlers::FormFields;
use crate::utils::logging::*;
use crate::utils::AppResult;
use crate::AppState;

/// Documento retornado ao popup: só fecha a janela que iniciou o fluxo
pub const CLOSE_WINDOW_HTML: &str = r#"<html>
    <script>
        window.close();
    </script>
</html>
"#;

/// POST /integrations/hubspot/authorize (form: `user_id`, `org_id`)
///
/// Retorna a URL de autorização (string JSON) para o frontend abrir no popup
pub async fn authorize_hubspot(
    State(state): State<Arc<AppState>>,
    form: FormFields,
) -> AppResult<Json<String>> {
    log_request_received("/integrations/hubspot/authorize", "POST");

    let user_id = form.required("user_id")?;
    let org_id = form.required("org_id")?;

    let url = state.oauth.authorize(user_id, org_id).await?;
    Ok(Json(url))
}

/// GET /integrations/hubspot/oauth2callback?code=XXX&state=YYY
///
/// # Retorno
/// - `Ok(Html)`: documento que fecha o popup
/// - `Err`: 400 para erro do provedor/state inválido, 502 para falha na troca do code
pub async fn oauth2callback_hubspot(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OAuthCallbackParams>,
) -> AppResult<Html<&'static str>> {
    log_info("📥 [OAuth2] Callback recebido");

    state.oauth.handle_callback(params).await?;
    Ok(Html(CLOSE_WINDOW_HTML))
}

/// POST /integrations/hubspot/credentials (form: `user_id`, `org_id`)
pub async fn get_hubspot_credentials(
    State(state): State<Arc<AppState>>,
    form: FormFields,
) -> AppResult<Json<Credentials>> {
    log_request_received("/integrations/hubspot/credentials", "POST");

    let user_id = form.required("user_id")?;
    let org_id = form.required("org_id")?;

    let credentials = state.oauth.get_credentials(user_id, org_id).await?;
    Ok(Json(credentials))
}
