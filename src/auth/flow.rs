//! Fluxos OAuth2 da integração HubSpot
//!
//! - `authorize`: gera o state, grava no cache e monta a URL de autorização
//! - `handle_callback`: valida o state, troca o code e grava as credenciais
//! - `get_credentials`: leitura das credenciais gravadas pelo callback
//!
//! Callback: `AWAITING_CODE → STATE_VALIDATED → TOKEN_EXCHANGED → CREDENTIAL_STORED`.
//! Qualquer falha de validação aborta antes de `STATE_VALIDATED`, e nada é
//! gravado em credenciais antes da troca do code terminar com sucesso.

use serde::Deserialize;

use super::{Credentials, OAuth2Client, OAuth2Config, StateToken};
use crate::cache::SharedCache;
use crate::utils::logging::*;
use crate::utils::{mask_secret, AppError, AppResult};

/// Parâmetros do callback OAuth2
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OAuthCallbackParams {
    /// Authorization code retornado pelo HubSpot
    pub code: Option<String>,
    /// State JSON enviado na URL de autorização
    pub state: Option<String>,
    /// Erro retornado pelo HubSpot (se houver)
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Serviço OAuth2 do HubSpot
pub struct HubSpotOAuth {
    config: OAuth2Config,
    client: OAuth2Client,
    cache: SharedCache,
}

impl HubSpotOAuth {
    pub fn new(config: OAuth2Config, cache: SharedCache) -> AppResult<Self> {
        let client = OAuth2Client::new(config.clone())?;
        Ok(Self { config, client, cache })
    }

    pub fn config(&self) -> &OAuth2Config {
        &self.config
    }

    /// Inicia o fluxo: grava o state (TTL `state_ttl`) e retorna a URL de autorização
    pub async fn authorize(&self, user_id: &str, org_id: &str) -> AppResult<String> {
        require_id("user_id", user_id)?;
        require_id("org_id", org_id)?;

        let token = StateToken::generate(user_id, org_id);
        let encoded_state = token.encode()?;

        self.cache
            .set_ex(
                &self.config.state_key(org_id, user_id),
                &encoded_state,
                self.config.state_ttl,
            )
            .await?;

        log_info(&format!(
            "🚀 [OAuth2] State gerado para org={} user={} (expira em {}s)",
            org_id,
            user_id,
            self.config.state_ttl.as_secs()
        ));

        Ok(format!(
            "{}&state={}",
            self.config.authorization_url(),
            urlencoding::encode(&encoded_state)
        ))
    }

    /// Processa o callback do HubSpot
    pub async fn handle_callback(&self, params: OAuthCallbackParams) -> AppResult<Credentials> {
        if let Some(error) = params.error {
            log_error(&format!(
                "❌ [OAuth2] Erro na autorização: {} ({})",
                error,
                params.error_description.as_deref().unwrap_or("-")
            ));
            return Err(AppError::AuthorizationDenied(error));
        }

        let code = params.code.filter(|c| !c.is_empty()).ok_or_else(|| {
            log_validation_error("code", "ausente no callback");
            AppError::ValidationError("Missing code parameter".to_string())
        })?;
        let raw_state = params.state.filter(|s| !s.is_empty()).ok_or_else(|| {
            log_validation_error("state", "ausente no callback");
            AppError::ValidationError("Missing state parameter".to_string())
        })?;

        let state = self.validate_state(&raw_state).await?;

        log_info(&format!(
            "🔑 [OAuth2] State validado para org={} user={}, code: {}",
            state.org_id,
            state.user_id,
            mask_secret(&code, 6)
        ));

        // Troca do code e remoção do state em paralelo; a primeira falha aborta
        let state_key = self.config.state_key(&state.org_id, &state.user_id);
        let (credentials, ()) = tokio::try_join!(
            self.client.exchange_code_for_token(&code),
            async { self.cache.delete(&state_key).await.map_err(AppError::from) },
        )?;

        self.cache
            .set_ex(
                &self.config.credentials_key(&state.org_id, &state.user_id),
                &credentials.to_json_string()?,
                self.config.credentials_ttl,
            )
            .await?;

        log_info(&format!(
            "✅ [OAuth2] Credenciais gravadas para org={} user={} (expiram em {}s)",
            state.org_id,
            state.user_id,
            self.config.credentials_ttl.as_secs()
        ));

        Ok(credentials)
    }

    /// Confere o state recebido contra o cache (chave exata + nonce)
    async fn validate_state(&self, raw_state: &str) -> AppResult<StateToken> {
        let received = StateToken::decode(raw_state).map_err(|e| {
            log_warning("⚠️ [OAuth2] State do callback não é um JSON válido");
            e
        })?;

        let key = self.config.state_key(&received.org_id, &received.user_id);
        let saved = self.cache.get(&key).await?;

        let matches = saved
            .as_deref()
            .and_then(|raw| StateToken::decode(raw).ok())
            .map(|saved| saved.nonce_matches(&received))
            .unwrap_or(false);

        if !matches {
            log_warning(&format!(
                "⚠️ [OAuth2] State inválido ou expirado para org={} user={}",
                received.org_id, received.user_id
            ));
            return Err(AppError::StateMismatch);
        }

        Ok(received)
    }

    /// Lê as credenciais gravadas pelo callback (somente leitura)
    pub async fn get_credentials(&self, user_id: &str, org_id: &str) -> AppResult<Credentials> {
        let raw = self
            .cache
            .get(&self.config.credentials_key(org_id, user_id))
            .await?
            .ok_or(AppError::NotFound)?;

        Credentials::parse(&raw)
    }
}

fn require_id(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        log_validation_error(field, "vazio");
        return Err(AppError::ValidationError(format!("Missing '{}' field", field)));
    }
    Ok(())
}
