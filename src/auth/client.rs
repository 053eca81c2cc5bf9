//! OAuth2 HTTP Client
//!
//! Cliente HTTP isolado para o endpoint de token do HubSpot

use reqwest::Client;
use serde_json::Value;

use super::{Credentials, OAuth2Config};
use crate::utils::logging::*;
use crate::utils::{mask_secret, AppError, AppResult};

/// Cliente OAuth2 para HubSpot
#[derive(Clone)]
pub struct OAuth2Client {
    config: OAuth2Config,
    http_client: Client,
}

impl OAuth2Client {
    /// Criar novo cliente OAuth2 com os timeouts da configuração
    pub fn new(config: OAuth2Config) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(config.http_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http_client })
    }

    /// Trocar authorization code por access token
    ///
    /// POST form-urlencoded `{grant_type, code, redirect_uri, client_id, client_secret}`.
    ///
    /// # Retorno
    /// - `Ok(Credentials)`: corpo JSON da resposta, sem alterações
    /// - `Err(AppError::HubSpotApi)`: falha de rede, status não-2xx ou corpo que não é objeto JSON
    pub async fn exchange_code_for_token(&self, code: &str) -> AppResult<Credentials> {
        log_info(&format!(
            "📤 [OAuth2] POST {} - client_id: {}, code: {}",
            self.config.token_url,
            self.config.client_id,
            mask_secret(code, 6)
        ));

        let response = self
            .http_client
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::HubSpotApi(format!("Falha ao conectar com HubSpot OAuth API: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            log_error(&format!("❌ [OAuth2] Token exchange failed: {} - {}", status, error_text));
            return Err(AppError::HubSpotApi(format!(
                "OAuth token exchange failed [{}]: {}",
                status, error_text
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::HubSpotApi(format!("Falha ao parsear resposta do token: {}", e)))?;

        let credentials = Credentials::from_value(body).ok_or_else(|| {
            AppError::HubSpotApi("Resposta do token não é um objeto JSON".to_string())
        })?;

        match credentials.access_token() {
            Some(token) => log_info(&format!("✅ [OAuth2] Access token obtido: {}", mask_secret(token, 8))),
            None => log_warning("⚠️ [OAuth2] Resposta do token sem access_token"),
        }

        Ok(credentials)
    }
}
