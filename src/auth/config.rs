//! OAuth2 Configuration
//!
//! Centraliza as configurações do app HubSpot usadas pelos fluxos OAuth2.
//! O valor é passado explicitamente (nada de constantes globais), o que permite
//! apontar token/API para mock servers nos testes.

use std::time::Duration;

use crate::config::Settings;

/// Nome da integração usado no namespace das chaves do cache
pub const INTEGRATION_NAME: &str = "hubspot";

#[derive(Debug, Clone)]
pub struct OAuth2Config {
    /// Prefixo das chaves (`{integration}_state:...`)
    pub integration: String,

    /// Client ID do app HubSpot (obrigatório)
    pub client_id: String,

    /// Client Secret do app HubSpot (obrigatório)
    pub client_secret: String,

    /// URL de callback registrada no app (obrigatório)
    pub redirect_uri: String,

    /// Endpoint de autorização (sem query string)
    pub authorization_endpoint: String,

    /// Endpoint de troca do code por token
    pub token_url: String,

    /// Scopes separados por espaço
    pub scopes: String,

    pub state_ttl: Duration,

    /// TTL das credenciais no cache; quem consome precisa buscá-las antes disso
    pub credentials_ttl: Duration,

    pub http_timeout: Duration,
    pub connect_timeout: Duration,
}

impl OAuth2Config {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            integration: INTEGRATION_NAME.to_string(),
            client_id: settings.hubspot.client_id.clone(),
            client_secret: settings.hubspot.client_secret.clone(),
            redirect_uri: settings.hubspot.redirect_uri.clone(),
            authorization_endpoint: settings.hubspot.authorization_url.clone(),
            token_url: settings.hubspot.token_url.clone(),
            scopes: settings.hubspot.scopes.clone(),
            state_ttl: Duration::from_secs(settings.cache.state_ttl_secs),
            credentials_ttl: Duration::from_secs(settings.cache.credentials_ttl_secs),
            http_timeout: Duration::from_secs(settings.hubspot.http_timeout_secs),
            connect_timeout: Duration::from_secs(settings.hubspot.connect_timeout_secs),
        }
    }

    /// URL de autorização do HubSpot, sem o `state`
    pub fn authorization_url(&self) -> String {
        let separator = if self.authorization_endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}{}client_id={}&redirect_uri={}&scope={}",
            self.authorization_endpoint,
            separator,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&self.scopes)
        )
    }

    /// Chave do state OAuth: `{integration}_state:{org_id}:{user_id}`
    pub fn state_key(&self, org_id: &str, user_id: &str) -> String {
        format!("{}_state:{}:{}", self.integration, org_id, user_id)
    }

    /// Chave das credenciais: `{integration}_credentials:{org_id}:{user_id}`
    pub fn credentials_key(&self, org_id: &str, user_id: &str) -> String {
        format!("{}_credentials:{}:{}", self.integration, org_id, user_id)
    }
}
