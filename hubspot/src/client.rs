//! Cliente HTTP para a API do HubSpot

use crate::error::{HubSpotError, Result};
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// URL base padrão da API do HubSpot
pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

/// Cliente para interagir com a API do HubSpot
///
/// Autentica cada requisição com `Authorization: Bearer <access_token>`.
#[derive(Clone)]
pub struct HubSpotClient {
    http_client: HttpClient,
    access_token: String,
    base_url: String,
}

impl HubSpotClient {
    /// Reaproveita um `reqwest::Client` já configurado (pool de conexões compartilhado)
    pub fn from_http_client(http_client: HttpClient, access_token: impl Into<String>) -> Self {
        Self {
            http_client,
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Aponta o cliente para outra URL base (sandbox, mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Executa uma requisição GET com query string
    pub(crate) async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);

        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Executa uma requisição GET e parseia JSON
    ///
    /// O corpo é lido como texto antes do parsing para que um JSON com formato
    /// inesperado vire `HubSpotError::JsonError` (e não um erro de transporte).
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self.get(endpoint, query).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Processa a resposta HTTP e trata erros
    async fn handle_response(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let error_body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

        tracing::error!("HubSpot API error ({}): {}", status_code, error_body);

        Err(HubSpotError::ApiError {
            status: status_code,
            message: extract_error_message(&error_body),
        })
    }
}

/// Extrai a mensagem de erro do corpo JSON do HubSpot (`{"status":"error","message":...}`)
fn extract_error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => json
            .get("message")
            .or_else(|| json.get("error"))
            .and_then(|v| v.as_str())
            .unwrap_or(body)
            .to_string(),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HubSpotClient::from_http_client(HttpClient::new(), "test-token");
        assert_eq!(client.access_token, "test-token");
        assert_eq!(client.base_url, "https://api.hubapi.com");
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let client = HubSpotClient::from_http_client(HttpClient::new(), "t")
            .with_base_url("http://127.0.0.1:9999/");
        assert_eq!(client.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"status":"error","message":"Authentication credentials not found","category":"INVALID_AUTHENTICATION"}"#;
        assert_eq!(extract_error_message(body), "Authentication credentials not found");
        assert_eq!(extract_error_message("gateway timeout"), "gateway timeout");
    }
}
