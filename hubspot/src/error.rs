//! Tipos de erro para o crate hubspot

use thiserror::Error;

/// Erros do cliente HubSpot
#[derive(Debug, Error)]
pub enum HubSpotError {
    /// Erro de requisição HTTP (conexão, timeout, corpo ilegível)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Erro da API do HubSpot (status code não-2xx)
    #[error("HubSpot API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Erro de parsing JSON
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl HubSpotError {
    /// Status HTTP retornado pela API, quando houver
    pub fn status(&self) -> Option<u16> {
        match self {
            HubSpotError::ApiError { status, .. } => Some(*status),
            HubSpotError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Tipo Result padrão para o crate
pub type Result<T> = std::result::Result<T, HubSpotError>;
