use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::cache::CacheError;

#[derive(Debug, Error)]
pub enum AppError {
    /// O provedor retornou `error` no callback (usuário negou, app inválido...)
    #[error("{0}")]
    AuthorizationDenied(String),

    /// State ausente, expirado ou com nonce diferente do cache
    #[error("State does not match.")]
    StateMismatch,

    /// Nenhuma credencial no cache para (org, user)
    #[error("No credentials found.")]
    NotFound,

    /// Credencial presente mas sem `access_token`
    #[error("Invalid credentials.")]
    InvalidCredential,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("HubSpot API error: {0}")]
    HubSpotApi(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthorizationDenied(_)
            | AppError::StateMismatch
            | AppError::NotFound
            | AppError::InvalidCredential
            | AppError::ValidationError(_)
            | AppError::JsonError(_) => StatusCode::BAD_REQUEST,
            AppError::HubSpotApi(_) => StatusCode::BAD_GATEWAY,
            AppError::Cache(_) | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = self.to_string();

        // `detail` espelha `error` para clientes que leem `response.data.detail`
        let body = json!({
            "error": error_message,
            "detail": error_message,
            "status": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_bad_request() {
        assert_eq!(
            AppError::AuthorizationDenied("access_denied".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::StateMismatch.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredential.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::HubSpotApi("boom".into()).status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_messages() {
        assert_eq!(AppError::AuthorizationDenied("access_denied".into()).to_string(), "access_denied");
        assert_eq!(AppError::StateMismatch.to_string(), "State does not match.");
        assert_eq!(AppError::NotFound.to_string(), "No credentials found.");
        assert_eq!(AppError::InvalidCredential.to_string(), "Invalid credentials.");
    }
}
