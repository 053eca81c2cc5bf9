//! Extrator de formulário
//!
//! O frontend envia `FormData` (multipart); clientes simples mandam
//! `application/x-www-form-urlencoded`. Os dois viram um mapa campo → texto.

use axum::{
    extract::{Form, FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use std::collections::HashMap;

use crate::utils::logging::log_validation_error;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Campo obrigatório, sem espaços nas pontas e não vazio
    pub fn required(&self, name: &str) -> AppResult<&str> {
        match self.get(name).map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => {
                log_validation_error(name, "campo ausente ou vazio");
                Err(AppError::ValidationError(format!("Missing '{}' field", name)))
            }
        }
    }
}

impl From<HashMap<String, String>> for FormFields {
    fn from(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }
}

#[axum::async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("multipart/form-data"))
            .unwrap_or(false);

        if !is_multipart {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::ValidationError(e.body_text()))?;
            return Ok(Self(fields));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::ValidationError(e.body_text()))?;

        let mut fields = HashMap::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::ValidationError(e.to_string()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let value = field
                .text()
                .await
                .map_err(|e| AppError::ValidationError(e.to_string()))?;
            fields.insert(name, value);
        }

        Ok(Self(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    async fn extract(content_type: &str, body: &'static str) -> AppResult<FormFields> {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        FormFields::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_urlencoded() {
        let form = extract("application/x-www-form-urlencoded", "user_id=u1&org_id=o%201")
            .await
            .unwrap();
        assert_eq!(form.required("user_id").unwrap(), "u1");
        assert_eq!(form.required("org_id").unwrap(), "o 1");
    }

    #[tokio::test]
    async fn test_multipart() {
        let body = "--XYZ\r\n\
            Content-Disposition: form-data; name=\"credentials\"\r\n\r\n\
            {\"access_token\":\"at\"}\r\n\
            --XYZ--\r\n";
        let form = extract("multipart/form-data; boundary=XYZ", body).await.unwrap();
        assert_eq!(form.required("credentials").unwrap(), r#"{"access_token":"at"}"#);
    }

    #[test]
    fn test_required_rejects_blank() {
        let form = FormFields::from(HashMap::from([("user_id".to_string(), "  ".to_string())]));
        assert!(matches!(form.required("user_id"), Err(AppError::ValidationError(_))));
        assert!(matches!(form.required("org_id"), Err(AppError::ValidationError(_))));
    }
}
