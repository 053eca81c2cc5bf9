//! Credencial retornada pelo endpoint de token
//!
//! Guardada como o JSON bruto da resposta; só `access_token` é interpretado.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(Map<String, Value>);

impl Credentials {
    /// Aceita qualquer objeto JSON (sem exigir `access_token`)
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Parse de credencial serializada, exigindo `access_token` string
    pub fn parse(raw: &str) -> AppResult<Self> {
        let value: Value = serde_json::from_str(raw).map_err(|_| AppError::InvalidCredential)?;
        Self::from_value(value)
            .ok_or(AppError::InvalidCredential)?
            .validated()
    }

    pub fn validated(self) -> AppResult<Self> {
        if self.access_token().is_some() {
            Ok(self)
        } else {
            Err(AppError::InvalidCredential)
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.0.get("access_token").and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn to_json_string(&self) -> AppResult<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}
