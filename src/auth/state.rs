//! State token do fluxo OAuth2
//!
//! Nonce aleatório (32 bytes do RNG do SO, base64 url-safe) + ids de usuário e
//! organização. Vai serializado em JSON no parâmetro `state` da URL de
//! autorização e fica no cache até o callback.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::utils::{AppError, AppResult};

const NONCE_BYTES: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateToken {
    /// Nonce
    pub state: String,
    pub user_id: String,
    pub org_id: String,
}

impl StateToken {
    pub fn generate(user_id: &str, org_id: &str) -> Self {
        Self {
            state: generate_nonce(),
            user_id: user_id.to_string(),
            org_id: org_id.to_string(),
        }
    }

    pub fn encode(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse do `state` recebido no callback; qualquer formato inválido é `StateMismatch`
    pub fn decode(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw).map_err(|_| AppError::StateMismatch)
    }

    pub fn nonce_matches(&self, other: &StateToken) -> bool {
        constant_time_eq(self.state.as_bytes(), other.state.as_bytes())
    }
}

fn generate_nonce() -> String {
    let mut bytes = [0u8; NONCE_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_is_url_safe_and_unique() {
        let a = StateToken::generate("u1", "o1");
        let b = StateToken::generate("u1", "o1");

        // 32 bytes em base64 sem padding = 43 caracteres
        assert_eq!(a.state.len(), 43);
        assert!(a.state.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_ne!(a.state, b.state);
    }

    #[test]
    fn test_wire_format_field_names() {
        let token = StateToken {
            state: "abc".to_string(),
            user_id: "u1".to_string(),
            org_id: "o1".to_string(),
        };
        let value: serde_json::Value = serde_json::from_str(&token.encode().unwrap()).unwrap();
        assert_eq!(value["state"], "abc");
        assert_eq!(value["user_id"], "u1");
        assert_eq!(value["org_id"], "o1");
    }

    #[test]
    fn test_decode_garbage_is_state_mismatch() {
        assert!(matches!(StateToken::decode("not json"), Err(AppError::StateMismatch)));
        assert!(matches!(StateToken::decode(r#"{"state":"x"}"#), Err(AppError::StateMismatch)));
    }

    #[test]
    fn test_nonce_matches() {
        let a = StateToken::generate("u1", "o1");
        let mut b = a.clone();
        assert!(a.nonce_matches(&b));
        b.state.push('x');
        assert!(!a.nonce_matches(&b));
    }
}
