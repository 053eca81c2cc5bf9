//! # HubSpot OAuth2 Authentication Module
//!
//! ## Responsabilidades:
//! - Iniciar fluxo OAuth2 (authorization URL + state no cache)
//! - Validar o state e trocar authorization code por access token
//! - Guardar e fornecer as credenciais por (organização, usuário)
//!
//! ## Estrutura:
//! - `config.rs`: Configurações OAuth2 e chaves do cache
//! - `state.rs`: State token (nonce + ids)
//! - `credentials.rs`: Credencial (JSON bruto do endpoint de token)
//! - `client.rs`: Cliente HTTP do endpoint de token
//! - `flow.rs`: Fluxos authorize / callback / credenciais
//! - `handlers.rs`: Handlers HTTP

pub mod client;
pub mod config;
pub mod credentials;
pub mod flow;
pub mod handlers;
pub mod state;

pub use client::OAuth2Client;
pub use config::OAuth2Config;
pub use credentials::Credentials;
pub use flow::{HubSpotOAuth, OAuthCallbackParams};
pub use handlers::{authorize_hubspot, get_hubspot_credentials, oauth2callback_hubspot};
pub use state::StateToken;
