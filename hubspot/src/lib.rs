//! Cliente da API CRM do HubSpot
//!
//! Este crate fornece uma interface tipo-segura para os endpoints de leitura do
//! CRM v3 usados pela integração:
//!
//! - **Contacts**: `/crm/v3/objects/contacts`
//! - **Companies**: `/crm/v3/objects/companies`
//! - **Deals**: `/crm/v3/objects/deals`
//!
//! Cada coleção tem seu próprio tipo de `properties`, de modo que o chamador
//! trabalha com campos nomeados em vez de lookups dinâmicos no JSON.
//!
//! # Exemplo Básico
//!
//! ```rust,ignore
//! use hubspot::HubSpotClient;
//!
//! #[tokio::main]
//! async fn main() -> hubspot::Result<()> {
//!     let access_token = std::env::var("HUBSPOT_ACCESS_TOKEN")
//!         .expect("HUBSPOT_ACCESS_TOKEN não configurado");
//!
//!     let client = HubSpotClient::from_http_client(reqwest::Client::new(), access_token);
//!     let page = client.list_contacts(100).await?;
//!
//!     for contact in page.results {
//!         println!("{} {:?}", contact.id, contact.properties.firstname);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod objects;

pub use client::HubSpotClient;
pub use error::{HubSpotError, Result};
pub use objects::{
    CompanyProperties, ContactProperties, CrmObject, DealProperties, ObjectCollection, ObjectPage,
    DEFAULT_PAGE_LIMIT,
};
