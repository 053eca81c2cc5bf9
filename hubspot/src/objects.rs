//! Objetos do CRM v3: contacts, companies e deals
//!
//! Todas as coleções compartilham o mesmo envelope (`{"results": [{"id", "properties"}]}`),
//! mudando apenas o conjunto de propriedades. Cada coleção tem sua struct de
//! propriedades tipada; campos ausentes ou `null` viram `None`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::client::HubSpotClient;
use crate::error::Result;

/// Tamanho de página padrão (máximo aceito pelo endpoint de listagem)
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Deserializa ID que pode vir como string ou integer
fn deserialize_id_flexible<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(de::Error::custom("id must be string or number")),
    }
}

/// Coleções de objetos do CRM lidas pela integração
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectCollection {
    Contacts,
    Companies,
    Deals,
}

impl ObjectCollection {
    /// Nome da coleção no path da API
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectCollection::Contacts => "contacts",
            ObjectCollection::Companies => "companies",
            ObjectCollection::Deals => "deals",
        }
    }

    /// Endpoint de listagem (`/crm/v3/objects/{collection}`)
    pub fn endpoint(&self) -> String {
        format!("/crm/v3/objects/{}", self.as_str())
    }
}

impl fmt::Display for ObjectCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Um objeto do CRM com suas propriedades tipadas
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "P: Deserialize<'de> + Default"))]
pub struct CrmObject<P> {
    #[serde(deserialize_with = "deserialize_id_flexible")]
    pub id: String,
    #[serde(default)]
    pub properties: P,
}

/// Página de resultados de uma listagem
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "P: Deserialize<'de> + Default"))]
pub struct ObjectPage<P> {
    pub results: Vec<CrmObject<P>>,
}

/// Propriedades padrão de um contact
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactProperties {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub createdate: Option<String>,
    #[serde(default)]
    pub lastmodifieddate: Option<String>,
}

/// Propriedades padrão de uma company
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompanyProperties {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub createdate: Option<String>,
    #[serde(default)]
    pub hs_lastmodifieddate: Option<String>,
}

/// Propriedades padrão de um deal
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DealProperties {
    #[serde(default)]
    pub dealname: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub dealstage: Option<String>,
    #[serde(default)]
    pub createdate: Option<String>,
    #[serde(default)]
    pub hs_lastmodifieddate: Option<String>,
}

impl HubSpotClient {
    /// Lista a primeira página de uma coleção
    ///
    /// Não segue `paging.next`: apenas a primeira página é retornada.
    pub async fn list_objects<P: DeserializeOwned + Default>(
        &self,
        collection: ObjectCollection,
        limit: u32,
    ) -> Result<ObjectPage<P>> {
        let page: ObjectPage<P> = self
            .get_json(&collection.endpoint(), &[("limit", limit.to_string())])
            .await?;

        tracing::debug!("📋 [HubSpot] {} {} objetos recebidos", page.results.len(), collection);

        Ok(page)
    }

    pub async fn list_contacts(&self, limit: u32) -> Result<ObjectPage<ContactProperties>> {
        self.list_objects(ObjectCollection::Contacts, limit).await
    }

    pub async fn list_companies(&self, limit: u32) -> Result<ObjectPage<CompanyProperties>> {
        self.list_objects(ObjectCollection::Companies, limit).await
    }

    pub async fn list_deals(&self, limit: u32) -> Result<ObjectPage<DealProperties>> {
        self.list_objects(ObjectCollection::Deals, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HubSpotError;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> HubSpotClient {
        HubSpotClient::from_http_client(reqwest::Client::new(), "tok-123")
            .with_base_url(server.base_url())
    }

    #[test]
    fn test_collection_endpoints() {
        assert_eq!(ObjectCollection::Contacts.endpoint(), "/crm/v3/objects/contacts");
        assert_eq!(ObjectCollection::Companies.endpoint(), "/crm/v3/objects/companies");
        assert_eq!(ObjectCollection::Deals.to_string(), "deals");
    }

    #[test]
    fn test_page_deserialization_with_nulls_and_numeric_id() {
        let page: ObjectPage<CompanyProperties> = serde_json::from_value(json!({
            "results": [
                { "id": 42, "properties": { "name": null, "createdate": "2024-01-02T03:04:05.000Z" } },
                { "id": "43" }
            ],
            "paging": { "next": { "after": "44" } }
        }))
        .unwrap();

        assert_eq!(page.results[0].id, "42");
        assert_eq!(page.results[0].properties.name, None);
        assert_eq!(page.results[1].properties, CompanyProperties::default());
    }

    #[tokio::test]
    async fn test_list_contacts_sends_bearer_and_limit() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/crm/v3/objects/contacts")
                    .query_param("limit", "100")
                    .header("Authorization", "Bearer tok-123");
                then.status(200).json_body(json!({
                    "results": [
                        { "id": "1", "properties": { "firstname": "Ada", "lastname": "Lovelace" } }
                    ]
                }));
            })
            .await;

        let page = client_for(&server).list_contacts(DEFAULT_PAGE_LIMIT).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].properties.firstname.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_api_error_carries_status_and_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/crm/v3/objects/deals");
                then.status(401).json_body(json!({
                    "status": "error",
                    "message": "Authentication credentials not found"
                }));
            })
            .await;

        let err = client_for(&server).list_deals(10).await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        match err {
            HubSpotError::ApiError { message, .. } => {
                assert_eq!(message, "Authentication credentials not found")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/crm/v3/objects/companies");
                then.status(200).body(r#"{"results": "not-a-list"}"#);
            })
            .await;

        let err = client_for(&server).list_companies(10).await.unwrap_err();
        assert!(matches!(err, HubSpotError::JsonError(_)));
    }
}
