use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tipo de um item normalizado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Contact,
    Company,
    Deal,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Contact => "contact",
            ItemType::Company => "company",
            ItemType::Deal => "deal",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registro uniforme derivado de um objeto do CRM
///
/// Criado a cada carga, nunca persistido.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub name: String,
    pub url: String,
    pub creation_time: Option<DateTime<Utc>>,
    pub last_modified_time: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_type_field() {
        let item = IntegrationItem {
            id: "1".to_string(),
            item_type: ItemType::Company,
            name: "Acme".to_string(),
            url: "https://app.hubspot.com/contacts/1/company/1".to_string(),
            creation_time: None,
            last_modified_time: None,
        };

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], json!("company"));
        assert_eq!(value["creation_time"], json!(null));
        assert!(value.get("item_type").is_none());
    }
}
