//! Normalização dos objetos do CRM em `IntegrationItem`
//!
//! Uma função pura por variante; `CrmRecord` faz o dispatch.

use chrono::{DateTime, Utc};
use hubspot::{CompanyProperties, ContactProperties, CrmObject, DealProperties};

use crate::models::{IntegrationItem, ItemType};

pub const UNNAMED_CONTACT: &str = "Unnamed Contact";
pub const UNNAMED_COMPANY: &str = "Unnamed Company";
pub const UNNAMED_DEAL: &str = "Unnamed Deal";

/// Objeto do CRM já tipado pela coleção de origem
#[derive(Debug, Clone, PartialEq)]
pub enum CrmRecord {
    Contact(CrmObject<ContactProperties>),
    Company(CrmObject<CompanyProperties>),
    Deal(CrmObject<DealProperties>),
}

impl CrmRecord {
    pub fn normalize(&self, app_base_url: &str) -> IntegrationItem {
        match self {
            CrmRecord::Contact(contact) => contact_to_item(contact, app_base_url),
            CrmRecord::Company(company) => company_to_item(company, app_base_url),
            CrmRecord::Deal(deal) => deal_to_item(deal, app_base_url),
        }
    }
}

pub fn contact_to_item(contact: &CrmObject<ContactProperties>, app_base_url: &str) -> IntegrationItem {
    let props = &contact.properties;
    let full_name = format!(
        "{} {}",
        props.firstname.as_deref().unwrap_or(""),
        props.lastname.as_deref().unwrap_or("")
    );

    IntegrationItem {
        id: contact.id.clone(),
        item_type: ItemType::Contact,
        name: non_blank(Some(full_name.as_str())).unwrap_or(UNNAMED_CONTACT).to_string(),
        url: format!("{}/contacts/{}", app_base_url, contact.id),
        creation_time: parse_timestamp(props.createdate.as_deref()),
        last_modified_time: parse_timestamp(props.lastmodifieddate.as_deref()),
    }
}

pub fn company_to_item(company: &CrmObject<CompanyProperties>, app_base_url: &str) -> IntegrationItem {
    let props = &company.properties;

    IntegrationItem {
        id: company.id.clone(),
        item_type: ItemType::Company,
        name: non_blank(props.name.as_deref()).unwrap_or(UNNAMED_COMPANY).to_string(),
        url: format!("{}/contacts/{}/company/{}", app_base_url, company.id, company.id),
        creation_time: parse_timestamp(props.createdate.as_deref()),
        last_modified_time: parse_timestamp(props.hs_lastmodifieddate.as_deref()),
    }
}

pub fn deal_to_item(deal: &CrmObject<DealProperties>, app_base_url: &str) -> IntegrationItem {
    let props = &deal.properties;

    IntegrationItem {
        id: deal.id.clone(),
        item_type: ItemType::Deal,
        name: non_blank(props.dealname.as_deref()).unwrap_or(UNNAMED_DEAL).to_string(),
        url: format!("{}/contacts/{}/deal/{}", app_base_url, deal.id, deal.id),
        creation_time: parse_timestamp(props.createdate.as_deref()),
        last_modified_time: parse_timestamp(props.hs_lastmodifieddate.as_deref()),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// RFC 3339 (`2024-01-02T03:04:05.678Z`) ou epoch em milissegundos
fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = non_blank(value)?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    let parsed = value.parse::<i64>().ok().and_then(DateTime::<Utc>::from_timestamp_millis);
    if parsed.is_none() {
        tracing::debug!("Timestamp ignorado (formato desconhecido): {}", value);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const APP: &str = "https://app.hubspot.com";

    fn contact(first: Option<&str>, last: Option<&str>) -> CrmObject<ContactProperties> {
        CrmObject {
            id: "101".to_string(),
            properties: ContactProperties {
                firstname: first.map(str::to_string),
                lastname: last.map(str::to_string),
                createdate: Some("2024-01-02T03:04:05.678Z".to_string()),
                lastmodifieddate: Some("1704164645678".to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_contact_full_name() {
        let item = contact_to_item(&contact(Some("Ada"), Some("Lovelace")), APP);
        assert_eq!(item.name, "Ada Lovelace");
        assert_eq!(item.item_type, ItemType::Contact);
        assert_eq!(item.url, "https://app.hubspot.com/contacts/101");
    }

    #[test]
    fn test_contact_blank_names_fall_back() {
        assert_eq!(contact_to_item(&contact(Some(""), Some("")), APP).name, "Unnamed Contact");
        assert_eq!(contact_to_item(&contact(None, None), APP).name, "Unnamed Contact");
        assert_eq!(contact_to_item(&contact(Some("Ada"), None), APP).name, "Ada");
        assert_eq!(contact_to_item(&contact(None, Some("Lovelace")), APP).name, "Lovelace");
    }

    #[test]
    fn test_contact_timestamps() {
        let item = contact_to_item(&contact(Some("Ada"), None), APP);
        let expected = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
            + chrono::Duration::milliseconds(678);
        assert_eq!(item.creation_time, Some(expected));
        assert_eq!(item.last_modified_time, Some(expected));
    }

    #[test]
    fn test_company_and_deal_placeholders() {
        let company = CrmObject {
            id: "7".to_string(),
            properties: CompanyProperties { name: Some("   ".to_string()), ..Default::default() },
        };
        let deal = CrmObject { id: "9".to_string(), properties: DealProperties::default() };

        let company_item = CrmRecord::Company(company).normalize(APP);
        let deal_item = CrmRecord::Deal(deal).normalize(APP);

        assert_eq!(company_item.name, "Unnamed Company");
        assert_eq!(company_item.url, "https://app.hubspot.com/contacts/7/company/7");
        assert_eq!(deal_item.name, "Unnamed Deal");
        assert_eq!(deal_item.url, "https://app.hubspot.com/contacts/9/deal/9");
        assert_eq!(deal_item.creation_time, None);
    }

    #[test]
    fn test_named_company_and_deal() {
        let company = CrmObject {
            id: "7".to_string(),
            properties: CompanyProperties {
                name: Some("Acme".to_string()),
                hs_lastmodifieddate: Some("garbage".to_string()),
                ..Default::default()
            },
        };
        let deal = CrmObject {
            id: "9".to_string(),
            properties: DealProperties { dealname: Some("Big Deal".to_string()), ..Default::default() },
        };

        let company_item = company_to_item(&company, APP);
        assert_eq!(company_item.name, "Acme");
        assert_eq!(company_item.last_modified_time, None);
        assert_eq!(deal_to_item(&deal, APP).name, "Big Deal");
    }
}
