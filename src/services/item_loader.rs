//! Carga dos itens do CRM (contacts, companies, deals)
//!
//! Cada coleção é buscada de forma independente: a falha de uma não derruba
//! as outras, apenas fica registrada no `FetchReport`.

use reqwest::Client as HttpClient;
use std::time::Duration;

use hubspot::{HubSpotClient, ObjectCollection, DEFAULT_PAGE_LIMIT};

use super::normalization::CrmRecord;
use crate::auth::Credentials;
use crate::config::HubSpotSettings;
use crate::models::IntegrationItem;
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

/// Falha ao buscar uma coleção
#[derive(Debug, Clone, PartialEq)]
pub struct FetchFailure {
    pub collection: ObjectCollection,
    pub status: Option<u16>,
    pub error: String,
}

/// Resultado de uma carga: itens obtidos + coleções que falharam
#[derive(Debug, Default)]
pub struct FetchReport {
    pub items: Vec<IntegrationItem>,
    pub failures: Vec<FetchFailure>,
}

impl FetchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct ItemLoader {
    http_client: HttpClient,
    api_base_url: String,
    app_base_url: String,
    page_limit: u32,
}

impl ItemLoader {
    pub fn new(settings: &HubSpotSettings) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_base_url: settings.api_base_url.clone(),
            app_base_url: settings.app_base_url.trim_end_matches('/').to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
        })
    }

    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    /// Lista normalizada na ordem contacts, companies, deals
    ///
    /// Coleções que falharem são omitidas (e logadas); só uma credencial
    /// inválida gera erro.
    pub async fn load_items(&self, credentials_json: &str) -> AppResult<Vec<IntegrationItem>> {
        let report = self.load_items_with_report(credentials_json).await?;

        if !report.is_complete() {
            log_warning(&format!(
                "⚠️ [HubSpot] Carga parcial: {} itens, {} coleção(ões) com falha",
                report.items.len(),
                report.failures.len()
            ));
        }

        Ok(report.items)
    }

    pub async fn load_items_with_report(&self, credentials_json: &str) -> AppResult<FetchReport> {
        let credentials = Credentials::parse(credentials_json)?;
        let access_token = credentials.access_token().ok_or(AppError::InvalidCredential)?;

        let client = HubSpotClient::from_http_client(self.http_client.clone(), access_token)
            .with_base_url(self.api_base_url.as_str());

        let (contacts, companies, deals) = tokio::join!(
            self.fetch(&client, ObjectCollection::Contacts),
            self.fetch(&client, ObjectCollection::Companies),
            self.fetch(&client, ObjectCollection::Deals),
        );

        let mut report = FetchReport::default();
        for outcome in [contacts, companies, deals] {
            match outcome {
                Ok(records) => report
                    .items
                    .extend(records.iter().map(|record| record.normalize(&self.app_base_url))),
                Err(failure) => report.failures.push(failure),
            }
        }

        log_info(&format!("✅ [HubSpot] {} itens carregados", report.items.len()));
        Ok(report)
    }

    async fn fetch(
        &self,
        client: &HubSpotClient,
        collection: ObjectCollection,
    ) -> Result<Vec<CrmRecord>, FetchFailure> {
        let result = match collection {
            ObjectCollection::Contacts => client
                .list_contacts(self.page_limit)
                .await
                .map(|page| page.results.into_iter().map(CrmRecord::Contact).collect::<Vec<_>>()),
            ObjectCollection::Companies => client
                .list_companies(self.page_limit)
                .await
                .map(|page| page.results.into_iter().map(CrmRecord::Company).collect()),
            ObjectCollection::Deals => client
                .list_deals(self.page_limit)
                .await
                .map(|page| page.results.into_iter().map(CrmRecord::Deal).collect()),
        };

        result.map_err(|e| {
            log_hubspot_api_error(collection.as_str(), e.status(), &e.to_string());
            FetchFailure {
                collection,
                status: e.status(),
                error: e.to_string(),
            }
        })
    }
}
