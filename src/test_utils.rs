//! Helpers compartilhados pelos testes

use crate::config::{CacheSettings, HubSpotSettings, ServerSettings, Settings};

/// Settings apontando token e API do CRM para `server_url` (httpmock)
pub fn test_settings(server_url: &str) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: vec!["http://localhost:3000".to_string()],
        },
        hubspot: HubSpotSettings {
            client_id: "test_client_id".to_string(),
            client_secret: "test_client_secret".to_string(),
            redirect_uri: "http://localhost:8000/integrations/hubspot/oauth2callback".to_string(),
            authorization_url: "https://app.hubspot.com/oauth/authorize".to_string(),
            token_url: format!("{}/oauth/v1/token", server_url),
            api_base_url: server_url.to_string(),
            app_base_url: "https://app.hubspot.com".to_string(),
            scopes: "crm.objects.contacts.read crm.objects.companies.read crm.objects.deals.read"
                .to_string(),
            http_timeout_secs: 30,
            connect_timeout_secs: 5,
        },
        cache: CacheSettings::default(),
    }
}
