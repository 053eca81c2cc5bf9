use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub hubspot: HubSpotSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Origens liberadas no CORS (frontend que abre o popup OAuth)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Configuração do app HubSpot
///
/// Obrigatórios: `client_id`, `client_secret`, `redirect_uri`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HubSpotSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub authorization_url: String,
    pub token_url: String,
    pub api_base_url: String,
    /// Base dos links `url` dos itens normalizados
    pub app_base_url: String,
    pub scopes: String,
    pub http_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheSettings {
    /// `memory` ou `redis`
    pub backend: String,
    pub redis_url: String,
    #[serde(default)]
    pub key_prefix: String,
    pub state_ttl_secs: u64,
    pub credentials_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: String::new(),
            state_ttl_secs: 600,
            credentials_ttl_secs: 600,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.cors_origins", vec!["http://localhost:3000"])?
            .set_default("hubspot.client_id", "")?
            .set_default("hubspot.client_secret", "")?
            .set_default("hubspot.redirect_uri", "http://localhost:8000/integrations/hubspot/oauth2callback")?
            .set_default("hubspot.authorization_url", "https://app.hubspot.com/oauth/authorize")?
            .set_default("hubspot.token_url", "https://api.hubapi.com/oauth/v1/token")?
            .set_default("hubspot.api_base_url", "https://api.hubapi.com")?
            .set_default("hubspot.app_base_url", "https://app.hubspot.com")?
            .set_default(
                "hubspot.scopes",
                "crm.objects.contacts.read crm.objects.companies.read crm.objects.deals.read",
            )?
            .set_default("hubspot.http_timeout_secs", 30)?
            .set_default("hubspot.connect_timeout_secs", 5)?
            .set_default("cache.backend", "memory")?
            .set_default("cache.redis_url", "redis://127.0.0.1:6379")?
            .set_default("cache.key_prefix", "")?
            .set_default("cache.state_ttl_secs", 600)?
            .set_default("cache.credentials_ttl_secs", 600)?
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        // Variáveis de ambiente específicas
        if let Ok(client_id) = std::env::var("HUBSPOT_CLIENT_ID") {
            builder = builder.set_override("hubspot.client_id", client_id)?;
        }
        if let Ok(client_secret) = std::env::var("HUBSPOT_CLIENT_SECRET") {
            builder = builder.set_override("hubspot.client_secret", client_secret)?;
        }
        if let Ok(redirect_uri) = std::env::var("HUBSPOT_REDIRECT_URI") {
            builder = builder.set_override("hubspot.redirect_uri", redirect_uri)?;
        }
        builder = with_redis_url(
            builder,
            std::env::var("REDIS_URL").ok(),
            std::env::var("HUBSPOT_INTEGRATION__CACHE__BACKEND").is_ok(),
        )?;

        // HUBSPOT_INTEGRATION__CACHE__CREDENTIALS_TTL_SECS=3600 etc.
        builder = builder.add_source(
            Environment::with_prefix("HUBSPOT_INTEGRATION")
                .prefix_separator("__")
                .separator("__"),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Verifica os campos obrigatórios do app OAuth
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("hubspot.client_id", &self.hubspot.client_id),
            ("hubspot.client_secret", &self.hubspot.client_secret),
            ("hubspot.redirect_uri", &self.hubspot.redirect_uri),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Message(format!("{} não configurado", key)));
            }
        }

        if self.cache.state_ttl_secs == 0 || self.cache.credentials_ttl_secs == 0 {
            return Err(ConfigError::Message("TTLs do cache devem ser maiores que zero".to_string()));
        }

        Ok(())
    }
}

/// `REDIS_URL` liga o backend redis, exceto quando `cache.backend` foi fixado no ambiente
fn with_redis_url(
    builder: ConfigBuilder<DefaultState>,
    redis_url: Option<String>,
    backend_pinned: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Some(redis_url) = redis_url else {
        return Ok(builder);
    };

    let builder = builder.set_override("cache.redis_url", redis_url)?;
    if backend_pinned {
        Ok(builder)
    } else {
        builder.set_override("cache.backend", "redis")
    }
}
