// Biblioteca do middleware de integração HubSpot
// Expõe módulos para uso em testes e no binário

pub mod auth;
pub mod cache;
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;

use auth::{HubSpotOAuth, OAuth2Config};
use cache::SharedCache;
use services::ItemLoader;

// AppState é definido aqui para ser compartilhado
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub cache: SharedCache,
    pub oauth: Arc<HubSpotOAuth>,
    pub items: Arc<ItemLoader>,
}

impl AppState {
    pub fn new(settings: config::Settings, cache: SharedCache) -> utils::AppResult<Self> {
        let oauth = HubSpotOAuth::new(OAuth2Config::from_settings(&settings), cache.clone())?;
        let items = ItemLoader::new(&settings.hubspot)?;

        Ok(Self {
            settings,
            cache,
            oauth: Arc::new(oauth),
            items: Arc::new(items),
        })
    }

    /// Cria o backend de cache configurado e monta o estado
    pub async fn from_settings(settings: config::Settings) -> utils::AppResult<Self> {
        let cache = cache::build_cache(&settings.cache).await?;
        Self::new(settings, cache)
    }
}
