//! Cache chave-valor externo
//!
//! Guarda o state OAuth e as credenciais obtidas no callback. Os valores são
//! strings (JSON serializado pelo chamador) e toda escrita tem TTL.
//!
//! Backends:
//! - `memory`: mapa em processo com expiração (padrão, usado nos testes)
//! - `redis`: `SET EX` / `GET` / `DEL`

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub mod memory;
pub mod redis;

pub use memory::MemoryCache;
pub use self::redis::RedisCache;

use crate::config::CacheSettings;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Backend error: {0}")]
    Backend(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Operações atômicas por chave exigidas pelos fluxos OAuth
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Grava `value` em `key`, expirando após `ttl`
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Lê `key`; `None` se ausente ou expirada
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Remove `key` (no-op se ausente)
    async fn delete(&self, key: &str) -> CacheResult<()>;

    async fn health_check(&self) -> CacheResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str;
}

pub type SharedCache = Arc<dyn KeyValueCache>;

/// Cria o backend configurado em `cache.backend`
pub async fn build_cache(settings: &CacheSettings) -> CacheResult<SharedCache> {
    match settings.backend.as_str() {
        "memory" => Ok(Arc::new(MemoryCache::new())),
        "redis" => {
            let cache = RedisCache::new(&settings.redis_url, settings.key_prefix.clone())?;
            // Falhar cedo se o Redis não estiver acessível
            cache.health_check().await?;
            Ok(Arc::new(cache))
        }
        other => Err(CacheError::Connection(format!("Unknown cache backend: {}", other))),
    }
}
