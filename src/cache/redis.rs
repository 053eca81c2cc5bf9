use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::{CacheError, CacheResult, KeyValueCache};

/// Cache Redis com uma conexão multiplexada reaproveitada
pub struct RedisCache {
    client: Client,
    connection: Arc<Mutex<Option<MultiplexedConnection>>>,
    key_prefix: String,
}

impl RedisCache {
    pub fn new(redis_url: &str, key_prefix: String) -> CacheResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("Redis client error: {}", e)))?;

        Ok(Self {
            client,
            connection: Arc::new(Mutex::new(None)),
            key_prefix,
        })
    }

    /// Reaproveita a conexão existente ou abre uma nova
    async fn get_connection(&self) -> CacheResult<MultiplexedConnection> {
        let mut guard = self.connection.lock().await;

        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::Connection(format!("Connection failed: {}", e)))?;

        *guard = Some(conn.clone());
        Ok(conn)
    }

    /// Descarta a conexão após erro de IO para forçar reconexão
    async fn reset_on_error(&self, err: redis::RedisError) -> CacheError {
        if err.is_io_error() || err.is_connection_dropped() {
            *self.connection.lock().await = None;
            return CacheError::Connection(err.to_string());
        }
        CacheError::Backend(err.to_string())
    }

    fn prefixed_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl KeyValueCache for RedisCache {
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let key = self.prefixed_key(key);
        let mut conn = self.get_connection().await?;

        // SET EX 0 é rejeitado pelo Redis
        let seconds = ttl.as_secs().max(1);

        match conn.set_ex::<_, _, ()>(&key, value, seconds).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.reset_on_error(e).await),
        }
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let key = self.prefixed_key(key);
        let mut conn = self.get_connection().await?;

        match conn.get::<_, Option<String>>(&key).await {
            Ok(value) => Ok(value),
            Err(e) => Err(self.reset_on_error(e).await),
        }
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        let key = self.prefixed_key(key);
        let mut conn = self.get_connection().await?;

        match conn.del::<_, ()>(&key).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.reset_on_error(e).await),
        }
    }

    async fn health_check(&self) -> CacheResult<()> {
        let mut conn = self.get_connection().await?;
        let pong: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
        match pong {
            Ok(_) => Ok(()),
            Err(e) => Err(self.reset_on_error(e).await),
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
