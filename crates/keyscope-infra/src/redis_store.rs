//! Redis implementation of `KeyValueStore`.
//!
//! One `ConnectionManager` is opened at startup and cloned per command. The
//! manager multiplexes commands over a single connection and reconnects on
//! failure, so concurrent callers share it without extra locking.

use std::collections::BTreeMap;
use std::time::Duration;

use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, ConnectionAddr, ConnectionInfo, IntoConnectionInfo, RedisError};

use keyscope_core::store::KeyValueStore;
use keyscope_types::config::{redact_url, StoreConfig};
use keyscope_types::error::StoreError;
use keyscope_types::value::{ScanPage, ValueType};

/// Redis-backed implementation of `KeyValueStore`.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to the server described by `config`.
    ///
    /// Fails if the first connection cannot be established within the
    /// configured connection timeout.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let info = connection_info(config)?;
        let client = redis::Client::open(info).map_err(map_redis_error)?;

        let manager_config = ConnectionManagerConfig::new()
            .set_connection_timeout(Duration::from_millis(config.connection_timeout_ms))
            .set_response_timeout(Duration::from_millis(config.response_timeout_ms));

        let conn = ConnectionManager::new_with_config(client, manager_config)
            .await
            .map_err(map_redis_error)?;

        tracing::info!(url = %redact_url(&config.url), "Connected to Redis");
        Ok(Self { conn })
    }
}

/// Build connection info from the URL, then apply discrete overrides.
pub fn connection_info(config: &StoreConfig) -> Result<ConnectionInfo, StoreError> {
    let mut info = config
        .url
        .as_str()
        .into_connection_info()
        .map_err(|e| StoreError::Connection(format!("invalid store url: {e}")))?;

    match &mut info.addr {
        ConnectionAddr::Tcp(host, port) => {
            override_addr(config, host, port);
        }
        ConnectionAddr::TcpTls { host, port, .. } => {
            override_addr(config, host, port);
        }
        _ => {}
    }

    if let Some(username) = &config.username {
        info.redis.username = Some(username.clone());
    }
    if let Some(password) = &config.password {
        info.redis.password = Some(password.clone());
    }
    if let Some(db) = config.db {
        info.redis.db = db;
    }

    Ok(info)
}

fn override_addr(config: &StoreConfig, host: &mut String, port: &mut u16) {
    if let Some(h) = &config.host {
        *host = h.clone();
    }
    if let Some(p) = config.port {
        *port = p;
    }
}

/// Decode a reply element for display. Invalid UTF-8 becomes U+FFFD rather
/// than failing the whole reply.
fn lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

fn lossy_all(items: Vec<Vec<u8>>) -> Vec<String> {
    items.into_iter().map(lossy).collect()
}

fn map_redis_error(e: RedisError) -> StoreError {
    if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout()
    {
        StoreError::Connection(e.to_string())
    } else {
        StoreError::Command(e.to_string())
    }
}

impl KeyValueStore for RedisStore {
    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<ScanPage, StoreError> {
        let mut conn = self.conn.clone();
        let (cursor, keys): (u64, Vec<Vec<u8>>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(count)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(ScanPage {
            cursor,
            keys: lossy_all(keys),
        })
    }

    async fn key_type(&self, key: &str) -> Result<ValueType, StoreError> {
        let mut conn = self.conn.clone();
        let tag: String = redis::cmd("TYPE")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(ValueType::from_tag(&tag))
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        let raw: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(raw.map(lossy))
    }

    async fn list_range(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        let items: Vec<Vec<u8>> = conn.lrange(key, 0, -1).await.map_err(map_redis_error)?;
        Ok(lossy_all(items))
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        let members: Vec<Vec<u8>> = conn.smembers(key).await.map_err(map_redis_error)?;
        Ok(lossy_all(members))
    }

    async fn hash_fields(&self, key: &str) -> Result<Vec<(String, String)>, StoreError> {
        let mut conn = self.conn.clone();
        let fields: BTreeMap<Vec<u8>, Vec<u8>> =
            conn.hgetall(key).await.map_err(map_redis_error)?;
        Ok(fields
            .into_iter()
            .map(|(field, value)| (lossy(field), lossy(value)))
            .collect())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(map_redis_error)
    }

    async fn delete(&self, key: &str) -> Result<u64, StoreError> {
        let mut conn = self.conn.clone();
        conn.del(key).await.map_err(map_redis_error)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let reply: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        if reply == "PONG" {
            Ok(())
        } else {
            Err(StoreError::UnexpectedReply(reply))
        }
    }
}
