//! Key-value storage backends for progress records.
//!
//! The adapter in `progress.rs` is written against the small [`KvStore`]
//! trait. Two implementations exist:
//!   - `HttpKvStore`: a REST key-value service (PUT/GET by key, 404 = absent),
//!     configured from env/TOML. Used in deployment.
//!   - `MemoryStore`: process-local map. Used when no store URL is configured
//!     and as the test double.
//!
//! NOTE: We never log the API token and we keep payload log lines truncated.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::config::StorageCfg;
use crate::util::trunc_for_log;

/// Errors surfaced by storage backends. All of these are server-side
/// operation failures; shape validation of stored records happens above
/// this layer.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("storage request failed: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("storage responded with status {0}")]
  Backend(u16),
  #[error("storage returned a malformed payload: {0}")]
  Payload(#[source] serde_json::Error),
}

/// Minimal key-value contract: opaque string keys, JSON values, no
/// transactions or queries.
#[async_trait]
pub trait KvStore: Send + Sync {
  /// Overwrite the value at `key`.
  async fn put_json(&self, key: &str, value: Value) -> Result<(), StoreError>;

  /// Read the value at `key`; `None` when the key was never written.
  async fn get_json(&self, key: &str) -> Result<Option<Value>, StoreError>;
}

/// Client for a REST key-value service.
#[derive(Clone)]
pub struct HttpKvStore {
  pub client: reqwest::Client,
  pub base_url: String,
  pub api_token: Option<String>,
}

impl HttpKvStore {
  /// Construct the client if a store URL is configured (KV_STORE_URL wins
  /// over the TOML `[storage]` section); otherwise return None.
  pub fn from_env(cfg: &StorageCfg) -> Option<Self> {
    let base_url = std::env::var("KV_STORE_URL").ok().or_else(|| cfg.base_url.clone())?;
    let api_token = std::env::var("KV_STORE_TOKEN").ok().or_else(|| cfg.api_token.clone());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(cfg.timeout_secs))
      .build()
      .ok()?;

    Some(Self { client, base_url, api_token })
  }

  fn key_url(&self, key: &str) -> String {
    format!("{}/{}", self.base_url.trim_end_matches('/'), key)
  }

  fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match &self.api_token {
      Some(token) => req.header(AUTHORIZATION, format!("Bearer {}", token)),
      None => req,
    }
  }
}

#[async_trait]
impl KvStore for HttpKvStore {
  async fn put_json(&self, key: &str, value: Value) -> Result<(), StoreError> {
    let url = self.key_url(key);
    let req = self
      .client
      .put(&url)
      .header(USER_AGENT, "mathquest-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .json(&value);

    let res = self.authorize(req).send().await?;
    let status = res.status();
    if !status.is_success() {
      error!(target: "progress", %key, status = status.as_u16(), "KV put rejected");
      return Err(StoreError::Backend(status.as_u16()));
    }
    debug!(target: "progress", %key, "KV put ok");
    Ok(())
  }

  async fn get_json(&self, key: &str) -> Result<Option<Value>, StoreError> {
    let url = self.key_url(key);
    let req = self.client.get(&url).header(USER_AGENT, "mathquest-backend/0.1");

    let res = self.authorize(req).send().await?;
    let status = res.status();
    if status == reqwest::StatusCode::NOT_FOUND {
      debug!(target: "progress", %key, "KV key absent");
      return Ok(None);
    }
    if !status.is_success() {
      error!(target: "progress", %key, status = status.as_u16(), "KV get rejected");
      return Err(StoreError::Backend(status.as_u16()));
    }

    let body = res.text().await?;
    debug!(target: "progress", %key, body = %trunc_for_log(&body, 256), "KV fetch");
    let value = serde_json::from_str(&body).map_err(StoreError::Payload)?;
    Ok(Some(value))
  }
}

/// Process-local store. Loses everything on restart, which is fine for
/// development and tests.
#[derive(Default)]
pub struct MemoryStore {
  entries: RwLock<HashMap<String, Value>>,
}

#[async_trait]
impl KvStore for MemoryStore {
  async fn put_json(&self, key: &str, value: Value) -> Result<(), StoreError> {
    self.entries.write().await.insert(key.to_string(), value);
    Ok(())
  }

  async fn get_json(&self, key: &str) -> Result<Option<Value>, StoreError> {
    Ok(self.entries.read().await.get(key).cloned())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[tokio::test]
  async fn memory_store_round_trips() {
    let store = MemoryStore::default();
    store.put_json("k1", json!({"n": 1})).await.unwrap();
    assert_eq!(store.get_json("k1").await.unwrap(), Some(json!({"n": 1})));
  }

  #[tokio::test]
  async fn memory_store_absent_key_is_none() {
    let store = MemoryStore::default();
    assert_eq!(store.get_json("nope").await.unwrap(), None);
  }

  #[tokio::test]
  async fn memory_store_put_overwrites() {
    let store = MemoryStore::default();
    store.put_json("k", json!(1)).await.unwrap();
    store.put_json("k", json!(2)).await.unwrap();
    assert_eq!(store.get_json("k").await.unwrap(), Some(json!(2)));
  }

  #[test]
  fn key_url_joins_without_double_slash() {
    let store = HttpKvStore {
      client: reqwest::Client::new(),
      base_url: "https://kv.example.com/app/".into(),
      api_token: None,
    };
    assert_eq!(store.key_url("user_progress_u1"), "https://kv.example.com/app/user_progress_u1");
  }
}
