//! In-memory cache-then-network loading for `GET` requests.

use std::{collections::HashMap, sync::Arc};

use reqwest::{
    header::{HeaderMap, CACHE_CONTROL},
    Client, StatusCode,
};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Serve a stored body if one exists, regardless of age.
    ReturnCacheElseLoad,
    /// Always hit the network and overwrite the stored body.
    ReloadIgnoringCache,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(StatusCode),
}

/// Bodies of successful responses keyed by absolute URL.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<Url, Arc<[u8]>>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, url: &Url) -> Option<Arc<[u8]>> {
        self.entries.read().await.get(url).cloned()
    }

    pub async fn insert(&self, url: Url, body: Arc<[u8]>) {
        self.entries.write().await.insert(url, body);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn load(
        &self,
        http: &Client,
        url: &Url,
        policy: CachePolicy,
    ) -> Result<Arc<[u8]>, LoadError> {
        if policy == CachePolicy::ReturnCacheElseLoad {
            if let Some(body) = self.get(url).await {
                debug!(%url, "serving cached response");
                return Ok(body);
            }
        }

        let response = http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status));
        }
        let storable = !forbids_storage(response.headers());
        let body: Arc<[u8]> = Arc::from(response.bytes().await?.as_ref());

        if storable {
            self.insert(url.clone(), body.clone()).await;
        } else {
            debug!(%url, "response marked no-store; not caching");
        }
        Ok(body)
    }
}

fn forbids_storage(headers: &HeaderMap) -> bool {
    headers
        .get_all(CACHE_CONTROL)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .any(|directive| directive.trim().eq_ignore_ascii_case("no-store"))
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;
