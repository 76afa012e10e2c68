use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::Serialize;
use shared::{
    domain::{ItemId, MenuItem},
    error::{FetchError, ImageLoadError, PurchaseError},
    protocol::{MenuListResponse, PurchaseRequest, RawMenuItem, MENU_PATH},
};
use tracing::{debug, info, warn};
use url::Url;

pub mod cache;
pub mod config;
pub mod connectivity;
pub mod images;
pub mod model;

pub use cache::{CachePolicy, ResponseCache};
pub use config::{load_settings, ClientSettings};
pub use connectivity::{Connectivity, FixedConnectivity, Reachability, ReachabilityProbe};
pub use images::{resolve_image_url, ImageScheduler};
pub use model::{FetchSequencer, FetchTicket, MenuModel};

/// Appends `path` to `base` the way the menu API expects: plain concatenation
/// with exactly one `/` between the two.
pub fn join_base(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let base = base.as_str().trim_end_matches('/');
    if path.starts_with('/') {
        Url::parse(&format!("{base}{path}"))
    } else {
        Url::parse(&format!("{base}/{path}"))
    }
}

/// Decodes a `GET /burgers` body.
///
/// Malformed JSON or a missing `burgers` key fails the whole response. Records
/// that do not validate are dropped and logged; the rest of the batch is kept in
/// arrival order.
pub fn decode_menu(body: &[u8]) -> Result<Vec<MenuItem>, FetchError> {
    let response: MenuListResponse =
        serde_json::from_slice(body).map_err(|err| FetchError::Parse(err.to_string()))?;

    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(response.burgers.len());
    for (position, value) in response.burgers.into_iter().enumerate() {
        match RawMenuItem::from_value(value).validate() {
            Ok(item) => {
                if !seen.insert(item.id) {
                    warn!(item_id = item.id.0, "duplicate menu item id in fetched batch");
                }
                items.push(item);
            }
            Err(rejection) => {
                warn!(position, %rejection, "dropping malformed menu item");
            }
        }
    }
    Ok(items)
}

#[async_trait]
pub trait MenuSource: Send + Sync {
    async fn fetch_items(&self) -> Result<Vec<MenuItem>, FetchError>;
    async fn refresh_items(&self) -> Result<Vec<MenuItem>, FetchError>;
    async fn submit_purchase(&self, id: ItemId, price_units: u64) -> Result<(), PurchaseError>;
    async fn load_image(&self, url: &Url) -> Result<Arc<[u8]>, ImageLoadError>;
    fn base_url(&self) -> &Url;
}

/// Fetches the menu and, only on success, replaces the model's contents.
pub async fn sync_menu(
    source: &dyn MenuSource,
    model: &mut MenuModel,
) -> Result<usize, FetchError> {
    let items = source.fetch_items().await?;
    model.apply(items);
    Ok(model.count())
}

pub struct MenuClient {
    http: Client,
    base_url: Url,
    cache: ResponseCache,
}

impl MenuClient {
    pub fn new(base_url: Url) -> Self {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            cache: ResponseCache::new(),
        }
    }

    fn menu_url(&self) -> Result<Url, url::ParseError> {
        join_base(&self.base_url, MENU_PATH)
    }

    /// `GET /burgers`, served from the response cache when an entry exists.
    pub async fn fetch_items(&self) -> Result<Vec<MenuItem>, FetchError> {
        self.load_menu(CachePolicy::ReturnCacheElseLoad).await
    }

    /// `GET /burgers`, always from the network. The fresh body replaces the
    /// cached one.
    pub async fn refresh_items(&self) -> Result<Vec<MenuItem>, FetchError> {
        self.load_menu(CachePolicy::ReloadIgnoringCache).await
    }

    async fn load_menu(&self, policy: CachePolicy) -> Result<Vec<MenuItem>, FetchError> {
        let url = self
            .menu_url()
            .map_err(|err| FetchError::Network(format!("invalid menu url: {err}")))?;
        let body = self
            .cache
            .load(&self.http, &url, policy)
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?;
        let items = decode_menu(&body)?;
        info!(count = items.len(), ?policy, "menu loaded");
        Ok(items)
    }

    pub async fn submit_purchase(
        &self,
        id: ItemId,
        price_units: u64,
    ) -> Result<(), PurchaseError> {
        info!(item_id = id.0, price_units, "submitting purchase");
        self.submit_payload(&PurchaseRequest {
            id,
            bitcoin: price_units,
        })
        .await
    }

    /// Posts `payload` as JSON to the menu endpoint.
    ///
    /// Any non-empty response body counts as success; the status code and body
    /// shape are not checked.
    pub async fn submit_payload<P>(&self, payload: &P) -> Result<(), PurchaseError>
    where
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(payload)
            .map_err(|err| PurchaseError::EncodingFailed(err.to_string()))?;
        let url = self
            .menu_url()
            .map_err(|err| PurchaseError::Network(format!("invalid menu url: {err}")))?;

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| PurchaseError::Network(err.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| PurchaseError::Network(err.to_string()))?;

        if bytes.is_empty() {
            return Err(PurchaseError::EmptyResponse);
        }
        debug!(
            status = status.as_u16(),
            body = %String::from_utf8_lossy(&bytes),
            "purchase response"
        );
        Ok(())
    }

    pub async fn load_image(&self, url: &Url) -> Result<Arc<[u8]>, ImageLoadError> {
        self.cache
            .load(&self.http, url, CachePolicy::ReturnCacheElseLoad)
            .await
            .map_err(|err| ImageLoadError::Network {
                url: url.to_string(),
                message: err.to_string(),
            })
    }
}

#[async_trait]
impl MenuSource for MenuClient {
    async fn fetch_items(&self) -> Result<Vec<MenuItem>, FetchError> {
        MenuClient::fetch_items(self).await
    }

    async fn refresh_items(&self) -> Result<Vec<MenuItem>, FetchError> {
        MenuClient::refresh_items(self).await
    }

    async fn submit_purchase(&self, id: ItemId, price_units: u64) -> Result<(), PurchaseError> {
        MenuClient::submit_purchase(self, id, price_units).await
    }

    async fn load_image(&self, url: &Url) -> Result<Arc<[u8]>, ImageLoadError> {
        MenuClient::load_image(self, url).await
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
