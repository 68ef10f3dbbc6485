//! Reference-data cache
//!
//! `GET /reference-data` changes rarely, so the payload is cached for the
//! process lifetime and persisted in the session store together with its
//! ETag. Revalidation uses `If-None-Match`; a 304 reuses the stored copy, and
//! a network failure with a stored copy falls back to it rather than failing
//! the caller.

use parking_lot::Mutex;
use std::sync::Arc;

use zori_core::reference::ReferenceData;
use zori_core::{ZoriError, ZoriResult};

use crate::config::ApiConfig;
use crate::store::SessionStore;

/// Session-store key for the persisted payload.
pub const REFERENCE_DATA_KEY: &str = "zori_reference_data";
/// Session-store key for the persisted ETag.
pub const REFERENCE_ETAG_KEY: &str = "zori_reference_data_etag";

/// Caching fetcher for reference data. Unauthenticated endpoint.
pub struct ReferenceDataCache {
    http: reqwest::Client,
    config: ApiConfig,
    store: Arc<dyn SessionStore>,
    memory: Mutex<Option<ReferenceData>>,
}

impl ReferenceDataCache {
    /// Create a cache over a session store.
    pub fn new(config: ApiConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            store,
            memory: Mutex::new(None),
        }
    }

    /// Get reference data, from cache when possible.
    pub async fn get(&self) -> ZoriResult<ReferenceData> {
        if let Some(data) = self.memory.lock().clone() {
            return Ok(data);
        }

        let stored = self.stored();
        match &stored {
            Some((data, Some(etag))) => match self.revalidate(etag).await {
                Ok(Some(fresh)) => Ok(fresh),
                Ok(None) => {
                    // 304: the stored copy is still current.
                    *self.memory.lock() = Some(data.clone());
                    Ok(data.clone())
                }
                Err(error) => {
                    tracing::warn!("reference-data revalidation failed, using stored copy: {error}");
                    *self.memory.lock() = Some(data.clone());
                    Ok(data.clone())
                }
            },
            _ => self.fetch_fresh().await,
        }
    }

    /// Drop both the in-memory and persisted copies.
    pub fn clear(&self) {
        *self.memory.lock() = None;
        self.store.remove(REFERENCE_DATA_KEY);
        self.store.remove(REFERENCE_ETAG_KEY);
    }

    fn stored(&self) -> Option<(ReferenceData, Option<String>)> {
        let raw = self.store.get(REFERENCE_DATA_KEY)?;
        let data: ReferenceData = serde_json::from_str(&raw).ok()?;
        Some((data, self.store.get(REFERENCE_ETAG_KEY)))
    }

    fn persist(&self, data: &ReferenceData, etag: Option<&str>) {
        if let Ok(json) = serde_json::to_string(data) {
            self.store.set(REFERENCE_DATA_KEY, &json);
        }
        if let Some(etag) = etag {
            self.store.set(REFERENCE_ETAG_KEY, etag);
        }
        *self.memory.lock() = Some(data.clone());
    }

    /// Conditional fetch. `Ok(None)` means 304, the stored copy stands.
    async fn revalidate(&self, etag: &str) -> ZoriResult<Option<ReferenceData>> {
        let response = self
            .http
            .get(self.config.endpoint("/reference-data"))
            .header(reqwest::header::IF_NONE_MATCH, etag)
            .send()
            .await
            .map_err(|e| ZoriError::network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_MODIFIED {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ZoriError::server(response.status().to_string()));
        }
        let fresh_etag = response_etag(&response);
        let data: ReferenceData = response
            .json()
            .await
            .map_err(|e| ZoriError::serialization(e.to_string()))?;
        self.persist(&data, fresh_etag.as_deref());
        Ok(Some(data))
    }

    async fn fetch_fresh(&self) -> ZoriResult<ReferenceData> {
        let response = self
            .http
            .get(self.config.endpoint("/reference-data"))
            .send()
            .await
            .map_err(|e| ZoriError::network(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ZoriError::server(response.status().to_string()));
        }
        let etag = response_etag(&response);
        let data: ReferenceData = response
            .json()
            .await
            .map_err(|e| ZoriError::serialization(e.to_string()))?;
        self.persist(&data, etag.as_deref());
        Ok(data)
    }
}

fn response_etag(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::ETAG)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySessionStore;
    use zori_core::reference::Country;

    fn sample() -> ReferenceData {
        ReferenceData {
            countries: vec![Country {
                iso_code: "BR".into(),
                name: "Brazil".into(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn persisted_copy_round_trips() {
        let store = Arc::new(MemorySessionStore::new());
        let cache = ReferenceDataCache::new(ApiConfig::default(), store.clone());
        cache.persist(&sample(), Some("\"v1\""));

        let (data, etag) = cache.stored().unwrap();
        assert_eq!(data.countries[0].iso_code, "BR");
        assert_eq!(etag.as_deref(), Some("\"v1\""));
    }

    #[tokio::test]
    async fn memory_copy_short_circuits_the_network() {
        // base_url points nowhere; a cache hit must not touch it.
        let config = ApiConfig {
            base_url: "http://127.0.0.1:1/v1".into(),
            ..Default::default()
        };
        let cache = ReferenceDataCache::new(config, Arc::new(MemorySessionStore::new()));
        *cache.memory.lock() = Some(sample());
        let data = cache.get().await.unwrap();
        assert_eq!(data.countries.len(), 1);
    }

    #[test]
    fn clear_drops_both_copies() {
        let store = Arc::new(MemorySessionStore::new());
        let cache = ReferenceDataCache::new(ApiConfig::default(), store.clone());
        cache.persist(&sample(), Some("\"v1\""));
        cache.clear();
        assert!(cache.memory.lock().is_none());
        assert!(store.get(REFERENCE_DATA_KEY).is_none());
        assert!(store.get(REFERENCE_ETAG_KEY).is_none());
    }

    #[test]
    fn corrupt_persisted_copy_is_ignored() {
        let store = Arc::new(MemorySessionStore::new());
        store.set(REFERENCE_DATA_KEY, "not json");
        let cache = ReferenceDataCache::new(ApiConfig::default(), store);
        assert!(cache.stored().is_none());
    }
}
