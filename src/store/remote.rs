//! Remote authoritative persistence.
//!
//! The remote backend is an HTTP client of the API surface in
//! [`crate::api`]. Every request carries the caller's numeric identity in
//! the identity header. Requests are never retried: a failure surfaces
//! immediately to the caller. Configuration reads go through the
//! request-coalescing cache in [`super::cache`].

use reqwest::StatusCode;
use tracing::debug;

use crate::api::request::{CreateDayRequest, SettingsPayload};
use crate::api::response::{DayResponse, StatsResponse};
use crate::api::ACCOUNT_ID_HEADER;
use crate::error::{EngineError, EngineResult};
use crate::models::{PricingConfig, ShiftDraft, ShiftRecord};

use super::cache::ConfigCache;
use super::{ConfigStore, RecordStore};

/// HTTP client store bound to one service and one account identity.
///
/// # Example
///
/// ```no_run
/// use driver_pay_engine::store::RemoteStore;
///
/// let store = RemoteStore::new("http://localhost:8080", 42);
/// ```
pub struct RemoteStore {
    http: reqwest::Client,
    base_url: String,
    account_id: i64,
    cache: ConfigCache,
}

impl RemoteStore {
    /// Creates a client for the service at `base_url`, acting as
    /// `account_id`.
    pub fn new(base_url: impl Into<String>, account_id: i64) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            account_id,
            cache: ConfigCache::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Converts a non-success response into the engine error for it.
    async fn error_for(response: reqwest::Response) -> EngineError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        EngineError::Persistence {
            message: format!("service responded {}: {}", status, body),
        }
    }

    /// Performs the uncached configuration fetch.
    async fn fetch_config(&self) -> EngineResult<PricingConfig> {
        let response = self
            .http
            .get(self.url("/api/settings"))
            .header(ACCOUNT_ID_HEADER, self.account_id.to_string())
            .send()
            .await
            .map_err(|err| EngineError::ConfigUnavailable {
                message: err.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::ConfigUnavailable {
                message: format!("service responded {}: {}", status, body),
            });
        }

        let payload: SettingsPayload =
            response
                .json()
                .await
                .map_err(|err| EngineError::ConfigUnavailable {
                    message: err.to_string(),
                })?;
        Ok(payload.into())
    }
}

impl RecordStore for RemoteStore {
    async fn create(&self, draft: ShiftDraft) -> EngineResult<ShiftRecord> {
        let response = self
            .http
            .post(self.url("/api/days"))
            .header(ACCOUNT_ID_HEADER, self.account_id.to_string())
            .json(&CreateDayRequest::from(&draft))
            .send()
            .await
            .map_err(EngineError::persistence)?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let day: DayResponse = response.json().await.map_err(EngineError::persistence)?;
        debug!(record_id = %day.id, "Created remote record");
        day.try_into()
    }

    async fn list_by_month(&self, year: i32, month: u32) -> EngineResult<Vec<ShiftRecord>> {
        let response = self
            .http
            .get(self.url(&format!("/api/stats/{}/{}", year, month)))
            .header(ACCOUNT_ID_HEADER, self.account_id.to_string())
            .send()
            .await
            .map_err(EngineError::persistence)?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let stats: StatsResponse = response.json().await.map_err(EngineError::persistence)?;
        stats.history.into_iter().map(TryInto::try_into).collect()
    }

    async fn delete_by_id(&self, id: &str) -> EngineResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/days/{}", id)))
            .header(ACCOUNT_ID_HEADER, self.account_id.to_string())
            .send()
            .await
            .map_err(EngineError::persistence)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(EngineError::NotFound { id: id.to_string() });
        }
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        Ok(())
    }

    async fn wipe_all(&self) -> EngineResult<()> {
        let response = self
            .http
            .delete(self.url("/api/wipe"))
            .header(ACCOUNT_ID_HEADER, self.account_id.to_string())
            .send()
            .await
            .map_err(EngineError::persistence)?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        // The wipe cleared the remote configuration as well.
        self.cache.invalidate().await;
        Ok(())
    }
}

impl ConfigStore for RemoteStore {
    async fn get(&self) -> EngineResult<PricingConfig> {
        self.cache.get_or_fetch(self.fetch_config()).await
    }

    async fn save(&self, config: PricingConfig) -> EngineResult<()> {
        let response = self
            .http
            .put(self.url("/api/settings"))
            .header(ACCOUNT_ID_HEADER, self.account_id.to_string())
            .json(&SettingsPayload::from(config))
            .send()
            .await
            .map_err(EngineError::persistence)?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        // The next read must observe the replacement, not a cached value.
        self.cache.invalidate().await;
        Ok(())
    }
}
