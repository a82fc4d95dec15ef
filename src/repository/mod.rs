//! AQI repository: the production [`DataSource`].
//!
//! Fetches the `aqx_p_432` dataset (real-time AQI per monitoring site) and
//! splits it into high and low groups by PM2.5.
//!
//! ```text
//! GET {api_url}?format=json&limit={record_limit}&api_key={key}
//!        │
//!        ▼
//! {"records": [...]}  or  [...]
//!        │ partition_by_pm25
//!        ▼
//! PollutedInfo { high, low }
//! ```

mod partition;

pub use partition::{partition_by_pm25, DEFAULT_HIGH_THRESHOLD};

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{classify_http_error, FetchError};
use crate::models::Record;
use crate::startup::AppConfig;
use crate::traits::{DataSource, Headers, HttpClient, PollutedInfo};

/// Real-time AQI dataset on the Ministry of Environment open data platform.
pub const DEFAULT_API_URL: &str = "https://data.moenv.gov.tw/api/v2/aqx_p_432";

/// Number of records requested per fetch; the dataset has fewer than 100 sites.
pub const DEFAULT_RECORD_LIMIT: u32 = 1000;

/// Longest slice of an error body kept in `FetchError::HttpStatus`.
const MAX_ERROR_BODY: usize = 200;

/// Response body shapes served by the platform.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedBody {
    Envelope { records: Vec<Record> },
    Bare(Vec<Record>),
}

impl FeedBody {
    fn into_records(self) -> Vec<Record> {
        match self {
            FeedBody::Envelope { records } | FeedBody::Bare(records) => records,
        }
    }
}

pub struct AqiRepository<C: HttpClient> {
    client: C,
    api_url: String,
    api_key: Option<String>,
    record_limit: u32,
    high_threshold: f64,
    request_timeout: Duration,
}

impl<C: HttpClient> AqiRepository<C> {
    pub fn new(client: C, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key: None,
            record_limit: DEFAULT_RECORD_LIMIT,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn from_config(client: C, config: &AppConfig) -> Self {
        let mut repo = Self::new(client, config.api_url.clone())
            .with_record_limit(config.record_limit)
            .with_high_threshold(config.high_threshold)
            .with_request_timeout(config.fetch_timeout());
        repo.api_key = config.api_key.clone();
        repo
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_record_limit(mut self, limit: u32) -> Self {
        self.record_limit = limit;
        self
    }

    pub fn with_high_threshold(mut self, threshold: f64) -> Self {
        self.high_threshold = threshold;
        self
    }

    /// Timeout reported in `FetchError::Timeout`. The HTTP client enforces it.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Full request URL including query parameters.
    pub fn request_url(&self) -> Result<String, FetchError> {
        let mut url = reqwest::Url::parse(&self.api_url).map_err(|e| FetchError::Other {
            message: format!("invalid API URL '{}': {}", self.api_url, e),
        })?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("format", "json");
            query.append_pair("limit", &self.record_limit.to_string());
            if let Some(key) = &self.api_key {
                query.append_pair("api_key", key);
            }
        }
        Ok(url.into())
    }

    /// Fetch and decode all records, unpartitioned.
    pub async fn fetch_records(&self) -> Result<Vec<Record>, FetchError> {
        let url = self.request_url()?;
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        tracing::debug!(url = %self.api_url, "Requesting AQI records");
        let response = self
            .client
            .get(&url, &headers)
            .await
            .map_err(|e| classify_http_error(e, &self.api_url, self.request_timeout))?;

        if !response.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(FetchError::HttpStatus {
                status: response.status,
                message: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let body: FeedBody = response.json().map_err(|e| FetchError::InvalidResponse {
            message: e.to_string(),
        })?;
        let records = body.into_records();
        tracing::info!(count = records.len(), "Fetched AQI records");
        Ok(records)
    }
}

#[async_trait]
impl<C: HttpClient> DataSource for AqiRepository<C> {
    async fn fetch_polluted_info(&self) -> Result<PollutedInfo, FetchError> {
        let records = self.fetch_records().await?;
        Ok(partition_by_pm25(records, self.high_threshold))
    }
}
