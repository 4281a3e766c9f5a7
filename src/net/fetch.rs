use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::catalog::{RsoRecord, SatcatNumber};
use crate::config::Config;

use super::RsoSource;

/// Error during fetch
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Base URL cannot take path segments: {0}")]
    OpaqueBase(String),
    #[error("Client error: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Failed to decode body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// `GET api/health` payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Health {
    pub status: String,
    pub rso_count: usize,
}

/// Catalog API client (blocking).
pub struct HttpSource {
    client: reqwest::blocking::Client,
    base: Url,
}

impl HttpSource {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Self::with_timeout(config.api_base.clone(), config.timeout)
    }

    pub fn with_timeout(base: Url, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("orbitr/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client, base })
    }

    /// Single record by catalog number. A 404 is `Ok(None)`.
    pub fn fetch_record(&self, satcat: &SatcatNumber) -> Result<Option<RsoRecord>, FetchError> {
        match self.get_json(self.record_url(satcat)?) {
            Ok(rec) => Ok(Some(rec)),
            Err(FetchError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn health(&self) -> Result<Health, FetchError> {
        self.get_json(self.endpoint("api/health")?)
    }

    /// Resolve a fixed API path such as `api/rso` against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        Ok(self.base.join(path)?)
    }

    /// `api/rso/<satcat>` with the id percent-encoded as one path segment.
    fn record_url(&self, satcat: &SatcatNumber) -> Result<Url, FetchError> {
        let mut url = self.endpoint("api/rso")?;
        url.path_segments_mut()
            .map_err(|()| FetchError::OpaqueBase(self.base.to_string()))?
            .pop_if_empty()
            .push(satcat.as_str());
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.json::<T>().map_err(FetchError::Decode)
    }
}

impl RsoSource for HttpSource {
    fn fetch_all_records(&self) -> Result<Vec<RsoRecord>, FetchError> {
        self.get_json(self.endpoint("api/rso")?)
    }

    fn fetch_catalog_size(&self) -> Result<usize, FetchError> {
        let catalog: Vec<serde_json::Value> =
            self.get_json(self.endpoint("api/rso/almanac/catalog")?)?;
        Ok(catalog.len())
    }
}
