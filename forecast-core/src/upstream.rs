//! HTTP client for the CWA open-data 36-hour city forecast dataset.

use reqwest::Client;
use serde::Deserialize;

use crate::error::ResolveError;

/// Production base URL of the CWA open-data API.
pub const DEFAULT_API_BASE: &str = "https://opendata.cwa.gov.tw/api";

const DATASET_PATH: &str = "/v1/rest/datastore/F-C0032-001";

#[derive(Debug, Clone)]
pub struct CwaClient {
    http: Client,
    base_url: String,
}

impl CwaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Issue the single GET against the forecast dataset. No retries; the
    /// client's default transport timeout is the only limit.
    pub async fn fetch_forecast(
        &self,
        api_key: &str,
        location_name: &str,
    ) -> Result<CwaResponse, ResolveError> {
        let url = format!("{}{}", self.base_url, DATASET_PATH);

        let res = self
            .http
            .get(&url)
            .query(&[("Authorization", api_key), ("locationName", location_name)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ResolveError::Upstream { status, body });
        }

        serde_json::from_str(&body).map_err(|e| ResolveError::MalformedUpstream {
            reason: format!("failed to parse CWA JSON: {e}"),
        })
    }
}

/// Top-level CWA response. Only the parts the resolver consumes are mirrored.
#[derive(Debug, Deserialize)]
pub struct CwaResponse {
    #[serde(default)]
    pub records: CwaRecords,
}

#[derive(Debug, Default, Deserialize)]
pub struct CwaRecords {
    #[serde(rename = "datasetDescription", default)]
    pub dataset_description: String,

    /// Exactly one entry when a single `locationName` is requested; empty when
    /// the CWA has no record for it.
    #[serde(default)]
    pub location: Vec<CwaLocation>,
}

#[derive(Debug, Deserialize)]
pub struct CwaLocation {
    #[serde(rename = "locationName", default)]
    pub location_name: String,

    #[serde(rename = "weatherElement", default)]
    pub weather_element: Vec<CwaWeatherElement>,
}

#[derive(Debug, Deserialize)]
pub struct CwaWeatherElement {
    #[serde(rename = "elementName", default)]
    pub element_name: String,

    #[serde(default)]
    pub time: Vec<CwaTime>,
}

#[derive(Debug, Deserialize)]
pub struct CwaTime {
    #[serde(rename = "startTime", default)]
    pub start_time: String,

    #[serde(rename = "endTime", default)]
    pub end_time: String,

    #[serde(default)]
    pub parameter: CwaParameter,
}

#[derive(Debug, Default, Deserialize)]
pub struct CwaParameter {
    #[serde(rename = "parameterName", default)]
    pub parameter_name: String,
}
