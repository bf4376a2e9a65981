//! The remote dataset seam.

use std::collections::BTreeMap;
use std::ops::Range;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hazard_common::{HazardError, HazardResult};
use serde::Deserialize;

use crate::config::CurrentFeedConfig;

/// One coordinate axis of the remote dataset.
#[derive(Debug, Clone)]
pub enum RemoteAxis {
    Numeric(Vec<f64>),
    Time(Vec<DateTime<Utc>>),
}

/// Axis and variable inventory of the remote dataset, fetched once per
/// connection and reused for every snapshot.
#[derive(Debug, Clone, Default)]
pub struct RemoteDescription {
    pub axes: BTreeMap<String, RemoteAxis>,
    pub variables: Vec<String>,
}

impl RemoteDescription {
    pub fn axis_names(&self) -> Vec<String> {
        self.axes.keys().cloned().collect()
    }

    pub fn numeric_axis(&self, name: &str) -> HazardResult<&[f64]> {
        match self.axes.get(name) {
            Some(RemoteAxis::Numeric(values)) => Ok(values),
            _ => Err(HazardError::DataRead(format!(
                "remote axis '{name}' is not numeric"
            ))),
        }
    }

    pub fn time_axis(&self, name: &str) -> HazardResult<&[DateTime<Utc>]> {
        match self.axes.get(name) {
            Some(RemoteAxis::Time(values)) => Ok(values),
            _ => Err(HazardError::DataRead(format!(
                "remote axis '{name}' is not a time axis"
            ))),
        }
    }
}

/// A connection to the remote current dataset.
///
/// `describe` is called once per process (the feed memoizes it);
/// `fetch_slab` reads one 2-D hyperslab of one component field.
#[async_trait]
pub trait CurrentSource: Send + Sync {
    async fn describe(&self) -> HazardResult<RemoteDescription>;

    /// Fetch a row-major (lat, lon) slab of `var` at one time step.
    async fn fetch_slab(
        &self,
        var: &str,
        time_index: usize,
        lat_range: Range<usize>,
        lon_range: Range<usize>,
    ) -> HazardResult<Vec<f64>>;
}

/// HTTP implementation against the remote subsetting service.
pub struct HttpCurrentSource {
    client: reqwest::Client,
    endpoint: String,
    dataset_id: String,
    username: String,
    password: String,
}

impl HttpCurrentSource {
    /// Build the source, failing fast on missing configuration.
    ///
    /// Missing endpoint or credentials is a configuration error, never
    /// retried automatically.
    pub fn new(config: &CurrentFeedConfig) -> HazardResult<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| HazardError::RemoteAuth("CURRENT_API_URL is not set".to_string()))?;
        let (username, password) = match (config.username.clone(), config.password.clone()) {
            (Some(username), Some(password)) => (username, password),
            _ => {
                return Err(HazardError::RemoteAuth(
                    "CMEMS_USERNAME/CMEMS_PASSWORD are not set".to_string(),
                ))
            }
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| HazardError::DataRead(format!("http client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            dataset_id: config.dataset_id.clone(),
            username,
            password,
        })
    }

    fn map_request_error(err: reqwest::Error) -> HazardError {
        if err.is_timeout() {
            HazardError::RemoteTimeout(err.to_string())
        } else {
            HazardError::DataRead(format!("remote request failed: {err}"))
        }
    }

    fn check_status(response: reqwest::Response) -> HazardResult<reqwest::Response> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(HazardError::RemoteAuth(format!(
                "remote service rejected the credentials ({status})"
            )));
        }
        response
            .error_for_status()
            .map_err(Self::map_request_error)
    }
}

/// Wire format of the describe response.
#[derive(Debug, Deserialize)]
struct DescribeDto {
    axes: BTreeMap<String, AxisDto>,
    variables: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AxisDto {
    #[serde(default)]
    values: Option<Vec<f64>>,
    #[serde(default)]
    times: Option<Vec<DateTime<Utc>>>,
}

#[derive(Debug, Deserialize)]
struct SlabDto {
    values: Vec<f64>,
}

#[async_trait]
impl CurrentSource for HttpCurrentSource {
    async fn describe(&self) -> HazardResult<RemoteDescription> {
        let url = format!("{}/datasets/{}", self.endpoint, self.dataset_id);
        tracing::info!(%url, "opening remote current dataset");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(Self::map_request_error)?;
        let dto: DescribeDto = Self::check_status(response)?
            .json()
            .await
            .map_err(Self::map_request_error)?;

        let mut axes = BTreeMap::new();
        for (name, axis) in dto.axes {
            let axis = match (axis.values, axis.times) {
                (Some(values), _) => RemoteAxis::Numeric(values),
                (None, Some(times)) => RemoteAxis::Time(times),
                (None, None) => {
                    return Err(HazardError::DataRead(format!(
                        "remote axis '{name}' carries neither values nor times"
                    )))
                }
            };
            axes.insert(name, axis);
        }

        Ok(RemoteDescription {
            axes,
            variables: dto.variables,
        })
    }

    async fn fetch_slab(
        &self,
        var: &str,
        time_index: usize,
        lat_range: Range<usize>,
        lon_range: Range<usize>,
    ) -> HazardResult<Vec<f64>> {
        let url = format!("{}/datasets/{}/slab", self.endpoint, self.dataset_id);
        let expected = lat_range.len() * lon_range.len();

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .query(&[
                ("var", var.to_string()),
                ("time_index", time_index.to_string()),
                ("lat_start", lat_range.start.to_string()),
                ("lat_count", lat_range.len().to_string()),
                ("lon_start", lon_range.start.to_string()),
                ("lon_count", lon_range.len().to_string()),
            ])
            .send()
            .await
            .map_err(Self::map_request_error)?;
        let dto: SlabDto = Self::check_status(response)?
            .json()
            .await
            .map_err(Self::map_request_error)?;

        if dto.values.len() != expected {
            return Err(HazardError::DataRead(format!(
                "remote slab for '{var}' has {} values, expected {expected}",
                dto.values.len()
            )));
        }
        Ok(dto.values)
    }
}
