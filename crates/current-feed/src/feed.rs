//! TTL-cached current snapshots.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use chrono::{DateTime, Utc};
use climate_store::select::{axis_slice, nearest_time_index, normalize_lon_bounds};
use hazard_common::{
    axis::{LAT_CANDIDATES, LON_CANDIDATES, TIME_CANDIDATES},
    parse_instant, resolve_axis, sanitize_grid, sanitize_series, BoundsQuery, HazardError,
    HazardResult,
};
use serde_json::{json, Value};
use tokio::sync::OnceCell;

use crate::config::CurrentFeedConfig;
use crate::source::{CurrentSource, RemoteDescription};

/// Current speed over a region at one instant, already downsampled.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSnapshot {
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    /// Row-major (lat, lon) speed values in m/s.
    pub values: Vec<Vec<f64>>,
    pub time: DateTime<Utc>,
}

impl CurrentSnapshot {
    /// JSON payload with non-finite speeds sanitized to null.
    pub fn to_json(&self) -> Value {
        json!({
            "lat": sanitize_series(&self.lat),
            "lon": sanitize_series(&self.lon),
            "values": sanitize_grid(&self.values),
            "time": self.time.to_rfc3339(),
        })
    }
}

struct SnapshotEntry {
    fetched_at: Instant,
    payload: CurrentSnapshot,
}

/// TTL-keyed cache in front of a remote current source.
///
/// Entries are keyed by (dataset, time, bbox) and overwritten wholesale;
/// expiry is checked on read, so no eviction task is needed. Concurrent
/// misses on the same key may both fetch, with last-writer-wins on the
/// entry.
pub struct CurrentFeed<S: CurrentSource> {
    config: CurrentFeedConfig,
    source: S,
    description: OnceCell<RemoteDescription>,
    cache: Mutex<HashMap<String, SnapshotEntry>>,
}

impl<S: CurrentSource> CurrentFeed<S> {
    pub fn new(config: CurrentFeedConfig, source: S) -> Self {
        Self {
            config,
            source,
            description: OnceCell::new(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &CurrentFeedConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the current-speed snapshot nearest to `time` within `bounds`.
    pub async fn snapshot(
        &self,
        time: &str,
        bounds: &BoundsQuery,
    ) -> HazardResult<CurrentSnapshot> {
        let key = format!(
            "{}|{}|{}",
            self.config.dataset_id,
            time,
            bounds.cache_key()
        );

        if let Some(payload) = self.cached(&key) {
            tracing::debug!(%key, "current snapshot cache hit");
            return Ok(payload);
        }

        let payload = self.fetch(time, bounds).await?;

        self.cache.lock().expect("snapshot cache poisoned").insert(
            key,
            SnapshotEntry {
                fetched_at: Instant::now(),
                payload: payload.clone(),
            },
        );
        Ok(payload)
    }

    fn cached(&self, key: &str) -> Option<CurrentSnapshot> {
        let cache = self.cache.lock().expect("snapshot cache poisoned");
        cache
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.config.cache_ttl)
            .map(|entry| entry.payload.clone())
    }

    async fn fetch(&self, time: &str, bounds: &BoundsQuery) -> HazardResult<CurrentSnapshot> {
        // The remote connection is opened at most once and reused.
        let description = self
            .description
            .get_or_try_init(|| self.source.describe())
            .await?;

        let axis_names = description.axis_names();
        let lat_name = resolve_axis(&axis_names, LAT_CANDIDATES)?;
        let lon_name = resolve_axis(&axis_names, LON_CANDIDATES)?;
        let time_name = resolve_axis(&axis_names, TIME_CANDIDATES)?;

        let lats = description.numeric_axis(&lat_name)?;
        let lons = description.numeric_axis(&lon_name)?;
        let times = description.time_axis(&time_name)?;

        let target = parse_instant(time)
            .ok_or_else(|| HazardError::InvalidTimestamp(time.to_string()))?;
        let time_index = nearest_time_index(times, target).ok_or_else(|| {
            HazardError::DataRead("remote dataset has an empty time axis".to_string())
        })?;

        let lat_range = axis_slice(lats, bounds.lat_min, bounds.lat_max);
        let (lon_min, lon_max) = normalize_lon_bounds(lons, bounds.lon_min, bounds.lon_max);
        let lon_range = axis_slice(lons, lon_min, lon_max);

        let u = self
            .source
            .fetch_slab(
                &self.config.u_var,
                time_index,
                lat_range.clone(),
                lon_range.clone(),
            )
            .await?;
        let v = self
            .source
            .fetch_slab(
                &self.config.v_var,
                time_index,
                lat_range.clone(),
                lon_range.clone(),
            )
            .await?;

        let n_lon = lon_range.len();
        let speed: Vec<f64> = u
            .iter()
            .zip(&v)
            .map(|(u, v)| (u * u + v * v).sqrt())
            .collect();

        let lat_values: Vec<f64> = lats[lat_range].to_vec();
        let lon_values: Vec<f64> = lons[lon_range].to_vec();
        let stride = downsample_stride(
            lat_values.len() * lon_values.len(),
            self.config.downsample_target,
        );

        let lat_out: Vec<f64> = lat_values.iter().copied().step_by(stride).collect();
        let lon_out: Vec<f64> = lon_values.iter().copied().step_by(stride).collect();
        let mut rows = Vec::with_capacity(lat_out.len());
        for row_index in (0..lat_values.len()).step_by(stride) {
            let row = &speed[row_index * n_lon..(row_index + 1) * n_lon];
            rows.push(row.iter().copied().step_by(stride).collect());
        }

        tracing::debug!(
            points = lat_values.len() * lon_values.len(),
            stride,
            kept = lat_out.len() * lon_out.len(),
            "current snapshot fetched"
        );

        Ok(CurrentSnapshot {
            lat: lat_out,
            lon: lon_out,
            values: rows,
            time: times[time_index],
        })
    }
}

/// Uniform stride bringing `total_points` down toward `target_points`.
fn downsample_stride(total_points: usize, target_points: usize) -> usize {
    let target = target_points.max(1) as f64;
    let stride = (total_points as f64 / target).sqrt().ceil() as usize;
    stride.max(1)
}
