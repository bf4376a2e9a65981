//! Feed behavior against an in-memory remote source.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use current_feed::{CurrentFeed, CurrentFeedConfig, CurrentSource, RemoteAxis, RemoteDescription};
use hazard_common::{BoundsQuery, HazardError, HazardResult};

/// In-memory source with call counters and constant u/v components.
struct MockSource {
    n_lat: usize,
    n_lon: usize,
    u: f64,
    v: f64,
    describes: AtomicUsize,
    fetches: AtomicUsize,
}

impl MockSource {
    fn new(n_lat: usize, n_lon: usize, u: f64, v: f64) -> Self {
        Self {
            n_lat,
            n_lon,
            u,
            v,
            describes: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CurrentSource for MockSource {
    async fn describe(&self) -> HazardResult<RemoteDescription> {
        self.describes.fetch_add(1, Ordering::SeqCst);
        let mut axes = BTreeMap::new();
        axes.insert(
            "latitude".to_string(),
            RemoteAxis::Numeric((0..self.n_lat).map(|i| -30.0 + i as f64 * 0.1).collect()),
        );
        axes.insert(
            "longitude".to_string(),
            RemoteAxis::Numeric((0..self.n_lon).map(|i| 310.0 + i as f64 * 0.1).collect()),
        );
        axes.insert(
            "time".to_string(),
            RemoteAxis::Time(vec![
                Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 15, 1, 0, 0).unwrap(),
            ]),
        );
        Ok(RemoteDescription {
            axes,
            variables: vec!["uo".to_string(), "vo".to_string()],
        })
    }

    async fn fetch_slab(
        &self,
        var: &str,
        _time_index: usize,
        lat_range: Range<usize>,
        lon_range: Range<usize>,
    ) -> HazardResult<Vec<f64>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let component = match var {
            "uo" => self.u,
            "vo" => self.v,
            other => {
                return Err(HazardError::DataRead(format!("unknown variable {other}")));
            }
        };
        Ok(vec![component; lat_range.len() * lon_range.len()])
    }
}

fn config(ttl: Duration) -> CurrentFeedConfig {
    CurrentFeedConfig {
        cache_ttl: ttl,
        downsample_target: 2500,
        ..Default::default()
    }
}

#[tokio::test]
async fn snapshot_computes_vector_magnitude() {
    let feed = CurrentFeed::new(
        config(Duration::from_secs(300)),
        MockSource::new(10, 10, 3.0, 4.0),
    );

    let snapshot = feed
        .snapshot("2024-01-15T00:30:00Z", &BoundsQuery::default())
        .await
        .unwrap();

    // sqrt(3^2 + 4^2) everywhere; nearest time step is 01:00.
    assert!(snapshot
        .values
        .iter()
        .flatten()
        .all(|&speed| (speed - 5.0).abs() < 1e-12));
    assert_eq!(snapshot.time, Utc.with_ymd_and_hms(2024, 1, 15, 1, 0, 0).unwrap());
    assert_eq!(snapshot.lat.len(), 10);
    assert_eq!(snapshot.lon.len(), 10);
}

#[tokio::test]
async fn cache_hit_inside_ttl_avoids_remote_access() {
    let feed = CurrentFeed::new(
        config(Duration::from_secs(300)),
        MockSource::new(4, 4, 1.0, 0.0),
    );

    let first = feed
        .snapshot("2024-01-15T00:00:00Z", &BoundsQuery::default())
        .await
        .unwrap();
    let second = feed
        .snapshot("2024-01-15T00:00:00Z", &BoundsQuery::default())
        .await
        .unwrap();

    assert_eq!(first, second);
    // One describe, two component fetches, nothing for the second call.
    assert_eq!(feed.source().describes.load(Ordering::SeqCst), 1);
    assert_eq!(feed.source().fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn stale_entry_refetches_but_reuses_the_connection() {
    let feed = CurrentFeed::new(config(Duration::ZERO), MockSource::new(4, 4, 1.0, 0.0));

    feed.snapshot("2024-01-15T00:00:00Z", &BoundsQuery::default())
        .await
        .unwrap();
    feed.snapshot("2024-01-15T00:00:00Z", &BoundsQuery::default())
        .await
        .unwrap();

    // Zero TTL: both calls fetch, but the describe still happens once.
    assert_eq!(feed.source().describes.load(Ordering::SeqCst), 1);
    assert_eq!(feed.source().fetches.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn distinct_bboxes_are_distinct_cache_keys() {
    let feed = CurrentFeed::new(
        config(Duration::from_secs(300)),
        MockSource::new(8, 8, 0.0, 2.0),
    );

    let everywhere = feed
        .snapshot("2024-01-15T00:00:00Z", &BoundsQuery::default())
        .await
        .unwrap();
    let cropped = feed
        .snapshot(
            "2024-01-15T00:00:00Z",
            &BoundsQuery::new(Some(-30.0), Some(-29.75), None, None),
        )
        .await
        .unwrap();

    assert_eq!(everywhere.lat.len(), 8);
    assert_eq!(cropped.lat.len(), 3);
    assert_eq!(feed.source().fetches.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn large_grid_is_downsampled_toward_the_target() {
    let feed = CurrentFeed::new(
        config(Duration::from_secs(300)),
        MockSource::new(100, 100, 1.0, 1.0),
    );

    let snapshot = feed
        .snapshot("2024-01-15T00:00:00Z", &BoundsQuery::default())
        .await
        .unwrap();

    // 10,000 points against a 2,500 budget: stride 2 in both axes.
    assert_eq!(snapshot.lat.len(), 50);
    assert_eq!(snapshot.lon.len(), 50);
    assert_eq!(snapshot.values.len(), 50);
    assert_eq!(snapshot.values[0].len(), 50);
}

#[tokio::test]
async fn unparsable_time_is_rejected_before_any_fetch() {
    let feed = CurrentFeed::new(
        config(Duration::from_secs(300)),
        MockSource::new(4, 4, 1.0, 0.0),
    );

    let err = feed
        .snapshot("not-a-time", &BoundsQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, HazardError::InvalidTimestamp(_)));
    assert_eq!(feed.source().fetches.load(Ordering::SeqCst), 0);
}
