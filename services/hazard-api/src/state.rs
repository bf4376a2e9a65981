//! Application state for the hazard API.

use std::sync::Arc;

use anyhow::Result;
use climate_store::{ClimateReader, DatasetCatalog};
use current_feed::{CurrentFeed, CurrentFeedConfig, HttpCurrentSource};
use hazard_analytics::ScenarioService;

/// Shared application state.
pub struct AppState {
    /// Archival dataset access, with its process-wide handle cache.
    pub reader: Arc<ClimateReader>,

    /// Scenario comparison pipeline.
    pub scenarios: ScenarioService,

    /// Live current feed; absent until CURRENT_API_URL and the CMEMS
    /// credentials are configured.
    pub current: Option<CurrentFeed<HttpCurrentSource>>,
}

impl AppState {
    /// Create state from environment configuration.
    pub fn from_env() -> Result<Self> {
        let catalog = DatasetCatalog::from_env();
        tracing::info!(base_dir = %catalog.base_dir().display(), "archival dataset root");

        let reader = Arc::new(ClimateReader::new(catalog));
        let scenarios = ScenarioService::new(Arc::clone(&reader));

        let feed_config = CurrentFeedConfig::from_env();
        let current = if feed_config.is_configured() {
            let source = HttpCurrentSource::new(&feed_config)?;
            Some(CurrentFeed::new(feed_config, source))
        } else {
            tracing::info!("current feed not configured; /climate/current-snapshot disabled");
            None
        };

        Ok(Self {
            reader,
            scenarios,
            current,
        })
    }
}
