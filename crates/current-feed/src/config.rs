//! Configuration for the remote current feed.

use std::time::Duration;

/// Environment-driven settings for the live current source.
#[derive(Debug, Clone)]
pub struct CurrentFeedConfig {
    /// Remote dataset identifier.
    pub dataset_id: String,
    /// Base URL of the remote subsetting service.
    pub endpoint: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Eastward component variable name.
    pub u_var: String,
    /// Northward component variable name.
    pub v_var: String,
    /// How long a cached snapshot stays valid.
    pub cache_ttl: Duration,
    /// Approximate number of grid points a snapshot is reduced to.
    pub downsample_target: usize,
    /// Upper bound on every remote call.
    pub timeout: Duration,
}

impl Default for CurrentFeedConfig {
    fn default() -> Self {
        Self {
            dataset_id: "cmems_mod_glo_phy_anfc_0.083deg_PT1H-m".to_string(),
            endpoint: None,
            username: None,
            password: None,
            u_var: "uo".to_string(),
            v_var: "vo".to_string(),
            cache_ttl: Duration::from_secs(300),
            downsample_target: 2500,
            timeout: Duration::from_secs(60),
        }
    }
}

impl CurrentFeedConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("CMEMS_DATASET_ID") {
            config.dataset_id = val;
        }
        if let Ok(val) = std::env::var("CURRENT_API_URL") {
            config.endpoint = Some(val);
        }
        config.username = std::env::var("CMEMS_USERNAME").ok();
        config.password = std::env::var("CMEMS_PASSWORD").ok();

        if let Ok(val) = std::env::var("CMEMS_U_VAR") {
            config.u_var = val;
        }
        if let Ok(val) = std::env::var("CMEMS_V_VAR") {
            config.v_var = val;
        }
        if let Ok(val) = std::env::var("CMEMS_CACHE_TTL_SECONDS") {
            if let Ok(secs) = val.parse() {
                config.cache_ttl = Duration::from_secs(secs);
            }
        }
        if let Ok(val) = std::env::var("CMEMS_DOWNSAMPLE_TARGET") {
            if let Ok(target) = val.parse() {
                config.downsample_target = target;
            }
        }
        if let Ok(val) = std::env::var("CURRENT_TIMEOUT_SECONDS") {
            if let Ok(secs) = val.parse() {
                config.timeout = Duration::from_secs(secs);
            }
        }

        config
    }

    /// Whether enough configuration is present to reach the remote feed.
    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some() && self.username.is_some() && self.password.is_some()
    }
}
