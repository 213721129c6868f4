use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use doortime_core::prelude::*;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ServerError;

/// Where outdoor durations come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    #[default]
    Mapbox,
    StraightLine,
    /// Only requests carrying a precomputed outdoor duration succeed
    None,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutdoorSection {
    pub provider: ProviderKind,
    #[serde(flatten)]
    pub mapbox: MapboxConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Building catalog JSON; relative paths resolve against the config file
    pub catalog: PathBuf,
    pub request_timeout_secs: u64,
    /// Requests in flight across all routes
    pub concurrency_limit: usize,
    pub outdoor: OutdoorSection,
    /// Server-wide indoor defaults, overridden per request
    pub indoor: IndoorParams,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            catalog: PathBuf::from("data/campus_buildings.json"),
            request_timeout_secs: 20,
            concurrency_limit: 64,
            outdoor: OutdoorSection::default(),
            indoor: IndoorParams::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(toml: &str) -> Result<Self, ServerError> {
        let config: Self = toml::from_str(toml)?;
        // Catch bad numbers at startup rather than on the first request
        config.indoor.resolve()?;
        if config.concurrency_limit == 0 {
            return Err(ServerError::Config(
                "concurrency_limit must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ServerError> {
        let toml = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("Failed to read config '{}': {e}", path.display()))
        })?;
        let mut config = Self::from_toml_str(&toml)?;

        if config.catalog.is_relative() {
            if let Some(dir) = path.parent() {
                config.catalog = dir.join(&config.catalog);
            }
        }
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn build_provider(&self) -> Result<Option<Arc<dyn OutdoorDurationProvider>>, ServerError> {
        match self.outdoor.provider {
            ProviderKind::Mapbox => {
                if self.outdoor.mapbox.access_token.is_none() {
                    warn!(
                        "No Mapbox access token configured; only requests with a precomputed \
                        outdoor duration will succeed"
                    );
                }
                let provider = MapboxDirections::new(self.outdoor.mapbox.clone())?;
                Ok(Some(Arc::new(provider)))
            }
            ProviderKind::StraightLine => {
                info!("Using straight-line walking estimates for the outdoor leg");
                Ok(Some(Arc::new(StraightLineWalking::default())))
            }
            ProviderKind::None => Ok(None),
        }
    }
}
