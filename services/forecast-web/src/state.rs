//! Application state shared by all handlers.

use std::sync::Arc;

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{info, warn};

use surf_common::{ArtifactLocator, DataLayout, ForecastModel, LocationRegistry};

use crate::auth::Credentials;
use crate::config::ServerConfig;

/// Shared application state. Read-only after startup.
pub struct AppState {
    /// Locations and their arrow layouts.
    pub registry: LocationRegistry,

    /// Plot discovery over the data tree.
    pub locator: ArtifactLocator,

    /// Configured access credentials.
    pub credentials: Arc<Credentials>,

    /// Render handle for GET /metrics, absent when no recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new AppState from a validated configuration.
    pub fn new(config: &ServerConfig, prometheus: Option<PrometheusHandle>) -> Result<Self> {
        config.validate()?;

        let registry = config.load_registry()?;
        let layout = config.layout();
        warn_missing_dirs(&layout);

        info!(
            data_dir = %layout.root().display(),
            locations = registry.len(),
            "Application state initialized"
        );

        Ok(Self {
            registry,
            locator: ArtifactLocator::new(layout),
            credentials: Arc::new(config.credentials.clone()),
            prometheus,
        })
    }

    pub fn layout(&self) -> &DataLayout {
        self.locator.layout()
    }
}

/// Missing directories are served as empty, but usually mean a wrong `--data-dir`.
fn warn_missing_dirs(layout: &DataLayout) {
    let dirs = ForecastModel::ALL
        .iter()
        .map(|model| layout.forecast_plot_dir(*model))
        .chain([layout.tide_plot_dir(), layout.static_dir()]);
    for dir in dirs {
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "Data directory does not exist");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_rejects_invalid_config() {
        let config = ServerConfig::new(".", Credentials::new("surfer", ""));
        assert!(AppState::new(&config, None).is_err());
    }

    #[test]
    fn test_state_uses_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::new(dir.path(), Credentials::new("surfer", "secret"));
        let state = AppState::new(&config, None).unwrap();
        assert_eq!(state.layout().root(), dir.path());
        assert!(state.registry.contains("jbay"));
    }
}
