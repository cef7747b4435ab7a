//! Server configuration.
//!
//! Values come from command-line flags or the environment (see `main.rs`);
//! this module only validates them and derives the data layout and registry.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::info;

use surf_common::{DataLayout, LocationRegistry};

use crate::auth::Credentials;

/// Default username for the access guard.
pub const DEFAULT_USERNAME: &str = "SurfingAustralia";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Root of the data tree written by the forecast pipeline.
    pub data_dir: PathBuf,

    pub credentials: Credentials,

    /// Accept an empty configured password. Without this flag startup fails.
    pub allow_empty_password: bool,

    /// Optional YAML file replacing the built-in location table.
    pub locations_file: Option<PathBuf>,
}

impl ServerConfig {
    pub fn new(data_dir: impl Into<PathBuf>, credentials: Credentials) -> Self {
        Self {
            data_dir: data_dir.into(),
            credentials,
            allow_empty_password: false,
            locations_file: None,
        }
    }

    pub fn with_allow_empty_password(mut self, allow: bool) -> Self {
        self.allow_empty_password = allow;
        self
    }

    pub fn with_locations_file(mut self, path: Option<PathBuf>) -> Self {
        self.locations_file = path;
        self
    }

    /// Reject configurations the server must not start with.
    pub fn validate(&self) -> Result<()> {
        if self.credentials.username().is_empty() {
            bail!("Username must not be empty");
        }
        if self.credentials.has_empty_password() && !self.allow_empty_password {
            bail!(
                "No password configured. Set SURF_PASSWORD, or pass --allow-empty-password \
                 to accept an empty password"
            );
        }
        Ok(())
    }

    pub fn layout(&self) -> DataLayout {
        DataLayout::new(&self.data_dir)
    }

    /// The built-in locations, or the ones in `locations_file` when set.
    pub fn load_registry(&self) -> Result<LocationRegistry> {
        match &self.locations_file {
            Some(path) => LocationRegistry::from_yaml_file(path)
                .with_context(|| format!("Failed to load locations from {}", path.display())),
            None => {
                info!("Using built-in location registry");
                Ok(LocationRegistry::builtin())
            }
        }
    }
}
