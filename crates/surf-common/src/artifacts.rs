//! Plot discovery by filename prefix.
//!
//! Plot files are written out of band with names like `jbay_20240101.html`.
//! Lookups list the directory and return the first name starting with the
//! location key, in directory listing order. Nothing is cached.

use std::io::ErrorKind;
use std::path::{Component, Path};

use crate::error::SurfResult;
use crate::layout::DataLayout;
use crate::model::ForecastModel;

/// Heading placeholder used when no forecast plot exists.
pub const NO_PLOTS_AVAILABLE: &str = "No Plots Available";

/// Finds plot artifacts for locations.
#[derive(Debug, Clone)]
pub struct ArtifactLocator {
    layout: DataLayout,
}

impl ArtifactLocator {
    pub fn new(layout: DataLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// First forecast plot of `model` whose name starts with `key`.
    pub fn find_forecast_plot(&self, model: ForecastModel, key: &str) -> SurfResult<Option<String>> {
        find_by_prefix(&self.layout.forecast_plot_dir(model), key)
    }

    /// First tide plot whose name starts with `key`.
    pub fn find_tide_plot(&self, key: &str) -> SurfResult<Option<String>> {
        find_by_prefix(&self.layout.tide_plot_dir(), key)
    }

    /// Nominal forecast date, taken from the first corrected plot in listing order.
    ///
    /// Returns [`NO_PLOTS_AVAILABLE`] when the directory is empty, and the raw
    /// file name when it does not follow the `prefix_DATE.ext` convention.
    pub fn forecast_date(&self) -> SurfResult<String> {
        let dir = self.layout.forecast_plot_dir(ForecastModel::Corrected);
        let first = list_file_names(&dir)?.into_iter().next();
        Ok(match first {
            Some(name) => match date_token(&name) {
                Some(token) => token.to_string(),
                None => {
                    tracing::warn!(file = %name, "Plot name has no date segment");
                    name
                }
            },
            None => NO_PLOTS_AVAILABLE.to_string(),
        })
    }
}

/// Extract `DATE` from `prefix_DATE.ext`: the second `_` segment, up to the first `.`.
///
/// Keys that themselves contain `_` (e.g. `el_salvador`) yield the wrong
/// segment; upstream naming is outside this service's control.
pub fn date_token(file_name: &str) -> Option<&str> {
    let segment = file_name.split('_').nth(1)?;
    segment.split('.').next()
}

/// Whether `name` is a single plain file name that cannot leave its directory.
pub fn is_safe_file_name(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\', '\0']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Return the first entry of `dir` whose name starts with `prefix`.
///
/// A missing directory is treated as empty.
pub fn find_by_prefix(dir: &Path, prefix: &str) -> SurfResult<Option<String>> {
    Ok(list_file_names(dir)?
        .into_iter()
        .find(|name| name.starts_with(prefix)))
}

/// Directory entry names in listing order. Non UTF-8 names are skipped.
fn list_file_names(dir: &Path) -> SurfResult<Vec<String>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(dir = %dir.display(), "Plot directory does not exist");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    Ok(names)
}
