//! On-disk layout of the artifacts produced by the forecast pipeline.

use std::path::{Path, PathBuf};

use crate::model::ForecastModel;

pub const FORECAST_PLOTS_DIR: &str = "forecast_plots";
pub const TIDE_PLOTS_DIR: &str = "tide_plots";
pub const STATIC_DIR: &str = "static";
pub const FORECAST_TABLES_DIR: &str = "forecast_dfs";
pub const LOCATION_IMAGES_DIR: &str = "location_images";

/// Resolves every directory and file the service reads, relative to one root.
///
/// ```text
/// <root>/forecast_plots/<model>/<key>_<DATE>.<ext>
/// <root>/tide_plots/<key>...
/// <root>/static/forecast_dfs/<model>/<key>.csv
/// <root>/static/location_images/<display name>.png
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn forecast_plot_dir(&self, model: ForecastModel) -> PathBuf {
        self.root.join(FORECAST_PLOTS_DIR).join(model.dir_name())
    }

    pub fn tide_plot_dir(&self) -> PathBuf {
        self.root.join(TIDE_PLOTS_DIR)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.root.join(STATIC_DIR)
    }

    pub fn location_images_dir(&self) -> PathBuf {
        self.static_dir().join(LOCATION_IMAGES_DIR)
    }

    /// Path of the forecast table for one model and location.
    ///
    /// The key must already be validated with [`crate::location::is_valid_key`].
    pub fn forecast_table_path(&self, model: ForecastModel, key: &str) -> PathBuf {
        self.static_dir()
            .join(FORECAST_TABLES_DIR)
            .join(model.dir_name())
            .join(format!("{}.csv", key))
    }
}

impl Default for DataLayout {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_paths() {
        let layout = DataLayout::new("/srv/surf");
        assert_eq!(
            layout.forecast_table_path(ForecastModel::GfsWave, "jbay"),
            PathBuf::from("/srv/surf/static/forecast_dfs/gfs/jbay.csv")
        );
        assert_eq!(
            layout.forecast_table_path(ForecastModel::Corrected, "oahu"),
            PathBuf::from("/srv/surf/static/forecast_dfs/corrected/oahu.csv")
        );
    }

    #[test]
    fn test_plot_dirs() {
        let layout = DataLayout::new("/srv/surf");
        assert_eq!(
            layout.forecast_plot_dir(ForecastModel::Ecmwf),
            PathBuf::from("/srv/surf/forecast_plots/ecmwf")
        );
        assert_eq!(layout.tide_plot_dir(), PathBuf::from("/srv/surf/tide_plots"));
        assert_eq!(
            layout.location_images_dir(),
            PathBuf::from("/srv/surf/static/location_images")
        );
    }
}
