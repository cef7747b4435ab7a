//! Common test fixtures for surf forecast tests.
//!
//! This module provides sample forecast tables, credentials and a builder for
//! the on-disk data tree the service reads.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;

/// Sample forecast tables in the upstream CSV format.
pub mod tables {
    pub const HEADER: &str =
        "DateTime,Hsig_forecast,Tpeak_forecast,Wdir_forecast,wind_speed,wind_direction";

    /// Three corrected rows.
    pub const CORRECTED: &str = "\
DateTime,Hsig_forecast,Tpeak_forecast,Wdir_forecast,wind_speed,wind_direction
2024-01-01 00:00:00,1.456,12.4,225.4,9.6,181.6
2024-01-01 03:00:00,1.5,13.0,230.0,12.0,190.0
2024-01-01 06:00:00,1.75,13.6,235.5,8.4,200.0
";

    /// Shares its first two timestamps with [`CORRECTED`].
    pub const GFS: &str = "\
DateTime,Hsig_forecast,Tpeak_forecast,Wdir_forecast,wind_speed,wind_direction
2024-01-01 00:00:00,1.2,11.0,220.0,10.0,175.0
2024-01-01 03:00:00,1.3,11.5,222.0,11.0,178.0
";

    /// Starts three hours later than the other models.
    pub const ECMWF: &str = "\
DateTime,Hsig_forecast,Tpeak_forecast,Wdir_forecast,wind_speed,wind_direction
2024-01-01 03:00:00,1.6,14.0,240.0,7.0,160.0
2024-01-01 06:00:00,1.7,14.2,241.0,6.5,158.0
";

    pub const CORRECTED_TIMESTAMPS: [&str; 3] = [
        "2024-01-01 00:00:00",
        "2024-01-01 03:00:00",
        "2024-01-01 06:00:00",
    ];
}

/// Credentials used by service tests.
pub mod auth {
    use super::Engine;

    pub const USERNAME: &str = "SurfingAustralia";
    pub const PASSWORD: &str = "swell-2024";

    /// `Authorization` header value for HTTP Basic.
    pub fn basic_header(username: &str, password: &str) -> String {
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", username, password));
        format!("Basic {}", encoded)
    }
}

/// Common plot file names.
pub mod plots {
    pub const DATE: &str = "20240101";
    pub const JBAY_FORECAST: &str = "jbay_20240101.html";
    pub const JBAY_TIDE: &str = "jbay_tide.html";
    pub const PLOT_HTML: &str = "<html><body>forecast plot</body></html>";
}

/// A data tree rooted in a temporary directory.
///
/// Mirrors the layout produced by the forecast pipeline:
/// `forecast_plots/<model>/`, `tide_plots/`, `static/forecast_dfs/<model>/`
/// and `static/location_images/`.
pub struct DataTree {
    dir: tempfile::TempDir,
}

impl DataTree {
    /// An empty tree with all top-level directories created.
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("surf_data_")
            .tempdir()
            .expect("Failed to create temporary data tree");
        let tree = Self { dir };
        for model in ["corrected", "gfs", "ecmwf"] {
            tree.mkdir(&Path::new("forecast_plots").join(model));
            tree.mkdir(&Path::new("static/forecast_dfs").join(model));
        }
        tree.mkdir(Path::new("tide_plots"));
        tree.mkdir(Path::new("static/location_images"));
        tree
    }

    /// A tree with complete sample data for `key`: three tables, a plot per
    /// model and a tide plot.
    pub fn with_location(key: &str) -> Self {
        Self::new().add_complete_location(key)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn add_complete_location(self, key: &str) -> Self {
        let plot = format!("{}_{}.html", key, plots::DATE);
        self.add_table("corrected", key, tables::CORRECTED)
            .add_table("gfs", key, tables::GFS)
            .add_table("ecmwf", key, tables::ECMWF)
            .add_forecast_plot("corrected", &plot, plots::PLOT_HTML)
            .add_forecast_plot("gfs", &plot, plots::PLOT_HTML)
            .add_forecast_plot("ecmwf", &plot, plots::PLOT_HTML)
            .add_tide_plot(&format!("{}_tide.html", key), plots::PLOT_HTML)
    }

    pub fn add_table(self, model_dir: &str, key: &str, csv: &str) -> Self {
        self.write(
            &Path::new("static/forecast_dfs")
                .join(model_dir)
                .join(format!("{}.csv", key)),
            csv.as_bytes(),
        );
        self
    }

    pub fn add_forecast_plot(self, model_dir: &str, name: &str, contents: &str) -> Self {
        self.write(
            &Path::new("forecast_plots").join(model_dir).join(name),
            contents.as_bytes(),
        );
        self
    }

    pub fn add_tide_plot(self, name: &str, contents: &str) -> Self {
        self.write(&Path::new("tide_plots").join(name), contents.as_bytes());
        self
    }

    pub fn add_static_file(self, relative: &str, contents: &[u8]) -> Self {
        self.write(&Path::new("static").join(relative), contents);
        self
    }

    pub fn remove(self, relative: &str) -> Self {
        fs::remove_file(self.path(relative)).expect("Failed to remove fixture file");
        self
    }

    fn mkdir(&self, relative: &Path) {
        fs::create_dir_all(self.dir.path().join(relative))
            .expect("Failed to create fixture directory");
    }

    fn write(&self, relative: &Path, contents: &[u8]) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        fs::write(path, contents).expect("Failed to write fixture file");
    }
}

impl Default for DataTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_has_directories() {
        let tree = DataTree::new();
        assert!(tree.path("forecast_plots/corrected").is_dir());
        assert!(tree.path("forecast_plots/ecmwf").is_dir());
        assert!(tree.path("static/forecast_dfs/gfs").is_dir());
        assert!(tree.path("tide_plots").is_dir());
    }

    #[test]
    fn test_complete_location() {
        let tree = DataTree::with_location("jbay");
        assert!(tree.path("static/forecast_dfs/corrected/jbay.csv").is_file());
        assert!(tree.path("forecast_plots/gfs/jbay_20240101.html").is_file());
        assert!(tree.path("tide_plots/jbay_tide.html").is_file());
    }

    #[test]
    fn test_remove() {
        let tree = DataTree::with_location("jbay").remove("static/forecast_dfs/gfs/jbay.csv");
        assert!(!tree.path("static/forecast_dfs/gfs/jbay.csv").exists());
    }

    #[test]
    fn test_basic_header() {
        // "user:pass" in base64
        assert_eq!(auth::basic_header("user", "pass"), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_sample_tables_share_header() {
        for table in [tables::CORRECTED, tables::GFS, tables::ECMWF] {
            assert!(table.starts_with(tables::HEADER));
        }
    }
}
