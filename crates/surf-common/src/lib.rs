//! Domain types shared by the surf forecast services.
//!
//! Everything here is read-only with respect to the data tree: locations are a
//! fixed table, forecast tables and plots are produced by an external pipeline.

pub mod artifacts;
pub mod error;
pub mod forecast;
pub mod layout;
pub mod location;
pub mod model;
pub mod overlay;

pub use artifacts::{is_safe_file_name, ArtifactLocator, NO_PLOTS_AVAILABLE};
pub use error::{SurfError, SurfResult};
pub use forecast::{ForecastRecord, ForecastTable, ModelTables};
pub use layout::DataLayout;
pub use location::{is_valid_key, ArrowLayout, LocationEntry, LocationRegistry};
pub use model::ForecastModel;
pub use overlay::{render_overlay, ArrowKind, ArrowPlacement, Overlay, OverlayError, ViewerState};
