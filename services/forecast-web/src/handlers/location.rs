//! GET /location/:location - forecast page for one location.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Extension, Path},
    response::Html,
};
use metrics::{counter, histogram};
use tracing::{debug, instrument};

use surf_common::{
    is_valid_key, ArtifactLocator, ForecastModel, ModelTables, SurfError, SurfResult,
};

use crate::error::AppResult;
use crate::state::AppState;
use crate::views::location::{LocationPage, ModelPlots};

/// What a location page reads from disk.
struct LocationData {
    tables: ModelTables,
    plots: ModelPlots,
    tide_plot: Option<String>,
}

/// Tables first, so missing upstream data fails the request before any scan.
fn load_location_data(locator: &ArtifactLocator, key: &str) -> SurfResult<LocationData> {
    let tables = ModelTables::load(locator.layout(), key)?;
    let plots = ModelPlots {
        corrected: locator.find_forecast_plot(ForecastModel::Corrected, key)?,
        gfs: locator.find_forecast_plot(ForecastModel::GfsWave, key)?,
        ecmwf: locator.find_forecast_plot(ForecastModel::Ecmwf, key)?,
    };
    let tide_plot = locator.find_tide_plot(key)?;
    Ok(LocationData {
        tables,
        plots,
        tide_plot,
    })
}

#[instrument(skip(state))]
pub async fn location_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(location): Path<String>,
) -> AppResult<Html<String>> {
    counter!("surf_requests_total", "route" => "location").increment(1);

    if !is_valid_key(&location) {
        return Err(SurfError::InvalidLocationKey(location).into());
    }

    let started = Instant::now();
    let locator = state.locator.clone();
    let key = location.clone();
    let data = tokio::task::spawn_blocking(move || load_location_data(&locator, &key)).await??;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    histogram!("surf_location_load_duration_ms").record(elapsed_ms);
    debug!(location = %location, elapsed_ms, "Loaded location data");

    let entry = state
        .registry
        .get(&location)
        .ok_or_else(|| SurfError::UnknownLocation(location.clone()))?
        .clone();

    let page = LocationPage {
        entry,
        tables: data.tables,
        plots: data.plots,
        tide_plot: data.tide_plot,
    };
    Ok(Html(page.render()?))
}
