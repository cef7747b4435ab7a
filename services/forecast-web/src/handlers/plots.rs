//! Plot file passthrough.
//!
//! Only the three model directories and the tide directory are served, and
//! only single plain file names within them.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metrics::counter;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{debug, instrument};

use surf_common::{is_safe_file_name, ForecastModel};

use crate::state::AppState;

/// GET /forecast_plots/:model/:filename
#[instrument(skip(state, request))]
pub async fn forecast_plot_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((model, filename)): Path<(String, String)>,
    request: Request,
) -> Response {
    counter!("surf_requests_total", "route" => "forecast_plot").increment(1);

    let Some(model) = ForecastModel::from_dir_name(&model) else {
        debug!(model = %model, "Rejected plot request for unknown model directory");
        return plot_not_found();
    };
    serve_plot(state.layout().forecast_plot_dir(model), &filename, request).await
}

/// GET /tide_plots/:filename
#[instrument(skip(state, request))]
pub async fn tide_plot_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(filename): Path<String>,
    request: Request,
) -> Response {
    counter!("surf_requests_total", "route" => "tide_plot").increment(1);
    serve_plot(state.layout().tide_plot_dir(), &filename, request).await
}

async fn serve_plot(dir: PathBuf, filename: &str, request: Request) -> Response {
    if !is_safe_file_name(filename) {
        debug!(filename, "Rejected unsafe plot file name");
        return plot_not_found();
    }

    let path = dir.join(filename);
    let response = match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    if response.status() == StatusCode::NOT_FOUND {
        debug!(path = %path.display(), "Plot not found");
        counter!("surf_plot_not_found_total").increment(1);
    }
    response.into_response()
}

fn plot_not_found() -> Response {
    counter!("surf_plot_not_found_total").increment(1);
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
