//! Surf forecast web service.
//!
//! Serves a location map, per-location forecast pages and the plot files
//! behind them, all gated by a single HTTP Basic credential.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod state;
pub mod views;

use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Router};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router.
///
/// Everything except `/health` requires credentials.
pub fn build_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/", get(handlers::index::index_handler))
        .route(
            "/location/:location",
            get(handlers::location::location_handler),
        )
        .route(
            "/forecast_plots/:model/:filename",
            get(handlers::plots::forecast_plot_handler),
        )
        .route(
            "/tide_plots/:filename",
            get(handlers::plots::tide_plot_handler),
        )
        .route("/metrics", get(handlers::health::metrics_handler))
        .nest_service("/static", ServeDir::new(state.layout().static_dir()))
        .layer(middleware::from_fn_with_state(
            state.credentials.clone(),
            auth::require_basic_auth,
        ));

    let public = Router::new().route("/health", get(handlers::health::health_handler));

    protected
        .merge(public)
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}
