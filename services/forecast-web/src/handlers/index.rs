//! GET / - map of all locations.

use std::sync::Arc;

use axum::{extract::Extension, response::Html};
use metrics::counter;
use tracing::instrument;

use crate::error::AppResult;
use crate::state::AppState;
use crate::views::index::IndexPage;

#[instrument(skip(state))]
pub async fn index_handler(Extension(state): Extension<Arc<AppState>>) -> AppResult<Html<String>> {
    counter!("surf_requests_total", "route" => "index").increment(1);

    let locator = state.locator.clone();
    let date = tokio::task::spawn_blocking(move || locator.forecast_date()).await??;

    let page = IndexPage::new(date, &state.registry);
    Ok(Html(page.render()?))
}
