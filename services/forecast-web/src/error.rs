//! Handler error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metrics::counter;
use thiserror::Error;
use tracing::{error, info};

use surf_common::SurfError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Surf(#[from] SurfError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Failed to serialize page data: {0}")]
    Render(#[from] serde_json::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Surf(e) => StatusCode::from_u16(e.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            AppError::Task(_) | AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::NOT_FOUND {
            info!(error = %self, "Not found");
            return (status, self.to_string()).into_response();
        }

        if let AppError::Surf(e) = &self {
            if e.is_upstream() {
                counter!("surf_upstream_missing_total").increment(1);
            }
        }
        error!(error = %self, "Request failed");
        // Paths and parser messages stay in the log.
        (status, "Internal Server Error").into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
