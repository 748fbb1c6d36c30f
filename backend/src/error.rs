use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("no UAV with id {0:?} in the current fleet")]
    UnknownUav(String),

    #[error(transparent)]
    UnknownCommand(#[from] uav_gcs_shared::UnknownCommand),

    #[error("the fleet is empty")]
    EmptyFleet,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// JSON error body: { "error": "..." }
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl DashboardError {
    pub fn status(&self) -> StatusCode {
        match self {
            DashboardError::UnknownUav(_) => StatusCode::NOT_FOUND,
            DashboardError::UnknownCommand(_) => StatusCode::BAD_REQUEST,
            DashboardError::EmptyFleet => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(%status, "request failed: {}", self);
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
