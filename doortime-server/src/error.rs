use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use doortime_core::{Error as CoreError, ProviderError};
use serde_json::json;
use thiserror::Error;

/// Failures while starting the server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Outdoor provider setup failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a single API request
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unknown building: {0}")]
    UnknownBuilding(String),
    #[error(transparent)]
    Estimate(#[from] CoreError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownBuilding(_) => StatusCode::NOT_FOUND,
            ApiError::Estimate(err) => match err {
                CoreError::InvalidParameters(_) | CoreError::InvalidData(_) => {
                    StatusCode::BAD_REQUEST
                }
                CoreError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
                CoreError::Provider(ProviderError::RouteNotFound(_)) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                CoreError::Provider(_) => StatusCode::BAD_GATEWAY,
                CoreError::InvalidBuildingData(_)
                | CoreError::IoError(_)
                | CoreError::Json(_)
                | CoreError::GeoJson(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {self}");
        } else {
            tracing::debug!("Request rejected: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
