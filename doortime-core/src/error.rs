use thiserror::Error;

use crate::outdoor::ProviderError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Outdoor provider error: {0}")]
    Provider(ProviderError),
    #[error("Invalid building data: {0}")]
    InvalidBuildingData(String),
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

impl From<ProviderError> for Error {
    fn from(err: ProviderError) -> Self {
        match err {
            // A provider without credentials is a deployment problem, not an upstream one
            ProviderError::Unavailable(reason) => Error::Configuration(reason),
            other => Error::Provider(other),
        }
    }
}
