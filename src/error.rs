use thiserror::Error;

use crate::model::species::Species;

pub type Result<T> = std::result::Result<T, EnrichError>;

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("unrecognized species '{0}' (use avium|abscessus)")]
    UnknownSpecies(String),

    #[error("{operation} is not supported for species {species}")]
    NotSupported {
        operation: &'static str,
        species: Species,
    },

    #[error("missing input: {0}")]
    MissingInput(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{service} service error: {message}")]
    Service {
        service: &'static str,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EnrichError {
    pub fn not_supported(operation: &'static str, species: Species) -> Self {
        Self::NotSupported { operation, species }
    }

    pub fn service(service: &'static str, message: impl Into<String>) -> Self {
        Self::Service {
            service,
            message: message.into(),
        }
    }
}
