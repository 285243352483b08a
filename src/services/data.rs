use crate::core::{AirportDirectory, DirectoryError, LogisticModel, ModelError, ModelFile};
use crate::models::Airport;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading static data at startup
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid model in {}: {}", .path.display(), .source)]
    Model {
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    #[error("Invalid airport data: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Invalid settings: {0}")]
    Settings(String),
}

async fn read(path: &Path) -> Result<Vec<u8>, LoadError> {
    tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the airport directory from a JSON array of `{id, name}` objects
pub async fn load_airports(path: &Path) -> Result<AirportDirectory, LoadError> {
    let bytes = read(path).await?;
    let airports: Vec<Airport> =
        serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(AirportDirectory::new(airports)?)
}

/// Load the logistic regression coefficients from a model file
pub async fn load_model(path: &Path) -> Result<LogisticModel, LoadError> {
    let bytes = read(path).await?;
    let file: ModelFile = serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    LogisticModel::try_from(file).map_err(|source| LoadError::Model {
        path: path.to_path_buf(),
        source,
    })
}
