// Route exports
pub mod airports;
pub mod docs;
pub mod health;
pub mod predict;

use crate::config::{CorsSettings, Settings};
use crate::core::{AirportDirectory, DelayPredictor};
use crate::models::ErrorResponse;
use crate::services::{load_airports, LoadError, PredictionService, Predictor};
use actix_cors::Cors;
use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use std::sync::Arc;

/// Application state shared across all handlers
///
/// Everything in here is loaded once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<AirportDirectory>,
    pub service: PredictionService,
}

impl AppState {
    pub fn new(directory: Arc<AirportDirectory>, predictor: Predictor) -> Self {
        Self {
            service: PredictionService::new(directory.clone(), predictor),
            directory,
        }
    }

    /// Load the airport directory and the configured predictor
    pub async fn from_settings(settings: &Settings) -> Result<Self, LoadError> {
        let directory = match &settings.data.airports_path {
            Some(path) => {
                let directory = load_airports(path).await?;
                tracing::info!("Loaded {} airports from {}", directory.len(), path.display());
                directory
            }
            None => {
                tracing::info!("Using built-in airport list");
                AirportDirectory::builtin()
            }
        };

        let predictor = Predictor::from_settings(settings).await?;
        tracing::info!("Prediction strategy: {}", predictor.name());

        Ok(Self::new(Arc::new(directory), predictor))
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(airports::configure)
        .configure(predict::configure)
        .configure(docs::configure);
}

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.error.clone()))
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: format!("Invalid JSON body: {}", err),
    }
    .into()
}

/// JSON extractor configuration used by every JSON endpoint
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}

/// CORS policy for the browser client
///
/// Any origin is allowed when none are configured.
pub fn build_cors(settings: &CorsSettings) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_any_header()
        .max_age(3600);

    if settings.allowed_origins.is_empty() {
        return cors.allow_any_origin();
    }

    settings
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
