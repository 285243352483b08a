//! Flight Delay - delay chance prediction service
//!
//! Serves a static airport directory and a per-(day of week, airport)
//! delay chance, computed by one of several interchangeable predictors.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{sigmoid, AirportDirectory, DelayPredictor, LogisticModel, PredictionError};
pub use crate::models::{Airport, PredictRequest, PredictionResult};
pub use crate::services::{PredictionService, Predictor};
