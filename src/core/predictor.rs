use crate::core::scoring::LogisticModel;
use crate::models::{FlightFeatures, PredictionResult};
use rand::Rng;
use std::future::Future;
use std::process::ExitStatus;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while producing a prediction
///
/// `InvalidInput` is the caller's fault, every other variant is a
/// computation failure.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prediction failed due to invalid input or model")]
    NotANumber,

    #[error("Model references unknown feature: {0}")]
    UnknownFeature(String),

    #[error("Prediction out of range: delayChance={delay_chance}, confidence={confidence}")]
    OutOfRange { delay_chance: f64, confidence: f64 },

    #[error("Failed to start external predictor: {0}")]
    Spawn(#[source] std::io::Error),

    // stderr is kept for logging only, it never reaches the response body
    #[error("External predictor exited with {status}")]
    Exit { status: ExitStatus, stderr: String },

    #[error("External predictor reported an error")]
    Stderr(String),

    #[error("Failed to parse prediction result: {0}")]
    InvalidOutput(#[from] serde_json::Error),

    #[error("External predictor timed out after {0:?}")]
    Timeout(Duration),
}

impl PredictionError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PredictionError::InvalidInput(_))
    }
}

/// A strategy that turns a (day of week, airport) pair into a prediction
pub trait DelayPredictor: Send + Sync {
    fn predict(
        &self,
        day_of_week_id: i64,
        airport_id: i64,
    ) -> impl Future<Output = Result<PredictionResult, PredictionError>> + Send;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Random stub: uniform delay chance, confidence in [0.7, 1.0)
#[derive(Debug, Clone, Copy, Default)]
pub struct StochasticPredictor;

impl StochasticPredictor {
    pub fn sample(&self) -> PredictionResult {
        let mut rng = rand::thread_rng();
        let delay_chance: f64 = rng.gen();
        let confidence = 0.7 + rng.gen::<f64>() * 0.3;
        PredictionResult {
            delay_chance,
            confidence,
        }
    }
}

impl DelayPredictor for StochasticPredictor {
    async fn predict(
        &self,
        _day_of_week_id: i64,
        _airport_id: i64,
    ) -> Result<PredictionResult, PredictionError> {
        Ok(self.sample())
    }

    fn name(&self) -> &'static str {
        "stochastic"
    }
}

/// In-process logistic regression against a static coefficient table
///
/// Confidence is always 1: the model carries no uncertainty estimate.
#[derive(Debug, Clone)]
pub struct LogisticPredictor {
    model: Arc<LogisticModel>,
}

impl LogisticPredictor {
    pub fn new(model: Arc<LogisticModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &LogisticModel {
        &self.model
    }

    pub fn score(
        &self,
        day_of_week_id: i64,
        airport_id: i64,
    ) -> Result<PredictionResult, PredictionError> {
        let features = FlightFeatures::new(day_of_week_id, airport_id);
        let delay_chance = self.model.probability(&features)?;
        Ok(PredictionResult {
            delay_chance,
            confidence: 1.0,
        })
    }
}

impl DelayPredictor for LogisticPredictor {
    async fn predict(
        &self,
        day_of_week_id: i64,
        airport_id: i64,
    ) -> Result<PredictionResult, PredictionError> {
        self.score(day_of_week_id, airport_id)
    }

    fn name(&self) -> &'static str {
        "model"
    }
}
