use crate::config::{PredictionStrategy, Settings};
use crate::core::{
    AirportDirectory, DelayPredictor, LogisticPredictor, PredictionError, StochasticPredictor,
};
use crate::models::PredictionResult;
use crate::services::data::{load_model, LoadError};
use crate::services::external::ExternalPredictor;
use std::sync::Arc;

/// The prediction strategy picked at startup
#[derive(Debug, Clone)]
pub enum Predictor {
    Stochastic(StochasticPredictor),
    Logistic(LogisticPredictor),
    External(ExternalPredictor),
}

impl Predictor {
    /// Build the configured strategy, loading the model file when needed
    pub async fn from_settings(settings: &Settings) -> Result<Self, LoadError> {
        let prediction = &settings.prediction;
        match prediction.strategy {
            PredictionStrategy::Stochastic => Ok(Predictor::Stochastic(StochasticPredictor)),
            PredictionStrategy::Model => {
                let model = load_model(&settings.data.model_path).await?;
                tracing::info!(
                    "Loaded model from {} with features {:?}",
                    settings.data.model_path.display(),
                    model.feature_names()
                );
                Ok(Predictor::Logistic(LogisticPredictor::new(Arc::new(model))))
            }
            PredictionStrategy::External => {
                if prediction.process.program.trim().is_empty() {
                    return Err(LoadError::Settings(
                        "prediction.process.program must not be empty".to_string(),
                    ));
                }
                if prediction.process.timeout_secs == 0 {
                    return Err(LoadError::Settings(
                        "prediction.process.timeout_secs must be positive".to_string(),
                    ));
                }
                let predictor = ExternalPredictor::from_settings(&prediction.process);
                tracing::info!(
                    "Delegating predictions to {} (timeout {:?})",
                    predictor.program(),
                    predictor.timeout()
                );
                Ok(Predictor::External(predictor))
            }
        }
    }
}

impl DelayPredictor for Predictor {
    async fn predict(
        &self,
        day_of_week_id: i64,
        airport_id: i64,
    ) -> Result<PredictionResult, PredictionError> {
        match self {
            Predictor::Stochastic(p) => p.predict(day_of_week_id, airport_id).await,
            Predictor::Logistic(p) => p.predict(day_of_week_id, airport_id).await,
            Predictor::External(p) => p.predict(day_of_week_id, airport_id).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Predictor::Stochastic(p) => p.name(),
            Predictor::Logistic(p) => p.name(),
            Predictor::External(p) => p.name(),
        }
    }
}

/// Validates inputs against the airport directory, runs the configured
/// predictor and checks the result bounds
#[derive(Debug, Clone)]
pub struct PredictionService<P = Predictor> {
    directory: Arc<AirportDirectory>,
    predictor: P,
}

impl<P: DelayPredictor> PredictionService<P> {
    pub fn new(directory: Arc<AirportDirectory>, predictor: P) -> Self {
        Self {
            directory,
            predictor,
        }
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    pub async fn predict(
        &self,
        day_of_week_id: i64,
        airport_id: i64,
    ) -> Result<PredictionResult, PredictionError> {
        if !(1..=7).contains(&day_of_week_id) {
            return Err(PredictionError::InvalidInput(format!(
                "dayOfWeekId must be between 1 and 7, got {}",
                day_of_week_id
            )));
        }
        if !self.directory.contains(airport_id) {
            return Err(PredictionError::InvalidInput(format!(
                "unknown airportId {}",
                airport_id
            )));
        }

        let result = self.predictor.predict(day_of_week_id, airport_id).await?;

        if !result.is_within_bounds() {
            return Err(PredictionError::OutOfRange {
                delay_chance: result.delay_chance,
                confidence: result.confidence,
            });
        }

        Ok(result)
    }
}
