// Core prediction exports
pub mod directory;
pub mod predictor;
pub mod scoring;

pub use directory::{AirportDirectory, DirectoryError};
pub use predictor::{DelayPredictor, LogisticPredictor, PredictionError, StochasticPredictor};
pub use scoring::{sigmoid, LogisticModel, ModelError, ModelFile};
