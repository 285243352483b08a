// Service exports
pub mod data;
pub mod external;
pub mod prediction;

pub use data::{load_airports, load_model, LoadError};
pub use external::ExternalPredictor;
pub use prediction::{PredictionService, Predictor};
