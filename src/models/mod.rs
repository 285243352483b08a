// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Airport, FlightFeatures, PredictionResult};
pub use requests::PredictRequest;
pub use responses::{ErrorResponse, HealthResponse};
