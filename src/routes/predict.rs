use actix_web::{web, HttpResponse, Responder};
use serde_json::{Map, Value};
use tracing::Instrument;
use crate::core::PredictionError;
use crate::models::{ErrorResponse, PredictRequest};
use super::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/predict", web::post().to(predict));
}

/// Predict the delay chance for a day of week and airport
///
/// POST /predict
///
/// Request body:
/// ```json
/// {
///   "dayOfWeekId": 3,
///   "airportId": 2
/// }
/// ```
///
/// The body must be a JSON object; arrays and scalars are rejected with 400.
async fn predict(
    state: web::Data<AppState>,
    body: web::Json<Map<String, Value>>,
) -> impl Responder {
    let req = match PredictRequest::try_from(body.into_inner()) {
        Ok(req) => req,
        Err(message) => {
            tracing::info!("Invalid predict request body: {}", message);
            return HttpResponse::BadRequest().json(ErrorResponse::new(message));
        }
    };

    let (day_of_week_id, airport_id) = match req.validated() {
        Ok(fields) => fields,
        Err(message) => {
            tracing::info!("Validation failed for predict request: {}", message);
            return HttpResponse::BadRequest().json(ErrorResponse::new(message));
        }
    };

    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("predict", %request_id, day_of_week_id, airport_id);

    async move {
        match state.service.predict(day_of_week_id, airport_id).await {
            Ok(result) => {
                tracing::debug!(
                    "delayChance={:.4} confidence={:.4}",
                    result.delay_chance,
                    result.confidence
                );
                HttpResponse::Ok().json(result)
            }
            Err(e) if e.is_invalid_input() => {
                tracing::info!("Rejected predict request: {}", e);
                HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()))
            }
            Err(e) => {
                match &e {
                    PredictionError::Exit { stderr, .. } | PredictionError::Stderr(stderr) => {
                        tracing::error!("Prediction failed: {} (stderr: {})", e, stderr);
                    }
                    _ => tracing::error!("Prediction failed: {}", e),
                }
                HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
            }
        }
    }
    .instrument(span)
    .await
}
