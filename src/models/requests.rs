use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

/// Request body for `POST /predict`
///
/// Both fields are optional at the serde level so that a body missing
/// several fields reports all of them at once instead of failing on the
/// first one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(
        required(message = "dayOfWeekId is required"),
        range(min = 1, max = 7, message = "dayOfWeekId must be between 1 and 7")
    )]
    #[serde(alias = "day_of_week_id", rename = "dayOfWeekId")]
    pub day_of_week_id: Option<i64>,
    #[validate(required(message = "airportId is required"))]
    #[serde(alias = "airport_id", rename = "airportId")]
    pub airport_id: Option<i64>,
}

impl PredictRequest {
    pub fn new(day_of_week_id: i64, airport_id: i64) -> Self {
        Self {
            day_of_week_id: Some(day_of_week_id),
            airport_id: Some(airport_id),
        }
    }

    /// Validate the request and return `(day_of_week_id, airport_id)`
    ///
    /// The error is a human readable description naming every offending field.
    pub fn validated(&self) -> Result<(i64, i64), String> {
        self.validate().map_err(|errors| describe_errors(&errors))?;

        match (self.day_of_week_id, self.airport_id) {
            (Some(day), Some(airport)) => Ok((day, airport)),
            _ => Err("dayOfWeekId and airportId are required".to_string()),
        }
    }
}

/// Build a request from a JSON object body
///
/// Taking a map rather than deserializing the body directly keeps serde from
/// accepting the positional array form (`[3, 2]`) of the struct.
impl TryFrom<Map<String, Value>> for PredictRequest {
    type Error = String;

    fn try_from(body: Map<String, Value>) -> Result<Self, Self::Error> {
        serde_json::from_value(Value::Object(body))
            .map_err(|e| format!("Invalid request body: {}", e))
    }
}

fn describe_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();

    messages.sort();
    messages.join("; ")
}
