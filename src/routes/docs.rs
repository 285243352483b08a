use actix_web::{web, HttpResponse, Responder};
use serde_json::{json, Value};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/docs", web::get().to(docs));
}

/// OpenAPI description of the public endpoints
async fn docs() -> impl Responder {
    HttpResponse::Ok().json(openapi())
}

pub fn openapi() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Flight delay prediction API",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/health": { "get": health_operation() },
            "/airports": { "get": airports_operation() },
            "/predict": { "post": predict_operation() }
        }
    })
}

fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

fn error_schema() -> Value {
    json!({
        "type": "object",
        "required": ["error"],
        "properties": { "error": { "type": "string" } }
    })
}

fn health_operation() -> Value {
    let schema = json!({
        "type": "object",
        "properties": { "status": { "type": "string", "example": "ok" } }
    });

    json!({
        "summary": "Health check",
        "responses": {
            "200": { "description": "Service is up", "content": json_content(schema) }
        }
    })
}

fn airports_operation() -> Value {
    let airport = json!({
        "type": "object",
        "required": ["id", "name"],
        "properties": {
            "id": { "type": "integer" },
            "name": { "type": "string" }
        }
    });
    let schema = json!({ "type": "array", "items": airport });

    json!({
        "summary": "List airports sorted by name",
        "responses": {
            "200": { "description": "Airports", "content": json_content(schema) }
        }
    })
}

fn predict_operation() -> Value {
    let request = json!({
        "type": "object",
        "required": ["dayOfWeekId", "airportId"],
        "properties": {
            "dayOfWeekId": { "type": "integer", "minimum": 1, "maximum": 7 },
            "airportId": { "type": "integer" }
        }
    });
    let response = json!({
        "type": "object",
        "required": ["delayChance", "confidence"],
        "properties": {
            "delayChance": { "type": "number", "minimum": 0, "maximum": 1 },
            "confidence": { "type": "number", "minimum": 0, "exclusiveMinimum": true, "maximum": 1 }
        }
    });

    json!({
        "summary": "Predict the delay chance for a day of week and airport",
        "requestBody": { "required": true, "content": json_content(request) },
        "responses": {
            "200": { "description": "Prediction", "content": json_content(response) },
            "400": { "description": "Malformed or incomplete request", "content": json_content(error_schema()) },
            "500": { "description": "Prediction failed", "content": json_content(error_schema()) }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_paths() {
        let doc = openapi();
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/health"));
        assert!(paths.contains_key("/airports"));
        assert!(paths.contains_key("/predict"));
    }

    #[test]
    fn test_predict_request_schema_names_required_fields() {
        let doc = openapi();
        let required = &doc["paths"]["/predict"]["post"]["requestBody"]["content"]
            ["application/json"]["schema"]["required"];
        assert_eq!(required, &json!(["dayOfWeekId", "airportId"]));
    }
}
