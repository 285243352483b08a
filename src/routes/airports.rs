use actix_web::{web, HttpResponse, Responder};
use super::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/airports", web::get().to(list_airports));
}

/// List airports
///
/// GET /airports
///
/// Returns every airport as `{ "id": 1, "name": "..." }`, ascending by name.
async fn list_airports(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.directory.list())
}
