use actix_web::HttpResponse;
use serde_json::json;

/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message"),
    ),
    tag = "meta"
)]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Welcome to E-Commerce Backend API" }))
}

/// GET /health
///
/// Liveness check; deliberately does not touch the store so a database
/// outage does not take it down too.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API is up"),
    ),
    tag = "meta"
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "healthy", "message": "API is running" }))
}
