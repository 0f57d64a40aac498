use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to the Adaptive Learning quiz API"
    }))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let store_health = state.quiz_attempt_service.health_check().await;
    if let Err(err) = &store_health {
        log::warn!("Readiness check failed: {}", err);
    }

    let response = serde_json::json!({
        "status": if store_health.is_ok() { "ready" } else { "not_ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "mongodb": if store_health.is_ok() { "ok" } else { "error" },
            "quiz_engine": if state.config.quiz_engine_url.is_some() { "configured" } else { "unconfigured" }
        }
    });

    if store_health.is_ok() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[get("/health/live")]
pub async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(root)
        .service(health_check)
        .service(health_check_ready)
        .service(health_check_live);
}
