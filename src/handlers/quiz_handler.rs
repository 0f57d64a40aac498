use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::request::{GenerateQuizRequest, HistoryQuery, RecentAttemptsQuery, SubmitQuizRequest},
};

fn log_failure(req: &HttpRequest, action: &str, err: &AppError) {
    log::warn!(
        "{} failed [request {}]: {}",
        action,
        get_request_id(req).unwrap_or_else(|| "-".to_string()),
        err
    );
}

#[post("/quiz/generate")]
pub async fn generate_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let question_set = state
        .quiz_service
        .generate_quiz(request)
        .await
        .inspect_err(|e| log_failure(&req, "Quiz generation", e))?;
    Ok(HttpResponse::Ok().json(question_set))
}

#[post("/quiz/submit")]
pub async fn submit_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<SubmitQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let response = state
        .quiz_attempt_service
        .submit(request)
        .await
        .inspect_err(|e| log_failure(&req, "Quiz submission", e))?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/quiz/recent")]
pub async fn recent_attempts(
    state: web::Data<AppState>,
    query: web::Query<RecentAttemptsQuery>,
) -> Result<HttpResponse, AppError> {
    let attempts = state.history_service.recent(&query).await?;
    Ok(HttpResponse::Ok().json(attempts))
}

#[get("/quiz/attempt/{attempt_id}")]
pub async fn get_attempt(
    state: web::Data<AppState>,
    attempt_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let attempt = state.quiz_attempt_service.get_attempt(&attempt_id).await?;
    Ok(HttpResponse::Ok().json(attempt))
}

#[get("/quiz/history")]
pub async fn history_preview(
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, AppError> {
    let preview = state.history_service.preview(&query).await?;
    Ok(HttpResponse::Ok().json(preview))
}

#[delete("/quiz/profiles/{profile_id}/attempts")]
pub async fn purge_profile_attempts(
    state: web::Data<AppState>,
    profile_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .quiz_attempt_service
        .purge_profile(profile_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Extractor failures answer with the same `{error, code}` body as every other error.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid request body: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid query string: {}", err)).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid path: {}", err)).into()
    }));

    cfg.service(generate_quiz)
        .service(submit_quiz)
        .service(recent_attempts)
        .service(get_attempt)
        .service(history_preview)
        .service(purge_profile_attempts);
}
