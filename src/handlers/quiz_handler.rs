use actix_web::{delete, get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{StartQuizRequest, SubmitAnswerRequest},
    quiz::Difficulty,
};

#[get("/quiz/categories")]
async fn list_categories(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "categories": state.quiz_service.categories(),
        "difficulties": Difficulty::ALL,
    }))
}

#[get("/quiz/session")]
async fn get_session(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let view = state.quiz_service.view(&auth.identity()).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/quiz/session")]
async fn start_session(
    state: web::Data<AppState>,
    request: Option<web::Json<StartQuizRequest>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.map(web::Json::into_inner).unwrap_or_default();
    let view = state.quiz_service.start(&auth.identity(), request).await?;
    Ok(HttpResponse::Created().json(view))
}

#[post("/quiz/session/answer")]
async fn submit_answer(
    state: web::Data<AppState>,
    request: web::Json<SubmitAnswerRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .quiz_service
        .submit(&auth.identity(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/quiz/session")]
async fn reset_session(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.reset(&auth.identity()).await;
    Ok(HttpResponse::NoContent().finish())
}
