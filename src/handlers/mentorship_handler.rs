use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::{
        domain::UserRole,
        dto::request::{BookMentorshipRequest, CreateMentorshipSessionRequest},
    },
};

#[post("/mentorship/sessions")]
async fn create_session(
    state: web::Data<AppState>,
    request: web::Json<CreateMentorshipSessionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let session = state
        .mentorship_service
        .create_session(&auth.identity(), request.into_inner(), Utc::now().date_naive())
        .await?;
    Ok(HttpResponse::Created().json(session))
}

#[get("/mentorship/sessions/upcoming")]
async fn list_upcoming(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let sessions = state.mentorship_service.upcoming().await?;
    Ok(HttpResponse::Ok().json(sessions))
}

#[post("/mentorship/bookings")]
async fn request_booking(
    state: web::Data<AppState>,
    request: web::Json<BookMentorshipRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let booking = state
        .mentorship_service
        .request_booking(&auth.identity(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(booking))
}

/// Mentors see sessions addressed to them; students see their own requests.
#[get("/mentorship/mine")]
async fn list_mine(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let identity = auth.identity();
    let sessions = match identity.role {
        Some(UserRole::Mentor) => state.mentorship_service.sessions_for_mentor(&identity).await?,
        _ => state.mentorship_service.requests_for_student(&identity).await?,
    };
    Ok(HttpResponse::Ok().json(sessions))
}
