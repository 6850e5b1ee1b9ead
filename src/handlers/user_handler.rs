use actix_web::{get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::{
        domain::UserRole,
        dto::{
            request::{
                AssignRoleRequest, MentorOnboardingRequest, MentorSearchQuery,
                StudentOnboardingRequest, UpdateMentorProfileRequest,
            },
            response::{AuthResponse, UserDto},
        },
    },
};

#[get("/me")]
async fn get_me(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.identity_service.get_user(&auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(UserDto::from(user)))
}

/// Returns fresh tokens so the client's claims carry the new role.
#[post("/me/role")]
async fn assign_role(
    state: web::Data<AppState>,
    request: web::Json<AssignRoleRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state
        .identity_service
        .assign_role(&auth.0.sub, request.into_inner().role)
        .await?;
    let tokens = state.jwt_service.issue_pair(&user)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token: tokens.token,
        refresh_token: tokens.refresh_token,
        user: UserDto::from(user),
    }))
}

#[get("/me/profile")]
async fn get_my_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let identity = auth.identity();
    match identity.role {
        Some(UserRole::Student) => {
            let profile = state.identity_service.student_profile(&identity.user_id).await?;
            Ok(HttpResponse::Ok().json(profile))
        }
        Some(UserRole::Mentor) => {
            let profile = state.identity_service.mentor_profile(&identity.user_id).await?;
            Ok(HttpResponse::Ok().json(profile))
        }
        None => Err(AppError::NotFound("Choose a role before onboarding".to_string())),
    }
}

#[post("/onboarding/student")]
async fn onboard_student(
    state: web::Data<AppState>,
    request: web::Json<StudentOnboardingRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state
        .identity_service
        .onboard_student(&auth.identity(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(profile))
}

#[post("/onboarding/mentor")]
async fn onboard_mentor(
    state: web::Data<AppState>,
    request: web::Json<MentorOnboardingRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state
        .identity_service
        .onboard_mentor(&auth.identity(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(profile))
}

#[put("/mentors/me")]
async fn update_mentor_profile(
    state: web::Data<AppState>,
    request: web::Json<UpdateMentorProfileRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state
        .identity_service
        .update_mentor_profile(&auth.identity(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[get("/mentors")]
async fn list_mentors(
    state: web::Data<AppState>,
    query: web::Query<MentorSearchQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let mentors = state
        .identity_service
        .list_mentors(query.q.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(mentors))
}
