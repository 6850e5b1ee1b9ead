use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::response::{AuthResponse, UserDto},
};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: String,
    #[serde(default)]
    redirect_uri: Option<String>,
}

#[get("/auth/github/callback")]
pub async fn auth_github_callback(
    state: web::Data<AppState>,
    web::Query(params): web::Query<CallbackParams>,
) -> Result<HttpResponse, AppError> {
    let access_token = state
        .github
        .exchange_code(&params.code, params.redirect_uri.as_deref())
        .await?;
    let profile = state.github.fetch_profile(&access_token).await?;

    let user = state.identity_service.upsert_oauth_user(profile).await?;
    let tokens = state.jwt_service.issue_pair(&user)?;
    log::info!("User {} signed in with GitHub", user.id);

    Ok(HttpResponse::Ok().json(AuthResponse {
        token: tokens.token,
        refresh_token: tokens.refresh_token,
        user: UserDto::from(user),
    }))
}

#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub token: String,
    pub refresh_token: String,
}

#[post("/auth/refresh")]
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let refresh_claims = state
        .jwt_service
        .validate_refresh_token(&request.refresh_token)?;

    // Reload so the new access token carries the current role
    let user = state
        .identity_service
        .get_user(&refresh_claims.sub)
        .await
        .map_err(|_| AppError::Unauthorized("User associated with refresh token not found".to_string()))?;

    let tokens = state.jwt_service.issue_pair(&user)?;
    log::info!("Token refreshed for user: {}", user.id);

    Ok(HttpResponse::Ok().json(RefreshTokenResponse {
        token: tokens.token,
        refresh_token: tokens.refresh_token,
    }))
}
