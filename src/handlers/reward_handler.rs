use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::{domain::shop::SHOP_ITEMS, dto::request::RedeemRequest},
};

#[get("/shop")]
async fn list_shop() -> HttpResponse {
    HttpResponse::Ok().json(SHOP_ITEMS)
}

#[get("/rewards")]
async fn get_rewards(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let view = state.reward_service.overview(&auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[get("/rewards/growth")]
async fn get_growth(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let growth = state.reward_service.growth(&auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(growth))
}

#[post("/rewards/redeem")]
async fn redeem(
    state: web::Data<AppState>,
    request: web::Json<RedeemRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let outcome = state
        .reward_service
        .redeem(&auth.0.sub, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn shop_lists_three_items() {
        let app = test::init_service(App::new().service(list_shop)).await;
        let req = test::TestRequest::get().uri("/shop").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["cost"], 300);
    }
}
