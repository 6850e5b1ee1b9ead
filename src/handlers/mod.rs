pub mod auth_handler;
pub mod health_handler;
pub mod mentorship_handler;
pub mod quiz_handler;
pub mod resource_handler;
pub mod reward_handler;
pub mod user_handler;

use actix_web::web;

use crate::auth::AuthMiddleware;

/// Routes reachable without a token.
pub fn configure_public(cfg: &mut web::ServiceConfig) {
    cfg.service(health_handler::health_check)
        .service(health_handler::health_check_live)
        .service(health_handler::health_check_ready)
        .service(auth_handler::auth_github_callback)
        .service(auth_handler::refresh_token)
        .service(resource_handler::list_resources)
        .service(resource_handler::get_resource)
        .service(quiz_handler::list_categories)
        .service(reward_handler::list_shop);
}

/// Everything under `/api` requires a bearer token.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .wrap(AuthMiddleware)
            .service(user_handler::get_me)
            .service(user_handler::assign_role)
            .service(user_handler::get_my_profile)
            .service(user_handler::onboard_student)
            .service(user_handler::onboard_mentor)
            .service(user_handler::update_mentor_profile)
            .service(user_handler::list_mentors)
            .service(quiz_handler::get_session)
            .service(quiz_handler::start_session)
            .service(quiz_handler::submit_answer)
            .service(quiz_handler::reset_session)
            .service(mentorship_handler::create_session)
            .service(mentorship_handler::list_upcoming)
            .service(mentorship_handler::request_booking)
            .service(mentorship_handler::list_mine)
            .service(reward_handler::get_rewards)
            .service(reward_handler::get_growth)
            .service(reward_handler::redeem),
    );
}
