use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use eduhive_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if config.is_production() {
        config.validate_for_production().map_err(std::io::Error::other)?;
    }

    let bind_addr = (config.web_server_host.clone(), config.web_server_port);
    let allowed_origin = config.cors_allowed_origin.clone();

    let state = AppState::new(config).await.map_err(std::io::Error::other)?;
    let jwt_service = web::Data::from(state.jwt_service.clone());
    let state = web::Data::new(state);

    log::info!("Starting HTTP server on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .app_data(jwt_service.clone())
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new(r#"%a "%r" %s %b %T req_id=%{x-request-id}o"#))
            .wrap(cors)
            .configure(handlers::configure_public)
            .configure(handlers::configure_api)
    })
    .bind(bind_addr)?
    .run()
    .await
}
