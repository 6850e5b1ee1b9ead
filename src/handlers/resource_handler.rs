use actix_web::{get, web, HttpResponse};

use crate::{
    errors::AppError,
    models::domain::resource::{find_resource, ResourceSummary, RESOURCES},
};

#[get("/resources")]
async fn list_resources() -> HttpResponse {
    let summaries: Vec<ResourceSummary> = RESOURCES.iter().map(ResourceSummary::from).collect();
    HttpResponse::Ok().json(summaries)
}

#[get("/resources/{id}")]
async fn get_resource(id: web::Path<u32>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let resource =
        find_resource(id).ok_or_else(|| AppError::NotFound(format!("Resource {} not found", id)))?;
    Ok(HttpResponse::Ok().json(resource))
}
