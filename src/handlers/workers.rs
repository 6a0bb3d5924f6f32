use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::{require_admin, Claims};
use crate::database::models::WorkerInput;
use crate::database::repositories::{RoleRepository, WorkerRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct WorkerListQuery {
    pub search: Option<String>,
}

pub async fn create_worker(
    claims: Claims,
    role_repo: web::Data<RoleRepository>,
    worker_repo: web::Data<WorkerRepository>,
    input: web::Json<WorkerInput>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims, &role_repo).await?;
    input.validate().map_err(AppError::validation)?;

    let worker = worker_repo.create(&input).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(worker)))
}

pub async fn get_workers(
    claims: Claims,
    role_repo: web::Data<RoleRepository>,
    worker_repo: web::Data<WorkerRepository>,
    query: web::Query<WorkerListQuery>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims, &role_repo).await?;

    let workers = worker_repo.get_all(query.search.as_deref()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(workers)))
}

pub async fn get_worker(
    claims: Claims,
    role_repo: web::Data<RoleRepository>,
    worker_repo: web::Data<WorkerRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims, &role_repo).await?;

    let worker_id = path.into_inner();
    let worker = worker_repo
        .get_by_id(&worker_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Worker {} not found", worker_id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(worker)))
}

pub async fn update_worker(
    claims: Claims,
    role_repo: web::Data<RoleRepository>,
    worker_repo: web::Data<WorkerRepository>,
    path: web::Path<String>,
    input: web::Json<WorkerInput>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims, &role_repo).await?;
    input.validate().map_err(AppError::validation)?;

    let worker_id = path.into_inner();
    let worker = worker_repo
        .update(&worker_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Worker {} not found", worker_id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(worker)))
}

/// Deletes the worker and, with it, every monthly wage row for that worker.
pub async fn delete_worker(
    claims: Claims,
    role_repo: web::Data<RoleRepository>,
    worker_repo: web::Data<WorkerRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims, &role_repo).await?;

    let worker_id = path.into_inner();
    if !worker_repo.delete(&worker_id).await? {
        return Err(AppError::not_found(format!(
            "Worker {} not found",
            worker_id
        )));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Worker and associated wage records deleted",
    )))
}
