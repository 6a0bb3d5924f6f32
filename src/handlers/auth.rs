use actix_web::{web, HttpResponse, Result};

use crate::auth::Claims;
use crate::database::models::{CreateUserRequest, LoginRequest, UserInfo};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::AppState;

pub async fn register(
    state: web::Data<AppState>,
    input: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.auth_service.register(input.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(response)))
}

pub async fn login(
    state: web::Data<AppState>,
    input: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    match state.auth_service.login(input.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => {
            log::warn!("Login failed: {}", e);
            Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::<()>::error("Invalid email or password")))
        }
    }
}

pub async fn me(claims: Claims, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let user = state.auth_service.get_user(claims.user_id()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserInfo::from(user))))
}
