use actix_web::{web, HttpResponse};

use crate::auth::Claims;
use crate::database::models::AuthorizationStatus;
use crate::database::repositories::RoleRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;

/// Single-use escape hatch: the first authenticated account may grant itself
/// the admin role while no admin exists. Every later call is refused, no
/// matter who asks.
pub async fn bootstrap_admin(
    claims: Claims,
    role_repo: web::Data<RoleRepository>,
) -> Result<HttpResponse, AppError> {
    match role_repo.bootstrap_admin(claims.user_id()).await? {
        Some(grant) => {
            log::warn!(
                "Admin bootstrap used: granted '{}' to user {} ({})",
                grant.role,
                claims.user_id(),
                claims.email
            );
            Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
                Some(grant),
                "Admin access granted",
            )))
        }
        None => {
            log::warn!(
                "Rejected admin bootstrap attempt by user {}: an admin already exists",
                claims.user_id()
            );
            Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error(
                "Bootstrap is closed; ask an existing admin to grant access",
            )))
        }
    }
}

/// The shell's authorization axis: whether this account is authorized for
/// payroll reads/writes, and whether the bootstrap action should be offered.
pub async fn authorization_status(
    claims: Claims,
    role_repo: web::Data<RoleRepository>,
) -> Result<HttpResponse, AppError> {
    let authorized = role_repo.is_admin(claims.user_id()).await?;
    let bootstrap_open = role_repo.admin_count().await? == 0;

    Ok(HttpResponse::Ok().json(ApiResponse::success(AuthorizationStatus {
        authorized,
        bootstrap_open,
    })))
}
