use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Authorization is a presence check: a `user_roles` row with role `admin`
/// means the account may use the payroll endpoints.
pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RoleGrant {
    pub id: String,
    pub user_id: String,
    pub role: String,
    pub granted_at: NaiveDateTime,
}

/// Shell-facing authorization state: whether the caller is authorized and
/// whether the one-time admin bootstrap is still open.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationStatus {
    pub authorized: bool,
    pub bootstrap_open: bool,
}
