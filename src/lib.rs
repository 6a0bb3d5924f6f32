pub mod auth;
pub mod config;
pub mod currency;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

pub use auth::AuthService;
pub use config::Config;
pub use error::AppError;

pub struct AppState {
    pub auth_service: AuthService,
}
