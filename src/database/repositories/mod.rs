pub mod role_repository;
pub mod user_repository;
pub mod wage_repository;
pub mod worker_repository;

// Re-export all repositories for easy importing
pub use role_repository::RoleRepository;
pub use user_repository::UserRepository;
pub use wage_repository::MonthlyWageRepository;
pub use worker_repository::WorkerRepository;
