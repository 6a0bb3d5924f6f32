pub mod role;
pub mod user;
pub mod wage;
pub mod worker;

// Re-export all models for easy importing
pub use role::*;
pub use user::*;
pub use wage::*;
pub use worker::*;
