pub mod admin;
pub mod auth;
pub mod shared;
pub mod wages;
pub mod workers;
