pub mod auth;
pub mod database;
pub mod expense;
pub mod money;
pub mod report;
pub mod user;
