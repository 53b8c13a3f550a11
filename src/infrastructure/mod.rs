pub mod schema;
pub mod user_repository;
