pub mod db;
pub mod errors;
pub mod http;
pub mod validate;

pub use db::{create_pool, DbPool};
pub use errors::AppError;
