pub mod auth_middleware;
pub mod remove_blanks;

pub use auth_middleware::{AuthMiddleware, AuthUser};
pub use remove_blanks::CleanJson;
