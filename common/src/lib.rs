pub mod config;
pub mod errors;
pub mod repository;
pub mod util;

pub use repository::*;

/// 24-char hex form of a user's `ObjectId`
pub type UserId = String;
/// 24-char hex form of a group's `ObjectId`
pub type GroupId = String;
