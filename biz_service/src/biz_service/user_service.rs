use crate::entitys::user_entity::UserEntity;
use async_trait::async_trait;
use bson::doc;
use common::errors::AppError;
use common::repository_util::Repository;
use std::sync::Arc;

/// Resolves an opaque bearer token to the account holding it.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify_token(&self, token: &str) -> Result<Option<UserEntity>, AppError>;
}

pub struct UserService {
    pub dao: Arc<dyn Repository<UserEntity>>,
}

impl UserService {
    pub fn new(dao: Arc<dyn Repository<UserEntity>>) -> Self {
        Self { dao }
    }
}

#[async_trait]
impl TokenVerifier for UserService {
    async fn verify_token(&self, token: &str) -> Result<Option<UserEntity>, AppError> {
        if token.is_empty() {
            return Ok(None);
        }
        self.dao.find_one(doc! { "token": token }).await
    }
}
