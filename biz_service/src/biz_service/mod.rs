use crate::biz_service::group_service::GroupService;
use crate::biz_service::user_service::{TokenVerifier, UserService};
use crate::entitys::group_entity::{GROUP_COLLECTION, GroupEntity};
use crate::entitys::user_entity::{USER_COLLECTION, UserEntity};
use actix_web::web;
use common::errors::AppError;
use common::memory_repository::MemoryRepository;
use common::repository_util::{BaseRepository, Repository};
use mongodb::Database;
use std::sync::Arc;

pub mod group_service;
pub mod user_service;

/// Services shared by every worker of the HTTP server.
#[derive(Clone)]
pub struct ServiceRes {
    pub group_service: Arc<GroupService>,
    pub user_service: Arc<UserService>,
}

impl ServiceRes {
    /// MongoDB-backed services; creates the collections' indexes first.
    pub async fn mongo(db: &Database) -> Result<Self, AppError> {
        let groups = BaseRepository::<GroupEntity>::new(db, GROUP_COLLECTION);
        groups.ensure_indexes().await?;
        let users = BaseRepository::<UserEntity>::new(db, USER_COLLECTION);
        users.ensure_indexes().await?;
        Ok(Self::build(Arc::new(groups), Arc::new(users)))
    }

    /// Process-local services; data is lost on exit.
    pub fn memory() -> Self {
        Self::build(Arc::new(MemoryRepository::<GroupEntity>::new()), Arc::new(MemoryRepository::<UserEntity>::new()))
    }

    fn build(
        groups: Arc<dyn Repository<GroupEntity>>,
        users: Arc<dyn Repository<UserEntity>>,
    ) -> Self {
        Self { group_service: Arc::new(GroupService::new(groups)), user_service: Arc::new(UserService::new(users)) }
    }

    pub fn token_verifier(&self) -> Arc<dyn TokenVerifier> {
        self.user_service.clone()
    }
}

pub fn configure(cfg: &mut web::ServiceConfig, res: ServiceRes) {
    cfg.app_data(web::Data::from(res.group_service.clone()));
    cfg.app_data(web::Data::from(res.user_service.clone()));
}
