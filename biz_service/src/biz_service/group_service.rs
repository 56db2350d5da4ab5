use crate::entitys::group_dto::{CreateGroupDto, UpdateGroupDto, parse_ids};
use crate::entitys::group_entity::GroupEntity;
use bson::oid::ObjectId;
use common::errors::AppError;
use common::repository_util::Repository;
use common::util::date_util::now;
use log::{info, warn};
use std::sync::Arc;
use validator::Validate;

/// Turns an empty lookup into `NotFound`.
pub fn handle_not_found<T>(found: Option<T>) -> Result<T, AppError> {
    found.ok_or(AppError::NotFound)
}

/// Fails unless `caller` is the group's owner.
pub fn require_ownership(caller: &ObjectId, group: &GroupEntity) -> Result<(), AppError> {
    if group.owner != *caller {
        warn!("user {} is not the owner of group {}", caller, group.id);
        return Err(AppError::Ownership(format!("group {}", group.id)));
    }
    Ok(())
}

pub struct GroupService {
    pub dao: Arc<dyn Repository<GroupEntity>>,
}

impl GroupService {
    pub fn new(dao: Arc<dyn Repository<GroupEntity>>) -> Self {
        Self { dao }
    }

    pub async fn list_groups(&self) -> Result<Vec<GroupEntity>, AppError> {
        self.dao.query_all().await
    }

    pub async fn find_group(&self, id: &str) -> Result<GroupEntity, AppError> {
        handle_not_found(self.dao.find_by_id(id).await?)
    }

    /// Persists a new group owned by `owner`.
    pub async fn create_group(&self, owner: ObjectId, dto: CreateGroupDto) -> Result<GroupEntity, AppError> {
        dto.validate()?;
        let now = now();
        let group = GroupEntity {
            id: ObjectId::new(),
            name: dto.name.unwrap_or_default(),
            description: dto.description.unwrap_or_default(),
            guidelines: dto.guidelines,
            owner,
            event: parse_ids(&dto.event),
            created_at: now,
            updated_at: now,
        };
        self.dao.insert(&group).await?;
        info!("group {} created by {}", group.id, owner);
        Ok(group)
    }

    /// Merges the non-blank fields of `dto` into the group. Only the owner may do this.
    pub async fn update_group(&self, caller: &ObjectId, id: &str, dto: UpdateGroupDto) -> Result<(), AppError> {
        let group = self.find_group(id).await?;
        require_ownership(caller, &group)?;
        dto.validate()?;

        let mut fields = dto.to_set_document();
        fields.insert("updatedAt", now());
        let matched = self.dao.update_by_id(id, fields).await?;
        if matched == 0 {
            return Err(AppError::NotFound);
        }
        info!("group {} updated by {}", group.id, caller);
        Ok(())
    }

    /// Permanently removes the group. Only the owner may do this.
    pub async fn delete_group(&self, caller: &ObjectId, id: &str) -> Result<(), AppError> {
        let group = self.find_group(id).await?;
        require_ownership(caller, &group)?;

        let deleted = self.dao.delete_by_id(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound);
        }
        info!("group {} deleted by {}", group.id, caller);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bson::Document;
    use common::memory_repository::MemoryRepository;
    use common::repository_util::RepoResult;
    use std::time::Duration;

    /// Another request deletes the group right after every lookup.
    struct DeletedAfterLookup(MemoryRepository<GroupEntity>);

    #[async_trait]
    impl Repository<GroupEntity> for DeletedAfterLookup {
        async fn find_by_id(&self, id: &str) -> RepoResult<Option<GroupEntity>> {
            let found = self.0.find_by_id(id).await?;
            self.0.delete_by_id(id).await?;
            Ok(found)
        }
        async fn find_one(&self, filter: Document) -> RepoResult<Option<GroupEntity>> {
            self.0.find_one(filter).await
        }
        async fn insert(&self, entity: &GroupEntity) -> RepoResult<()> {
            self.0.insert(entity).await
        }
        async fn query_all(&self) -> RepoResult<Vec<GroupEntity>> {
            self.0.query_all().await
        }
        async fn update_by_id(&self, id: &str, fields: Document) -> RepoResult<u64> {
            self.0.update_by_id(id, fields).await
        }
        async fn delete_by_id(&self, id: &str) -> RepoResult<u64> {
            self.0.delete_by_id(id).await
        }
    }

    fn service() -> GroupService {
        GroupService::new(Arc::new(MemoryRepository::<GroupEntity>::new()))
    }

    fn book_club() -> CreateGroupDto {
        CreateGroupDto { name: Some("Book Club".into()), description: Some("Readers".into()), ..Default::default() }
    }

    #[tokio::test]
    async fn create_sets_owner_and_timestamps() {
        let svc = service();
        let owner = ObjectId::new();
        let group = svc.create_group(owner, book_club()).await.unwrap();

        assert_eq!(group.owner, owner);
        assert_eq!(group.created_at, group.updated_at);
        assert_eq!(svc.find_group(&group.id.to_hex()).await.unwrap(), group);
    }

    #[tokio::test]
    async fn create_rejects_missing_description() {
        let svc = service();
        let dto = CreateGroupDto { name: Some("Book Club".into()), ..Default::default() };
        let err = svc.create_group(ObjectId::new(), dto).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(svc.list_groups().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_owner_cannot_update_or_delete() {
        let svc = service();
        let group = svc.create_group(ObjectId::new(), book_club()).await.unwrap();
        let id = group.id.to_hex();
        let stranger = ObjectId::new();

        let dto = UpdateGroupDto { name: Some("Hijack".into()), ..Default::default() };
        assert!(matches!(svc.update_group(&stranger, &id, dto).await, Err(AppError::Ownership(_))));
        assert!(matches!(svc.delete_group(&stranger, &id).await, Err(AppError::Ownership(_))));
        assert_eq!(svc.find_group(&id).await.unwrap(), group);
    }

    #[tokio::test]
    async fn owner_update_ignores_blank_fields() {
        let svc = service();
        let owner = ObjectId::new();
        let id = svc.create_group(owner, book_club()).await.unwrap().id.to_hex();

        let blank = UpdateGroupDto { name: Some(String::new()), ..Default::default() };
        svc.update_group(&owner, &id, blank).await.unwrap();
        assert_eq!(svc.find_group(&id).await.unwrap().name, "Book Club");

        let rename = UpdateGroupDto { name: Some("X".into()), ..Default::default() };
        svc.update_group(&owner, &id, rename).await.unwrap();
        let group = svc.find_group(&id).await.unwrap();
        assert_eq!(group.name, "X");
        assert_eq!(group.description, "Readers");
    }

    #[tokio::test]
    async fn owner_update_bumps_updated_at() {
        let svc = service();
        let owner = ObjectId::new();
        let created = svc.create_group(owner, book_club()).await.unwrap();
        let id = created.id.to_hex();

        tokio::time::sleep(Duration::from_millis(5)).await;
        let dto = UpdateGroupDto { description: Some("Avid readers".into()), ..Default::default() };
        svc.update_group(&owner, &id, dto).await.unwrap();

        let group = svc.find_group(&id).await.unwrap();
        assert!(group.updated_at > created.updated_at);
        assert_eq!(group.created_at, created.created_at);
    }

    #[tokio::test]
    async fn group_deleted_mid_request_is_not_found() {
        let svc = GroupService::new(Arc::new(DeletedAfterLookup(MemoryRepository::new())));
        let owner = ObjectId::new();

        let id = svc.create_group(owner, book_club()).await.unwrap().id.to_hex();
        assert!(matches!(svc.delete_group(&owner, &id).await, Err(AppError::NotFound)));

        let id = svc.create_group(owner, book_club()).await.unwrap().id.to_hex();
        let dto = UpdateGroupDto { name: Some("X".into()), ..Default::default() };
        assert!(matches!(svc.update_group(&owner, &id, dto).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn missing_id_is_not_found_for_every_lookup() {
        let svc = service();
        let caller = ObjectId::new();
        let id = ObjectId::new().to_hex();

        assert!(matches!(svc.find_group(&id).await, Err(AppError::NotFound)));
        assert!(matches!(
            svc.update_group(&caller, &id, UpdateGroupDto::default()).await,
            Err(AppError::NotFound)
        ));
        assert!(matches!(svc.delete_group(&caller, &id).await, Err(AppError::NotFound)));
        assert!(matches!(svc.find_group("not-an-id").await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn owner_delete_is_permanent() {
        let svc = service();
        let owner = ObjectId::new();
        let id = svc.create_group(owner, book_club()).await.unwrap().id.to_hex();

        svc.delete_group(&owner, &id).await.unwrap();
        assert!(matches!(svc.find_group(&id).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn list_is_not_filtered_by_owner() {
        let svc = service();
        svc.create_group(ObjectId::new(), book_club()).await.unwrap();
        svc.create_group(ObjectId::new(), book_club()).await.unwrap();
        assert_eq!(svc.list_groups().await.unwrap().len(), 2);
    }
}
