use crate::errors::AppError;
use crate::index_trait::MongoIndexModelProvider;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::{Collection, Database};
use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, AppError>;

/// Id-addressed document store operations.
///
/// Ids are the 24-char hex form of the `_id` `ObjectId`; an id that does not
/// parse is treated as "no such document" rather than an error.
#[async_trait]
pub trait Repository<T>: Send + Sync {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<T>>;
    async fn find_one(&self, filter: Document) -> RepoResult<Option<T>>;
    async fn insert(&self, entity: &T) -> RepoResult<()>;
    async fn query_all(&self) -> RepoResult<Vec<T>>;
    /// `$set`s `fields` on the matching document, returning the matched count.
    async fn update_by_id(&self, id: &str, fields: Document) -> RepoResult<u64>;
    async fn delete_by_id(&self, id: &str) -> RepoResult<u64>;
}

pub fn parse_object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

pub struct BaseRepository<T: Send + Sync> {
    pub collection: Collection<T>,
    _marker: PhantomData<T>,
}

impl<T: Send + Sync> BaseRepository<T> {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        Self { collection: db.collection::<T>(collection_name), _marker: Default::default() }
    }
}

impl<T> BaseRepository<T>
where
    T: MongoIndexModelProvider + Send + Sync,
{
    pub async fn ensure_indexes(&self) -> RepoResult<()> {
        let models = T::index_models();
        if !models.is_empty() {
            self.collection.create_indexes(models).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<T> Repository<T> for BaseRepository<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<T>> {
        let Some(obj_id) = parse_object_id(id) else {
            return Ok(None);
        };
        self.find_one(doc! { "_id": obj_id }).await
    }

    async fn find_one(&self, filter: Document) -> RepoResult<Option<T>> {
        let result = self.collection.find_one(filter).await?;
        Ok(result)
    }

    async fn insert(&self, entity: &T) -> RepoResult<()> {
        self.collection.insert_one(entity).await?;
        Ok(())
    }

    async fn query_all(&self) -> RepoResult<Vec<T>> {
        let cursor = self.collection.find(doc! {}).await?;
        let result: Vec<T> = cursor.try_collect().await?;
        Ok(result)
    }

    async fn update_by_id(&self, id: &str, fields: Document) -> RepoResult<u64> {
        let Some(obj_id) = parse_object_id(id) else {
            return Ok(0);
        };
        let result = self.collection.update_one(doc! { "_id": obj_id }, doc! { "$set": fields }).await?;
        Ok(result.matched_count)
    }

    async fn delete_by_id(&self, id: &str) -> RepoResult<u64> {
        let Some(obj_id) = parse_object_id(id) else {
            return Ok(0);
        };
        let result = self.collection.delete_one(doc! { "_id": obj_id }).await?;
        Ok(result.deleted_count)
    }
}
