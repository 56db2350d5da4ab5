use crate::errors::AppError;
use crate::repository_util::{RepoResult, Repository, parse_object_id};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Document};
use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;
use tokio::sync::RwLock;

/// In-process store keeping documents as BSON in insertion order.
///
/// Filters support top-level equality only.
pub struct MemoryRepository<T> {
    docs: RwLock<Vec<(ObjectId, Document)>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self { docs: RwLock::new(Vec::new()), _marker: PhantomData }
    }
}

impl<T> MemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(k, v)| doc.get(k) == Some(v))
}

#[async_trait]
impl<T> Repository<T> for MemoryRepository<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<T>> {
        let Some(obj_id) = parse_object_id(id) else {
            return Ok(None);
        };
        let docs = self.docs.read().await;
        match docs.iter().find(|(k, _)| *k == obj_id) {
            Some((_, doc)) => Ok(Some(bson::from_document(doc.clone())?)),
            None => Ok(None),
        }
    }

    async fn find_one(&self, filter: Document) -> RepoResult<Option<T>> {
        let docs = self.docs.read().await;
        match docs.iter().find(|(_, doc)| matches(doc, &filter)) {
            Some((_, doc)) => Ok(Some(bson::from_document(doc.clone())?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, entity: &T) -> RepoResult<()> {
        let doc = bson::to_document(entity)?;
        let obj_id = doc
            .get_object_id("_id")
            .map_err(|_| AppError::Internal("document has no ObjectId _id".to_string()))?;
        let mut docs = self.docs.write().await;
        if docs.iter().any(|(k, _)| *k == obj_id) {
            return Err(AppError::Internal(format!("duplicate _id {}", obj_id)));
        }
        docs.push((obj_id, doc));
        Ok(())
    }

    async fn query_all(&self) -> RepoResult<Vec<T>> {
        let docs = self.docs.read().await;
        docs.iter()
            .map(|(_, doc)| bson::from_document(doc.clone()).map_err(AppError::from))
            .collect()
    }

    async fn update_by_id(&self, id: &str, fields: Document) -> RepoResult<u64> {
        let Some(obj_id) = parse_object_id(id) else {
            return Ok(0);
        };
        let mut docs = self.docs.write().await;
        let Some((_, doc)) = docs.iter_mut().find(|(k, _)| *k == obj_id) else {
            return Ok(0);
        };
        for (k, v) in fields {
            doc.insert(k, v);
        }
        Ok(1)
    }

    async fn delete_by_id(&self, id: &str) -> RepoResult<u64> {
        let Some(obj_id) = parse_object_id(id) else {
            return Ok(0);
        };
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|(k, _)| *k != obj_id);
        Ok((before - docs.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        #[serde(rename = "_id")]
        id: ObjectId,
        title: String,
        tag: Option<String>,
    }

    fn note(title: &str) -> Note {
        Note { id: ObjectId::new(), title: title.to_string(), tag: None }
    }

    #[tokio::test]
    async fn insert_then_find_and_list_in_order() {
        let repo = MemoryRepository::<Note>::new();
        let a = note("a");
        let b = note("b");
        repo.insert(&a).await.unwrap();
        repo.insert(&b).await.unwrap();

        assert_eq!(repo.find_by_id(&b.id.to_hex()).await.unwrap(), Some(b.clone()));
        assert_eq!(repo.query_all().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn malformed_or_unknown_id_is_absent() {
        let repo = MemoryRepository::<Note>::new();
        assert_eq!(repo.find_by_id("nope").await.unwrap(), None);
        assert_eq!(repo.find_by_id(&ObjectId::new().to_hex()).await.unwrap(), None);
        assert_eq!(repo.update_by_id("nope", doc! { "title": "x" }).await.unwrap(), 0);
        assert_eq!(repo.delete_by_id(&ObjectId::new().to_hex()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_sets_only_given_fields() {
        let repo = MemoryRepository::<Note>::new();
        let a = note("a");
        repo.insert(&a).await.unwrap();

        let matched = repo.update_by_id(&a.id.to_hex(), doc! { "tag": "t" }).await.unwrap();
        assert_eq!(matched, 1);
        let stored = repo.find_by_id(&a.id.to_hex()).await.unwrap().unwrap();
        assert_eq!(stored.title, "a");
        assert_eq!(stored.tag.as_deref(), Some("t"));
    }

    #[tokio::test]
    async fn find_one_by_equality_and_delete() {
        let repo = MemoryRepository::<Note>::new();
        let a = note("a");
        repo.insert(&a).await.unwrap();
        repo.insert(&note("b")).await.unwrap();

        let found = repo.find_one(doc! { "title": "a" }).await.unwrap();
        assert_eq!(found, Some(a.clone()));

        assert_eq!(repo.delete_by_id(&a.id.to_hex()).await.unwrap(), 1);
        assert_eq!(repo.find_one(doc! { "title": "a" }).await.unwrap(), None);
        assert_eq!(repo.query_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let repo = MemoryRepository::<Note>::new();
        let a = note("a");
        repo.insert(&a).await.unwrap();
        assert!(repo.insert(&a).await.is_err());
    }
}
