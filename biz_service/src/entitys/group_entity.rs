use bson::oid::ObjectId;
use bson::{DateTime, doc};
use common::index_trait::MongoIndexModelProvider;
use common::util::date_util::time_to_str;
use mongodb::IndexModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const GROUP_COLLECTION: &str = "group_info";

/// Persisted group document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupEntity {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidelines: Option<String>,
    /// Creator's user id; never changes after insert.
    pub owner: ObjectId,
    /// Associated event ids, in client order.
    #[serde(default)]
    pub event: Vec<ObjectId>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime,
}

impl MongoIndexModelProvider for GroupEntity {
    fn index_models() -> Vec<IndexModel> {
        vec![IndexModel::builder().keys(doc! { "owner": 1 }).build()]
    }
}

/// Plain-data rendering of a group as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    #[schema(example = "5a7db6c74d55bc51bdf39793")]
    pub id: String,
    #[schema(example = "Book Club")]
    pub name: String,
    #[schema(example = "Readers")]
    pub description: String,
    pub guidelines: Option<String>,
    pub owner: String,
    pub event: Vec<String>,
    #[schema(example = "2024-01-01T00:00:00.000Z")]
    pub created_at: String,
    pub updated_at: String,
}

impl From<&GroupEntity> for GroupView {
    fn from(group: &GroupEntity) -> Self {
        GroupView {
            id: group.id.to_hex(),
            name: group.name.clone(),
            description: group.description.clone(),
            guidelines: group.guidelines.clone(),
            owner: group.owner.to_hex(),
            event: group.event.iter().map(|id| id.to_hex()).collect(),
            created_at: time_to_str(group.created_at),
            updated_at: time_to_str(group.updated_at),
        }
    }
}

impl From<GroupEntity> for GroupView {
    fn from(group: GroupEntity) -> Self {
        GroupView::from(&group)
    }
}
