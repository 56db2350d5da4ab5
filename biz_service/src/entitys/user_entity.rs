use bson::doc;
use bson::oid::ObjectId;
use common::index_trait::MongoIndexModelProvider;
use mongodb::IndexModel;
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

pub const USER_COLLECTION: &str = "user_info";

/// Account record owned by the sign-in flow; this service only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserEntity {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    /// Current bearer token, cleared on sign-out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl MongoIndexModelProvider for UserEntity {
    fn index_models() -> Vec<IndexModel> {
        let options = IndexOptions::builder().sparse(true).build();
        vec![IndexModel::builder().keys(doc! { "token": 1 }).options(options).build()]
    }
}
