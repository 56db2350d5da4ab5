use biz_service::entitys::group_dto::{CreateGroupDto, UpdateGroupDto};
use biz_service::entitys::group_entity::{GroupEntity, GroupView};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// `POST /groups` body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateGroupBody {
    pub group: CreateGroupDto,
}

/// `PATCH /groups/{id}` body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateGroupBody {
    pub group: UpdateGroupDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupResponse {
    pub group: GroupView,
}

impl From<GroupEntity> for GroupResponse {
    fn from(group: GroupEntity) -> Self {
        Self { group: group.into() }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupListResponse {
    pub groups: Vec<GroupView>,
}

impl From<Vec<GroupEntity>> for GroupListResponse {
    fn from(groups: Vec<GroupEntity>) -> Self {
        Self { groups: groups.iter().map(GroupView::from).collect() }
    }
}

pub fn result() -> Value {
    serde_json::json!({"code":200})
}
