use bson::oid::ObjectId;
use bson::{Bson, Document};
use common::util::validate::validate_object_ids;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Fields accepted when creating a group. Any `owner` key sent by the client
/// is not part of this type and is dropped on deserialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateGroupDto {
    #[schema(example = "Book Club")]
    #[validate(required(message = "name is required"), length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,

    #[schema(example = "Readers")]
    #[validate(
        required(message = "description is required"),
        length(min = 1, message = "description must not be empty")
    )]
    pub description: Option<String>,

    pub guidelines: Option<String>,

    /// Event ids (24-char hex).
    #[serde(default)]
    #[validate(custom(function = "validate_object_ids"))]
    pub event: Vec<String>,
}

/// Partial group update. Absent or empty-string fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateGroupDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub guidelines: Option<String>,
    #[validate(custom(function = "validate_object_ids"))]
    pub event: Option<Vec<String>>,
}

pub(crate) fn parse_ids(ids: &[String]) -> Vec<ObjectId> {
    ids.iter().filter_map(|id| ObjectId::parse_str(id).ok()).collect()
}

impl UpdateGroupDto {
    /// `$set` body for the fields that carry a value.
    pub fn to_set_document(&self) -> Document {
        let mut fields = Document::new();
        let texts = [("name", &self.name), ("description", &self.description), ("guidelines", &self.guidelines)];
        for (key, value) in texts {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                fields.insert(key, v);
            }
        }
        if let Some(ids) = &self.event {
            let ids: Vec<Bson> = parse_ids(ids).into_iter().map(Bson::ObjectId).collect();
            fields.insert("event", ids);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_name_and_description() {
        let dto = CreateGroupDto { name: Some(String::new()), ..Default::default() };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("description"));
    }

    #[test]
    fn create_rejects_malformed_event_ids() {
        let dto = CreateGroupDto {
            name: Some("Book Club".into()),
            description: Some("Readers".into()),
            event: vec!["nope".into()],
            ..Default::default()
        };
        assert!(dto.validate().unwrap_err().field_errors().contains_key("event"));
    }

    #[test]
    fn update_document_skips_absent_and_blank_fields() {
        let dto = UpdateGroupDto { name: Some(String::new()), description: Some("New".into()), ..Default::default() };
        let fields = dto.to_set_document();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get_str("description").unwrap(), "New");
    }

    #[test]
    fn update_document_replaces_event_list() {
        let id = ObjectId::new();
        let dto = UpdateGroupDto { event: Some(vec![id.to_hex()]), ..Default::default() };
        let fields = dto.to_set_document();
        assert_eq!(fields.get_array("event").unwrap(), &vec![Bson::ObjectId(id)]);
    }
}
