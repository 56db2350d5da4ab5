use mongodb::bson::oid::ObjectId;
use validator::ValidationError;

/// Rejects strings that are not 24-char hex `ObjectId`s.
pub fn validate_object_id(value: &str) -> Result<(), ValidationError> {
    match ObjectId::parse_str(value) {
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::new("object_id").with_message("must be a 24-character hex id".into())),
    }
}

/// Every entry of the list must be an `ObjectId`.
pub fn validate_object_ids(values: &[String]) -> Result<(), ValidationError> {
    values.iter().try_for_each(|v| validate_object_id(v))
}
