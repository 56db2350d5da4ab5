use mongodb::IndexModel;

/// Entities that declare the indexes their collection needs.
pub trait MongoIndexModelProvider {
    fn index_models() -> Vec<IndexModel>;
}
