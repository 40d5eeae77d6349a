use async_trait::async_trait;
use mongodb::{bson::doc, Collection};

use crate::{db::Database, errors::AppResult, models::domain::Subject};

#[async_trait]
pub trait SubjectRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Subject>>;
}

pub struct MongoSubjectRepository {
    collection: Collection<Subject>,
}

impl MongoSubjectRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl SubjectRepository for MongoSubjectRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Subject>> {
        let subject = self.collection.find_one(doc! { "id": id }).await?;
        Ok(subject)
    }
}
