use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::CompletionRecord};

#[async_trait]
pub trait CompletionRepository: Send + Sync {
    async fn create(&self, record: CompletionRecord) -> AppResult<CompletionRecord>;
    async fn list_all(&self) -> AppResult<Vec<CompletionRecord>>;
    async fn list_by_subject(&self, subject_id: &str) -> AppResult<Vec<CompletionRecord>>;
}

pub struct MongoCompletionRepository {
    collection: Collection<CompletionRecord>,
}

impl MongoCompletionRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz completions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let subject_index = IndexModel::builder()
            .keys(doc! { "subject_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("subject_id".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(subject_index).await?;

        log::info!("Successfully created indexes for quiz completions collection");
        Ok(())
    }
}

#[async_trait]
impl CompletionRepository for MongoCompletionRepository {
    async fn create(&self, record: CompletionRecord) -> AppResult<CompletionRecord> {
        self.collection.insert_one(&record).await?;
        Ok(record)
    }

    async fn list_all(&self) -> AppResult<Vec<CompletionRecord>> {
        let records = self
            .collection
            .find(doc! {})
            .sort(doc! { "completed_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(records)
    }

    async fn list_by_subject(&self, subject_id: &str) -> AppResult<Vec<CompletionRecord>> {
        let records = self
            .collection
            .find(doc! { "subject_id": subject_id })
            .sort(doc! { "completed_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(records)
    }
}
