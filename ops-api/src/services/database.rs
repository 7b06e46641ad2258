use crate::dtos::WorkItemFilter;
use crate::models::{Profile, WorkItem};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, FindOptions, IndexOptions, ReplaceOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;
use std::time::Duration;

pub const PROFILES_COLLECTION: &str = "profiles";
pub const WORK_ITEMS_COLLECTION: &str = "work_items";

/// Process-scoped handle to the ops database. Cloning shares the
/// underlying connection pool.
#[derive(Clone)]
pub struct OpsDb {
    client: MongoClient,
    db: Database,
}

impl OpsDb {
    /// Build the client. No server round-trip happens here; an unreachable
    /// store surfaces on first use, bounded by `server_selection_timeout`.
    pub async fn connect(
        uri: &str,
        fallback_database: &str,
        server_selection_timeout: Duration,
    ) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Invalid MongoDB connection string {}: {}", uri, e);
            AppError::ConfigError(anyhow::anyhow!(e.to_string()))
        })?;
        options.server_selection_timeout = Some(server_selection_timeout);
        options.app_name.get_or_insert_with(|| "rosehill-ops-api".to_string());

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client for {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(fallback_database));
        tracing::info!(database = %db.name(), "MongoDB client ready");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for ops-api");

        let work_items = self.work_items();

        let profile_key_index = IndexModel::builder()
            .keys(doc! { "profile_key": 1 })
            .options(
                IndexOptions::builder()
                    .name("profile_key_idx".to_string())
                    .build(),
            )
            .build();

        work_items
            .create_index(profile_key_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create profile_key index: {}", e);
                AppError::from(e)
            })?;

        let priority_index = IndexModel::builder()
            .keys(doc! { "priority": -1 })
            .options(
                IndexOptions::builder()
                    .name("priority_idx".to_string())
                    .build(),
            )
            .build();

        work_items
            .create_index(priority_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create priority index: {}", e);
                AppError::from(e)
            })?;

        tracing::info!("Created indexes on work_items.(profile_key, priority)");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn profiles(&self) -> Collection<Profile> {
        self.db.collection(PROFILES_COLLECTION)
    }

    pub fn work_items(&self) -> Collection<WorkItem> {
        self.db.collection(WORK_ITEMS_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Profiles in natural order, capped at `limit`.
    pub async fn list_profiles(&self, limit: i64) -> Result<Vec<Profile>, AppError> {
        let options = FindOptions::builder().limit(limit).build();
        let cursor = self.profiles().find(None, options).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Work items matching `filter`, sorted on the stored `priority` string
    /// descending, capped at `limit`.
    pub async fn list_work_items(
        &self,
        filter: &WorkItemFilter,
        limit: i64,
    ) -> Result<Vec<WorkItem>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "priority": -1 })
            .limit(limit)
            .build();
        let cursor = self
            .work_items()
            .find(work_item_query(filter), options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn insert_work_item(&self, item: &WorkItem) -> Result<(), AppError> {
        self.work_items().insert_one(item, None).await?;
        Ok(())
    }

    pub async fn upsert_profile(&self, profile: &Profile) -> Result<(), AppError> {
        let options = ReplaceOptions::builder().upsert(true).build();
        self.profiles()
            .replace_one(doc! { "_id": &profile.id }, profile, options)
            .await?;
        Ok(())
    }

    pub async fn upsert_work_item(&self, item: &WorkItem) -> Result<(), AppError> {
        let options = ReplaceOptions::builder().upsert(true).build();
        self.work_items()
            .replace_one(doc! { "_id": &item.id }, item, options)
            .await?;
        Ok(())
    }

    pub async fn count_profiles(&self) -> Result<u64, AppError> {
        Ok(self.profiles().count_documents(None, None).await?)
    }

    pub async fn count_work_items(&self) -> Result<u64, AppError> {
        Ok(self.work_items().count_documents(None, None).await?)
    }

    /// Close the connection pool. Call once, after the server has stopped.
    pub async fn shutdown(self) {
        tracing::info!("Closing MongoDB client");
        self.client.shutdown().await;
    }
}

fn work_item_query(filter: &WorkItemFilter) -> Document {
    let mut query = Document::new();
    if let Some(profile_key) = &filter.profile_key {
        query.insert("profile_key", profile_key.as_str());
    }
    if let Some(status) = filter.status {
        query.insert("status", status.to_string());
    }
    if let Some(priority) = filter.priority {
        query.insert("priority", priority.to_string());
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{WorkPriority, WorkStatus};

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(work_item_query(&WorkItemFilter::default()).is_empty());
    }

    #[test]
    fn test_filter_uses_stored_names() {
        let query = work_item_query(&WorkItemFilter {
            profile_key: Some("hr".to_string()),
            status: Some(WorkStatus::InProgress),
            priority: Some(WorkPriority::Urgent),
        });
        assert_eq!(
            query,
            doc! { "profile_key": "hr", "status": "in_progress", "priority": "urgent" }
        );
    }
}
