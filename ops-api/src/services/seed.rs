//! Startup seeding of profiles and work items from static JSON files.
//!
//! Every record is written with an upsert keyed on `_id`, so running the
//! seed again with unchanged files leaves the collections as they were.
//! A missing file skips its step.

use crate::config::SeedConfig;
use crate::dtos::ProfileSeed;
use crate::models::{Profile, WorkItem};
use crate::services::database::{OpsDb, PROFILES_COLLECTION, WORK_ITEMS_COLLECTION};
use metrics::counter;
use serde::de::DeserializeOwned;
use service_core::error::AppError;
use std::io::ErrorKind;
use std::path::Path;

/// Records upserted per step. `None` means the step was skipped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub profiles: Option<usize>,
    pub work_items: Option<usize>,
}

pub async fn seed_database(db: &OpsDb, config: &SeedConfig) -> Result<SeedReport, AppError> {
    if !config.enabled {
        tracing::info!("Seeding disabled");
        return Ok(SeedReport::default());
    }

    let mut report = SeedReport::default();

    if let Some(seeds) = read_seed_file::<ProfileSeed>(Path::new(&config.profiles_path)).await? {
        let count = seeds.len();
        for seed in seeds {
            db.upsert_profile(&Profile::from(seed)).await?;
        }
        report.profiles = Some(count);
        record_upserts(PROFILES_COLLECTION, count);
        tracing::info!(path = %config.profiles_path, count, "Seeded profiles");
    }

    if let Some(items) = read_seed_file::<WorkItem>(Path::new(&config.work_items_path)).await? {
        let count = items.len();
        for item in &items {
            db.upsert_work_item(item).await?;
        }
        report.work_items = Some(count);
        record_upserts(WORK_ITEMS_COLLECTION, count);
        tracing::info!(path = %config.work_items_path, count, "Seeded work items");
    }

    tracing::info!(
        profiles = ?report.profiles,
        work_items = ?report.work_items,
        "Seeding complete"
    );
    Ok(report)
}

fn record_upserts(collection: &'static str, count: usize) {
    counter!("seed_records_upserted_total", "collection" => collection).increment(count as u64);
}

/// Read a JSON array of records. `Ok(None)` when the file does not exist.
pub async fn read_seed_file<T: DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>, AppError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "Seed file not found, skipping");
            return Ok(None);
        }
        Err(e) => {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Failed to read seed file {}: {}",
                path.display(),
                e
            )));
        }
    };

    let records = serde_json::from_str(&raw).map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "Malformed seed file {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(Some(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkStatus;
    use std::io::Write;

    #[tokio::test]
    async fn test_missing_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_seed_file::<ProfileSeed>(&dir.path().join("absent.json"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_reads_profile_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"key":"hr","label":"HR"}},{{"key":"parts","label":"Parts","description":"Counter"}}]"#
        )
        .unwrap();

        let seeds = read_seed_file::<ProfileSeed>(file.path())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].key, "hr");
        assert_eq!(seeds[1].description.as_deref(), Some("Counter"));
    }

    #[tokio::test]
    async fn test_reads_work_item_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"svc-1","profile_key":"service","title":"Recall check","status":"blocked","priority":"urgent"}}]"#
        )
        .unwrap();

        let items = read_seed_file::<WorkItem>(file.path())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(items[0].id, "svc-1");
        assert_eq!(items[0].status, WorkStatus::Blocked);
    }

    #[tokio::test]
    async fn test_malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"key":"hr"}}"#).unwrap();

        let result = read_seed_file::<ProfileSeed>(file.path()).await;
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
