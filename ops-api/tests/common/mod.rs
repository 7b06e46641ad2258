use ops_api::config::{MongoConfig, OpsConfig, SeedConfig};
use ops_api::services::OpsDb;
use ops_api::startup::Application;
use service_core::config::Config as CoreConfig;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: OpsDb,
    pub db_name: String,
}

pub fn test_mongo_uri() -> String {
    std::env::var("TEST_MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
}

pub fn test_config(db_name: &str, profiles_path: &Path, work_items_path: &Path) -> OpsConfig {
    OpsConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            ..CoreConfig::default()
        },
        mongodb: MongoConfig {
            // No database in the URI, so the fallback name is used.
            uri: test_mongo_uri(),
            database: db_name.to_string(),
            server_selection_timeout_ms: 2000,
        },
        seed: SeedConfig {
            enabled: true,
            profiles_path: profiles_path.display().to_string(),
            work_items_path: work_items_path.display().to_string(),
        },
        otlp_endpoint: None,
    }
}

/// Paths that do not exist, so seeding is skipped.
pub fn no_seed_files() -> (PathBuf, PathBuf) {
    let dir = std::env::temp_dir().join(format!("ops-api-no-seed-{}", Uuid::new_v4()));
    (dir.join("profiles.json"), dir.join("work_items.json"))
}

impl TestApp {
    pub async fn spawn() -> Self {
        let (profiles, work_items) = no_seed_files();
        Self::spawn_with_seeds(&profiles, &work_items).await
    }

    pub async fn spawn_with_seeds(profiles_path: &Path, work_items_path: &Path) -> Self {
        let db_name = format!("ops_test_{}", Uuid::new_v4().simple());
        let config = test_config(&db_name, profiles_path, work_items_path);

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
        }
    }

    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
