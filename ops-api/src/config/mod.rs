use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_MONGO_URL: &str = "mongodb://localhost:27017/rosehill_ops";

#[derive(Debug, Clone, Deserialize)]
pub struct OpsConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub seed: SeedConfig,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    /// Used only when `uri` names no default database.
    pub database: String,
    pub server_selection_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    pub enabled: bool,
    pub profiles_path: String,
    pub work_items_path: String,
}

impl OpsConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(OpsConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: get_env("MONGO_URL", Some(DEFAULT_MONGO_URL), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("rosehill_ops"), is_prod)?,
                server_selection_timeout_ms: parse_env(
                    "MONGODB_SERVER_SELECTION_TIMEOUT_MS",
                    &get_env("MONGODB_SERVER_SELECTION_TIMEOUT_MS", Some("5000"), is_prod)?,
                )?,
            },
            seed: SeedConfig {
                enabled: parse_env(
                    "SEED_ENABLED",
                    &env::var("SEED_ENABLED").unwrap_or_else(|_| "true".to_string()),
                )?,
                profiles_path: get_env("SEED_PROFILES_PATH", Some("seed/profiles.json"), is_prod)?,
                work_items_path: get_env(
                    "SEED_WORK_ITEMS_PATH",
                    Some("seed/work_items.json"),
                    is_prod,
                )?,
            },
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_env<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
    })
}
