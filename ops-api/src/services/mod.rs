pub mod database;
pub mod metrics;
pub mod seed;

pub use database::OpsDb;
pub use self::metrics::{get_metrics, init_metrics, record_work_item_created};
pub use seed::{seed_database, SeedReport};
