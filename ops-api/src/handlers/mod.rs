pub mod health;
pub mod profiles;
pub mod work_items;

pub use health::{db_ping, health_check, metrics_endpoint, readiness_check};
pub use profiles::list_profiles;
pub use work_items::{create_work_item, list_work_items};
