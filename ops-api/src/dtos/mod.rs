pub mod profiles;
pub mod work_items;

pub use profiles::{ProfileResponse, ProfileSeed};
pub use work_items::{WorkItemCreate, WorkItemFilter, WorkItemListParams, WorkItemResponse};
