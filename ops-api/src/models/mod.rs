pub mod profile;
pub mod work_item;

pub use profile::Profile;
pub use work_item::{WorkItem, WorkPriority, WorkStatus};
