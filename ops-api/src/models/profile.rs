use serde::{Deserialize, Serialize};

/// A business-function category (HR, Service, Parts, Delivery/BOL).
///
/// The natural `key` doubles as the document `_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: String,
    pub key: String,
    pub label: String,
    pub description: Option<String>,
}

impl Profile {
    pub fn new(key: String, label: String, description: Option<String>) -> Self {
        Self {
            id: key.clone(),
            key,
            label,
            description,
        }
    }
}
