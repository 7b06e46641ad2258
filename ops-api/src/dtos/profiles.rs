use crate::models::Profile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ProfileResponse {
    pub id: String,
    pub key: String,
    pub label: String,
    pub description: Option<String>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            key: profile.key,
            label: profile.label,
            description: profile.description,
        }
    }
}

/// Record shape of the profiles seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSeed {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<ProfileSeed> for Profile {
    fn from(seed: ProfileSeed) -> Self {
        Profile::new(seed.key, seed.label, seed.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_without_description_serializes_null() {
        let seed: ProfileSeed = serde_json::from_str(r#"{"key":"hr","label":"HR"}"#).unwrap();
        let response = ProfileResponse::from(Profile::from(seed));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"id":"hr","key":"hr","label":"HR","description":null})
        );
    }
}
