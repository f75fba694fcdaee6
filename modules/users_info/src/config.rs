use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the users_info module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsersInfoConfig {
    /// First id handed out by the in-memory store.
    #[serde(default = "default_first_id")]
    pub first_id: i64,
    /// Let the store reject duplicate usernames/emails atomically on save.
    #[serde(default = "default_unique_index")]
    pub unique_index: bool,
}

impl Default for UsersInfoConfig {
    fn default() -> Self {
        Self {
            first_id: default_first_id(),
            unique_index: default_unique_index(),
        }
    }
}

fn default_first_id() -> i64 {
    1
}

fn default_unique_index() -> bool {
    true
}

impl UsersInfoConfig {
    /// Build from a raw module config value; `None` yields defaults.
    pub fn from_value(value: Option<&serde_json::Value>) -> Result<Self> {
        let config = match value {
            Some(v) => serde_json::from_value::<Self>(v.clone())
                .context("Invalid users_info module config")?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.first_id > 0,
            "users_info.first_id must be positive (got {})",
            self.first_id
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let config = UsersInfoConfig::default();
        assert_eq!(config.first_id, 1);
        assert!(config.unique_index);
    }

    #[test]
    fn from_value_fills_missing_fields() {
        let value = json!({ "first_id": 500 });
        let config = UsersInfoConfig::from_value(Some(&value)).unwrap();
        assert_eq!(config.first_id, 500);
        assert!(config.unique_index);

        assert_eq!(
            UsersInfoConfig::from_value(None).unwrap(),
            UsersInfoConfig::default()
        );
    }

    #[test]
    fn rejects_unknown_fields_and_non_positive_first_id() {
        assert!(UsersInfoConfig::from_value(Some(&json!({ "page_size": 5 }))).is_err());
        let err = UsersInfoConfig::from_value(Some(&json!({ "first_id": 0 }))).unwrap_err();
        assert!(err.to_string().contains("first_id must be positive"));
    }
}
