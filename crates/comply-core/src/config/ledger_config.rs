//! Ledger (SQLite) configuration.

use serde::{Deserialize, Serialize};

use super::merge_fields;
use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LedgerConfig {
    /// Database file. Default: "comply_vault.db".
    pub db_path: Option<String>,
    /// Extra attempts for an audit append that hit a busy database. Default: 3.
    pub append_retries: Option<u32>,
    /// Delay between append retries in milliseconds. Default: 50.
    pub retry_backoff_ms: Option<u64>,
    /// SQLite busy timeout in milliseconds. Default: 5000.
    pub busy_timeout_ms: Option<u64>,
}

impl LedgerConfig {
    pub fn effective_db_path(&self) -> &str {
        self.db_path.as_deref().unwrap_or("comply_vault.db")
    }

    pub fn effective_append_retries(&self) -> u32 {
        self.append_retries.unwrap_or(3)
    }

    pub fn effective_retry_backoff_ms(&self) -> u64 {
        self.retry_backoff_ms.unwrap_or(50)
    }

    pub fn effective_busy_timeout_ms(&self) -> u64 {
        self.busy_timeout_ms.unwrap_or(5000)
    }

    pub(crate) fn merge_from(&mut self, other: &LedgerConfig) {
        merge_fields!(self, other;
            opt: [db_path, append_retries, retry_backoff_ms, busy_timeout_ms];
            coll: []);
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.db_path {
            if path.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "ledger.db_path".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
