//! # Settings Store
//!
//! Small persisted configuration flags that are data, not build-time
//! config. Currently just the ACH payment flag: when disabled, the client
//! hides ACH as a payment method.

use std::sync::Arc;

use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Key for the ACH-configuration flag.
const ACH_ENABLED_KEY: &str = "ach_enabled";

/// Persisted configuration flags.
#[derive(Clone)]
pub struct SettingsStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SettingsStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        SettingsStore { kv }
    }

    /// Whether ACH payments are enabled. Defaults to `false` when unset.
    pub async fn ach_enabled(&self) -> StoreResult<bool> {
        Ok(self
            .kv
            .read(ACH_ENABLED_KEY)
            .await?
            .map(|raw| raw == "true")
            .unwrap_or(false))
    }

    /// Sets the ACH flag.
    pub async fn set_ach_enabled(&self, enabled: bool) -> StoreResult<()> {
        self.kv
            .write(ACH_ENABLED_KEY, if enabled { "true" } else { "false" })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    #[tokio::test]
    async fn test_ach_flag_defaults_off() {
        let settings = SettingsStore::new(Arc::new(MemoryStore::new()));
        assert!(!settings.ach_enabled().await.unwrap());

        settings.set_ach_enabled(true).await.unwrap();
        assert!(settings.ach_enabled().await.unwrap());

        settings.set_ach_enabled(false).await.unwrap();
        assert!(!settings.ach_enabled().await.unwrap());
    }
}
