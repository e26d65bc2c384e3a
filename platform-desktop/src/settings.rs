//! In-memory settings store

use platform_traits::storage::SettingsStore;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// Settings store that lives for the lifetime of the process.
///
/// Nothing is persisted. The map is guarded by a `RwLock` because desktop
/// hosts share one store across runtime worker threads.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn read_setting(&self, name: &str) -> Option<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(name).cloned()
    }

    fn write_setting(&self, name: &str, value: Option<String>) {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        match value {
            Some(value) => {
                values.insert(name.to_string(), value);
                debug!(key = name, "Stored setting");
            }
            None => {
                values.remove(name);
                debug!(key = name, "Unset setting");
            }
        }
    }

    fn list_keys(&self) -> Vec<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        let mut keys: Vec<String> = values.keys().cloned().collect();
        keys.sort();
        keys
    }

    fn clear_all(&self) {
        self.values
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        debug!("Cleared all settings");
    }
}
