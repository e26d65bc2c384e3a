//! Settings Storage Abstraction
//!
//! Host-provided key/value configuration: read-mostly, write-rare, and only
//! guaranteed to live as long as the process.

/// Key-value settings storage trait
///
/// Abstracts platform-specific settings storage:
/// - Desktop: in-memory map for the process lifetime
/// - Browser: localStorage
/// - Embedded shells: whatever preferences API the shell exposes
///
/// Values are plain strings; `None` is the "unset" value. Stores perform no
/// validation of names or values.
///
/// # Example
///
/// ```ignore
/// use platform_traits::storage::SettingsStore;
///
/// fn remember_installation(store: &dyn SettingsStore, id: &str) {
///     if store.read_setting("MobileServices.Installation.config").is_none() {
///         store.write_setting("MobileServices.Installation.config", Some(id.to_string()));
///     }
/// }
/// ```
pub trait SettingsStore: Send + Sync {
    /// Read a setting, returning `None` if it was never written or was unset.
    fn read_setting(&self, name: &str) -> Option<String>;

    /// Write a setting. Writing `None` unsets it.
    fn write_setting(&self, name: &str, value: Option<String>);

    /// Unset a setting. Same as writing `None`.
    fn remove_setting(&self, name: &str) {
        self.write_setting(name, None);
    }

    /// Check if a setting currently has a value
    fn has_key(&self, name: &str) -> bool {
        self.read_setting(name).is_some()
    }

    /// List all setting names that currently have a value
    fn list_keys(&self) -> Vec<String>;

    /// Clear all settings
    fn clear_all(&self);
}
