//! Named capability registry.
//!
//! The SDK publishes its public entry points (client types, helpers) under a
//! single namespace so hosts can discover them by name. Registrations are
//! last-write-wins.

use once_cell::sync::Lazy;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Name of the process-wide client namespace.
pub const CLIENT_NAMESPACE: &str = "WindowsAzure";

/// A value published in a namespace.
pub type Declaration = Arc<dyn Any + Send + Sync>;

static GLOBAL: Lazy<NamespaceRegistry> = Lazy::new(|| NamespaceRegistry::new(CLIENT_NAMESPACE));

/// Registry of named declarations.
pub struct NamespaceRegistry {
    name: String,
    entries: RwLock<HashMap<String, Declaration>>,
}

impl fmt::Debug for NamespaceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespaceRegistry")
            .field("name", &self.name)
            .field("declarations", &self.names())
            .finish()
    }
}

impl NamespaceRegistry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide client namespace, created on first use.
    pub fn global() -> &'static NamespaceRegistry {
        &GLOBAL
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Merge `declarations` into the namespace, overwriting existing names.
    pub fn register<I, K>(&self, declarations: I)
    where
        I: IntoIterator<Item = (K, Declaration)>,
        K: Into<String>,
    {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let mut count = 0usize;
        for (key, value) in declarations {
            entries.insert(key.into(), value);
            count += 1;
        }
        debug!(namespace = %self.name, count, "Registered declarations");
    }

    /// Publish a single value under `name`.
    pub fn declare<T: Any + Send + Sync>(&self, name: impl Into<String>, value: T) {
        let declaration: Declaration = Arc::new(value);
        self.register([(name.into(), declaration)]);
    }

    /// Fetch the value published under `name` if it has type `T`.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(name).cloned()?.downcast::<T>().ok()
    }

    pub fn contains(&self, name: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.contains_key(name)
    }

    /// Declared names, sorted.
    pub fn names(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        let mut names: Vec<String> = entries.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = NamespaceRegistry::new("Test");
        let version: Declaration = Arc::new("1.0.0".to_string());
        let retries: Declaration = Arc::new(3u32);
        registry.register([("Version", version), ("Retries", retries)]);

        assert_eq!(registry.get::<String>("Version").as_deref(), Some(&"1.0.0".to_string()));
        assert_eq!(registry.get::<u32>("Retries").as_deref(), Some(&3));
        assert_eq!(registry.names(), vec!["Retries", "Version"]);
    }

    #[test]
    fn test_last_write_wins() {
        let registry = NamespaceRegistry::new("Test");
        registry.declare("MobileServiceClient", 1u8);
        registry.declare("MobileServiceClient", 2u8);

        assert_eq!(registry.get::<u8>("MobileServiceClient").as_deref(), Some(&2));
        assert_eq!(registry.names().len(), 1);
    }

    #[test]
    fn test_wrong_type_is_none() {
        let registry = NamespaceRegistry::new("Test");
        registry.declare("Version", "1.0.0");

        assert!(registry.contains("Version"));
        assert!(registry.get::<u32>("Version").is_none());
        assert!(registry.get::<&str>("Missing").is_none());
    }

    #[test]
    fn test_global_is_shared() {
        let first = NamespaceRegistry::global();
        first.declare("namespace_test_marker", true);

        let second = NamespaceRegistry::global();
        assert_eq!(second.name(), CLIENT_NAMESPACE);
        assert!(second.contains("namespace_test_marker"));
    }

    #[test]
    fn test_register_emits_debug_event() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let registry = NamespaceRegistry::new("Logged");
            registry.declare("Version", "1.0.0");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Registered declarations"));
        assert!(output.contains("namespace=Logged"));
        assert!(output.contains("count=1"));
    }
}
