//! # Platform Configuration
//!
//! A [`PlatformConfig`] holds the host bridges the platform layer delegates
//! to, plus the SDK identity and logging settings. It is assembled with
//! [`PlatformConfigBuilder`], which fails fast when a required bridge is
//! missing.
//!
//! ## Bridges
//!
//! - `HttpTransport` - required (desktop default: reqwest)
//! - `SettingsStore` - required (desktop default: in-memory map)
//! - `HostEnvironment` - required (desktop default: `std::env::consts`)
//! - `LoginProvider` - optional; hosts without one cannot log users in
//!
//! When the `desktop-shims` feature is enabled, desktop implementations are
//! injected for any required bridge the caller did not provide.
//!
//! ## Usage
//!
//! ```ignore
//! use platform_runtime::config::PlatformConfig;
//! use platform_traits::SdkInfo;
//!
//! let config = PlatformConfig::builder()
//!     .sdk_info(SdkInfo::new("Native", "1.0.0"))
//!     .build()?;
//! ```
//!
//! Without `desktop-shims`, every required bridge must be injected:
//!
//! ```ignore
//! let config = PlatformConfig::builder()
//!     .transport(Arc::new(MyTransport))
//!     .settings_store(Arc::new(MySettings))
//!     .environment(Arc::new(MyEnvironment))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use crate::logging::LoggingConfig;
use platform_traits::{
    HostEnvironment, HttpTransport, LoginProvider, NamespaceRegistry, SdkInfo, SettingsStore,
};
use std::fmt;
use std::sync::Arc;

/// Bridges and settings for a platform context.
///
/// Use [`PlatformConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct PlatformConfig {
    pub transport: Arc<dyn HttpTransport>,

    pub settings_store: Arc<dyn SettingsStore>,

    pub environment: Arc<dyn HostEnvironment>,

    /// `None` means login is unsupported on this host.
    pub login_provider: Option<Arc<dyn LoginProvider>>,

    /// Overrides the identity reported by `environment`.
    pub sdk_info: Option<SdkInfo>,

    /// Namespace the client publishes its declarations into.
    pub namespace: &'static NamespaceRegistry,

    /// Applied by [`PlatformContext::new`](crate::context::PlatformContext::new)
    /// when present.
    pub logging: Option<LoggingConfig>,
}

impl fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("transport", &"HttpTransport { ... }")
            .field("settings_store", &"SettingsStore { ... }")
            .field("environment", &"HostEnvironment { ... }")
            .field(
                "login_provider",
                &self.login_provider.as_ref().map(|_| "LoginProvider { ... }"),
            )
            .field("sdk_info", &self.sdk_info)
            .field("namespace", &self.namespace.name())
            .field("logging", &self.logging)
            .finish()
    }
}

impl PlatformConfig {
    pub fn builder() -> PlatformConfigBuilder {
        PlatformConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// An SDK identity override must name both a language and a version.
    pub fn validate(&self) -> Result<()> {
        if let Some(sdk) = &self.sdk_info {
            if sdk.language.trim().is_empty() {
                return Err(Error::Config("SDK language cannot be empty".to_string()));
            }
            if sdk.file_version.trim().is_empty() {
                return Err(Error::Config("SDK file version cannot be empty".to_string()));
            }
        }

        Ok(())
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn capability_missing(capability: &str, purpose: &str) -> Error {
    Error::CapabilityMissing {
        capability: capability.to_string(),
        message: format!(
            "{} implementation is required for {}. \
             Desktop: enable the 'desktop-shims' feature to use the default implementation. \
             Other hosts: inject a platform-native implementation.",
            capability, purpose
        ),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_transport() -> Result<Arc<dyn HttpTransport>> {
    use platform_desktop::ReqwestTransport;

    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new()?);
    Ok(transport)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_transport() -> Result<Arc<dyn HttpTransport>> {
    Err(capability_missing("HttpTransport", "network requests"))
}

#[cfg(feature = "desktop-shims")]
fn provide_default_settings_store() -> Result<Arc<dyn SettingsStore>> {
    use platform_desktop::InMemorySettingsStore;

    let store: Arc<dyn SettingsStore> = Arc::new(InMemorySettingsStore::new());
    Ok(store)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_settings_store() -> Result<Arc<dyn SettingsStore>> {
    Err(capability_missing("SettingsStore", "persisting client settings"))
}

#[cfg(feature = "desktop-shims")]
fn provide_default_environment() -> Result<Arc<dyn HostEnvironment>> {
    use platform_desktop::DesktopEnvironment;

    let environment: Arc<dyn HostEnvironment> = Arc::new(DesktopEnvironment::new());
    Ok(environment)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_environment() -> Result<Arc<dyn HostEnvironment>> {
    Err(capability_missing("HostEnvironment", "telemetry headers"))
}

#[cfg(feature = "desktop-shims")]
fn provide_default_login_provider() -> Option<Arc<dyn LoginProvider>> {
    use platform_desktop::UnsupportedLogin;

    let login: Arc<dyn LoginProvider> = Arc::new(UnsupportedLogin);
    Some(login)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_login_provider() -> Option<Arc<dyn LoginProvider>> {
    None
}

/// Builder for [`PlatformConfig`].
#[derive(Default)]
pub struct PlatformConfigBuilder {
    transport: Option<Arc<dyn HttpTransport>>,
    settings_store: Option<Arc<dyn SettingsStore>>,
    environment: Option<Arc<dyn HostEnvironment>>,
    login_provider: Option<Arc<dyn LoginProvider>>,
    sdk_info: Option<SdkInfo>,
    namespace: Option<&'static NamespaceRegistry>,
    logging: Option<LoggingConfig>,
}

impl PlatformConfigBuilder {
    /// Sets the HTTP transport.
    ///
    /// If not provided, the reqwest transport is used when the
    /// `desktop-shims` feature is enabled.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn settings_store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.settings_store = Some(store);
        self
    }

    pub fn environment(mut self, environment: Arc<dyn HostEnvironment>) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn login_provider(mut self, provider: Arc<dyn LoginProvider>) -> Self {
        self.login_provider = Some(provider);
        self
    }

    /// Report this SDK identity instead of the environment's.
    pub fn sdk_info(mut self, sdk_info: SdkInfo) -> Self {
        self.sdk_info = Some(sdk_info);
        self
    }

    /// Publish into `namespace` instead of the process-wide one.
    pub fn namespace(mut self, namespace: &'static NamespaceRegistry) -> Self {
        self.namespace = Some(namespace);
        self
    }

    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::CapabilityMissing`] if a required bridge was not provided
    ///   and no desktop default is available
    /// - [`Error::Config`] if validation fails
    pub fn build(self) -> Result<PlatformConfig> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => provide_default_transport()?,
        };

        let settings_store = match self.settings_store {
            Some(store) => store,
            None => provide_default_settings_store()?,
        };

        let environment = match self.environment {
            Some(environment) => environment,
            None => provide_default_environment()?,
        };

        let config = PlatformConfig {
            transport,
            settings_store,
            environment,
            login_provider: self.login_provider.or_else(provide_default_login_provider),
            sdk_info: self.sdk_info,
            namespace: self.namespace.unwrap_or_else(NamespaceRegistry::global),
            logging: self.logging,
        };

        config.validate()?;
        Ok(config)
    }
}
