//! # Platform Context
//!
//! The single object SDK code holds to reach the host. It forwards each
//! operation to the bridge configured for it and owns nothing else.
//!
//! ```ignore
//! use platform_runtime::{PlatformConfig, PlatformContext};
//! use platform_traits::RequestSpec;
//!
//! let context = PlatformContext::new(PlatformConfig::builder().build()?)?;
//! let response = context
//!     .web_request_async(RequestSpec::new("https://example.azure-mobile.net/tables/movies"))
//!     .await?;
//! ```

use crate::config::PlatformConfig;
use crate::error::Result;
use crate::logging::init_logging;
use chrono::{DateTime, Utc};
use platform_async::AsyncOperation;
use platform_traits::{
    json, namespace::Declaration, resources, try_parse_iso_date, HostEnvironment,
    HttpTransport, LoginCallback, LoginProvider, NamespaceRegistry, OperatingSystemInfo,
    PlatformError, RequestSpec, ResponseEnvelope, SdkInfo, SettingsStore, TransportCallback,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Host services for one SDK client.
///
/// Cheap to clone; clones share the same bridges.
#[derive(Clone, Debug)]
pub struct PlatformContext {
    config: Arc<PlatformConfig>,
}

impl PlatformContext {
    /// Create a context, installing the configured logging first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if logging was
    /// configured but could not be installed.
    pub fn new(mut config: PlatformConfig) -> Result<Self> {
        if let Some(logging) = config.logging.take() {
            init_logging(logging)?;
        }

        let context = Self {
            config: Arc::new(config),
        };

        let os = context.operating_system();
        let sdk = context.sdk_info();
        info!(
            os = %os.name,
            os_version = %os.version,
            language = %sdk.language,
            sdk_version = %sdk.file_version,
            "Platform context created"
        );

        Ok(context)
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    // ========================================================================
    // Network
    // ========================================================================

    /// Start one HTTP exchange; `callback` fires exactly once.
    pub fn web_request(&self, request: RequestSpec, callback: TransportCallback) {
        self.config.transport.send(request, callback);
    }

    pub fn web_request_async(
        &self,
        request: RequestSpec,
    ) -> AsyncOperation<ResponseEnvelope, PlatformError> {
        self.config.transport.send_async(request)
    }

    // ========================================================================
    // Settings
    // ========================================================================

    pub fn read_setting(&self, name: &str) -> Option<String> {
        self.config.settings_store.read_setting(name)
    }

    /// Write a setting; `None` unsets it.
    pub fn write_setting(&self, name: &str, value: Option<String>) {
        self.config.settings_store.write_setting(name, value);
    }

    // ========================================================================
    // Login
    // ========================================================================

    pub fn is_login_supported(&self) -> bool {
        self.config
            .login_provider
            .as_ref()
            .is_some_and(|provider| provider.is_supported())
    }

    /// Start a browser login flow.
    ///
    /// # Errors
    ///
    /// Fails immediately with [`PlatformError::Unsupported`] on hosts without
    /// a login provider, or whatever the provider reports.
    pub fn login(
        &self,
        start_uri: &str,
        end_uri: Option<&str>,
        callback: LoginCallback,
    ) -> platform_traits::Result<()> {
        match &self.config.login_provider {
            Some(provider) => provider.login(start_uri, end_uri, callback),
            None => Err(self.login_unsupported()),
        }
    }

    pub fn login_async(
        &self,
        start_uri: impl Into<String>,
        end_uri: Option<String>,
    ) -> AsyncOperation<String, PlatformError> {
        match &self.config.login_provider {
            Some(provider) => provider.login_async(start_uri.into(), end_uri),
            None => {
                let (done, operation) = platform_async::settlement();
                done.fail(self.login_unsupported());
                operation
            }
        }
    }

    fn login_unsupported(&self) -> PlatformError {
        let host = self.operating_system().name;
        PlatformError::Unsupported(resources::format_resource(
            "Platform_LoginNotSupported",
            &[host.as_str()],
        ))
    }

    // ========================================================================
    // Environment
    // ========================================================================

    pub fn operating_system(&self) -> OperatingSystemInfo {
        self.config.environment.operating_system()
    }

    /// The configured SDK identity, or the environment's.
    pub fn sdk_info(&self) -> SdkInfo {
        self.config
            .sdk_info
            .clone()
            .unwrap_or_else(|| self.config.environment.sdk_info())
    }

    pub fn user_agent(&self) -> Option<String> {
        self.config.environment.user_agent()
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    pub fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> platform_traits::Result<String> {
        json::to_json(value)
    }

    pub fn try_parse_iso_date(&self, text: &str) -> Option<DateTime<Utc>> {
        try_parse_iso_date(text)
    }

    pub fn resource_string(&self, name: &str) -> Option<&'static str> {
        resources::resource_string(name)
    }

    pub fn allow_platform_to_mutate_original(&self, original: &Value, updated: Value) -> Value {
        json::allow_platform_to_mutate_original(original, updated)
    }

    // ========================================================================
    // Namespace
    // ========================================================================

    pub fn namespace(&self) -> &'static NamespaceRegistry {
        self.config.namespace
    }

    /// Publish `declarations` into the client namespace. Later registrations
    /// of the same name win.
    pub fn add_to_client_namespace<I, K>(&self, declarations: I)
    where
        I: IntoIterator<Item = (K, Declaration)>,
        K: Into<String>,
    {
        let namespace = self.config.namespace;
        namespace.register(declarations);
        debug!(namespace = namespace.name(), "Registered client declarations");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::*;
    use std::collections::HashMap;

    mock! {
        Transport {}

        impl HttpTransport for Transport {
            fn send(&self, request: RequestSpec, callback: TransportCallback);
        }
    }

    mock! {
        Settings {}

        impl SettingsStore for Settings {
            fn read_setting(&self, name: &str) -> Option<String>;
            fn write_setting(&self, name: &str, value: Option<String>);
            fn list_keys(&self) -> Vec<String>;
            fn clear_all(&self);
        }
    }

    mock! {
        Environment {}

        impl HostEnvironment for Environment {
            fn operating_system(&self) -> OperatingSystemInfo;
            fn sdk_info(&self) -> SdkInfo;
            fn user_agent(&self) -> Option<String>;
        }
    }

    fn environment() -> MockEnvironment {
        let mut env = MockEnvironment::new();
        env.expect_operating_system().returning(|| OperatingSystemInfo {
            name: "linux".into(),
            version: "6.1".into(),
            architecture: "x86_64".into(),
        });
        env.expect_sdk_info()
            .returning(|| SdkInfo::new("Native", "1.0.0"));
        env.expect_user_agent().returning(|| None);
        env
    }

    fn context_with(transport: MockTransport, settings: MockSettings) -> PlatformContext {
        let config = PlatformConfig::builder()
            .transport(Arc::new(transport))
            .settings_store(Arc::new(settings))
            .environment(Arc::new(environment()))
            .namespace(Box::leak(Box::new(NamespaceRegistry::new("Test"))))
            .build()
            .unwrap();
        PlatformContext::new(config).unwrap()
    }

    fn ok_response(status: u16) -> ResponseEnvelope {
        ResponseEnvelope {
            status,
            headers: HashMap::new(),
            body: "[]".into(),
            url: "http://localhost/tables/movies".into(),
        }
    }

    #[tokio::test]
    async fn test_web_request_async_delegates_to_transport() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request, _| request.url == "http://localhost/tables/movies")
            .times(1)
            .returning(|_, callback| callback(Ok(ok_response(200))));

        let context = context_with(transport, MockSettings::new());
        let response = context
            .web_request_async(RequestSpec::new("http://localhost/tables/movies"))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.text().unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_web_request_async_surfaces_transport_error() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_, callback| {
            callback(Err(PlatformError::Transport("connection reset".into())))
        });

        let context = context_with(transport, MockSettings::new());
        let result = context
            .web_request_async(RequestSpec::new("http://localhost/"))
            .await;

        assert!(matches!(result, Err(PlatformError::Transport(_))));
    }

    #[test]
    fn test_settings_delegate_to_store() {
        let mut settings = MockSettings::new();
        settings
            .expect_write_setting()
            .with(eq("installationId"), eq(Some("abc".to_string())))
            .times(1)
            .return_const(());
        settings
            .expect_read_setting()
            .with(eq("installationId"))
            .times(1)
            .returning(|_| Some("abc".to_string()));

        let context = context_with(MockTransport::new(), settings);
        context.write_setting("installationId", Some("abc".to_string()));
        assert_eq!(context.read_setting("installationId"), Some("abc".to_string()));
    }

    #[tokio::test]
    async fn test_login_is_unsupported_by_default() {
        let context = context_with(MockTransport::new(), MockSettings::new());

        assert!(!context.is_login_supported());
        let result = context.login("https://x/login", None, Box::new(|_| {}));
        match result {
            Err(PlatformError::Unsupported(message)) => {
                assert!(message.starts_with("Login is not supported on the"))
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let result = context.login_async("https://x/login", None).await;
        assert!(matches!(result, Err(PlatformError::Unsupported(_))));
    }

    #[test]
    fn test_sdk_info_prefers_configured_identity() {
        let config = PlatformConfig::builder()
            .transport(Arc::new(MockTransport::new()))
            .settings_store(Arc::new(MockSettings::new()))
            .environment(Arc::new(environment()))
            .sdk_info(SdkInfo::new("Native", "2.1.0"))
            .build()
            .unwrap();
        let context = PlatformContext::new(config).unwrap();

        assert_eq!(context.sdk_info(), SdkInfo::new("Native", "2.1.0"));
        assert_eq!(context.operating_system().architecture, "x86_64");
        assert_eq!(context.user_agent(), None);
    }

    #[test]
    fn test_helpers() {
        let context = context_with(MockTransport::new(), MockSettings::new());

        assert_eq!(context.to_json(&serde_json::json!({"a": 1})).unwrap(), r#"{"a":1}"#);
        assert!(context.try_parse_iso_date("2013-01-02T03:04:05.678Z").is_some());
        assert!(context.try_parse_iso_date("2013-01-02").is_none());
        assert_eq!(
            context.resource_string("Validate_NotNullError"),
            Some("{0} cannot be null.")
        );

        let original = serde_json::json!({"id": 1, "title": "old"});
        let updated = serde_json::json!({"id": 1, "title": "new"});
        assert_eq!(
            context.allow_platform_to_mutate_original(&original, updated.clone()),
            updated
        );
    }

    #[test]
    fn test_add_to_client_namespace_last_write_wins() {
        let context = context_with(MockTransport::new(), MockSettings::new());
        let first: Declaration = Arc::new(1u32);
        let second: Declaration = Arc::new(2u32);

        context.add_to_client_namespace([("MobileServiceClient", first)]);
        context.add_to_client_namespace([("MobileServiceClient", second)]);

        assert_eq!(context.namespace().name(), "Test");
        assert_eq!(
            context.namespace().get::<u32>("MobileServiceClient").as_deref(),
            Some(&2)
        );
    }
}
