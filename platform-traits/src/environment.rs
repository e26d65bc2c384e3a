//! Host environment introspection.
//!
//! Read-only facts about the process the SDK runs in, used to build telemetry
//! headers for the backend.

use serde::{Deserialize, Serialize};

/// Operating system the host runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingSystemInfo {
    pub name: String,
    pub version: String,
    pub architecture: String,
}

/// Identity of the SDK build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkInfo {
    /// Host flavour, e.g. `"Native"` or `"Web"`
    pub language: String,
    pub file_version: String,
}

impl SdkInfo {
    pub fn new(language: impl Into<String>, file_version: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            file_version: file_version.into(),
        }
    }
}

/// Host environment trait
///
/// Nothing here can be mutated through the platform layer.
pub trait HostEnvironment: Send + Sync {
    fn operating_system(&self) -> OperatingSystemInfo;

    fn sdk_info(&self) -> SdkInfo;

    /// User agent the host attaches to requests, if the SDK may set one.
    ///
    /// Hosts where the SDK cannot control the header return `None`.
    fn user_agent(&self) -> Option<String> {
        None
    }
}
