//! Desktop environment introspection

use once_cell::sync::Lazy;
use platform_traits::environment::{HostEnvironment, OperatingSystemInfo, SdkInfo};
use tracing::debug;

/// Language tag reported by the desktop host.
pub const DESKTOP_LANGUAGE: &str = "Native";

/// Environment facts for the current desktop process.
#[derive(Debug, Clone)]
pub struct DesktopEnvironment {
    sdk: SdkInfo,
}

impl DesktopEnvironment {
    pub fn new() -> Self {
        Self::with_sdk_info(SdkInfo::new(DESKTOP_LANGUAGE, env!("CARGO_PKG_VERSION")))
    }

    pub fn with_sdk_info(sdk: SdkInfo) -> Self {
        Self { sdk }
    }
}

impl Default for DesktopEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEnvironment for DesktopEnvironment {
    fn operating_system(&self) -> OperatingSystemInfo {
        OperatingSystemInfo {
            name: std::env::consts::OS.to_string(),
            version: OS_RELEASE.clone(),
            architecture: std::env::consts::ARCH.to_string(),
        }
    }

    fn sdk_info(&self) -> SdkInfo {
        self.sdk.clone()
    }
}

/// Kernel/OS release string, probed once per process.
static OS_RELEASE: Lazy<String> = Lazy::new(|| {
    probe_release().unwrap_or_else(|| {
        debug!("Could not determine OS release");
        "unknown".to_string()
    })
});

#[cfg(target_os = "linux")]
fn probe_release() -> Option<String> {
    std::fs::read_to_string("/proc/sys/kernel/osrelease")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(target_os = "macos")]
fn probe_release() -> Option<String> {
    command_output("sw_vers", &["-productVersion"])
}

#[cfg(target_os = "windows")]
fn probe_release() -> Option<String> {
    command_output("cmd", &["/C", "ver"])
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn probe_release() -> Option<String> {
    None
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = std::process::Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}
