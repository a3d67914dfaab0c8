//! Factor provider backed by the running machine.
//!
//! The device UID is a stable fingerprint of hardware and OS identifiers.
//! It survives reboots but changes when the machine identity changes.
//! Account, dates and version hash are supplied by the host.

use crate::factor::FactorOrder;
use crate::provider::FactorProvider;
use crate::transforms;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD as BASE64};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::env;

/// Information about the current device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub os_name: String,
    pub arch: String,
    pub hostname: String,
    /// Platform machine id, when one can be read.
    pub machine_id: Option<String>,
    pub user: Option<String>,
}

impl DeviceInfo {
    /// Collects information about the current device.
    #[must_use]
    pub fn collect() -> Self {
        Self {
            os_name: env::consts::OS.to_string(),
            arch: env::consts::ARCH.to_string(),
            hostname: get_hostname(),
            machine_id: get_machine_id(),
            user: env::var("USER").or_else(|_| env::var("USERNAME")).ok(),
        }
    }

    /// Hashes the identifiers into a device UID (base64url of the first
    /// 16 bytes of SHA-256).
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut components = vec![self.os_name.as_str(), self.arch.as_str(), self.hostname.as_str()];
        components.extend(self.machine_id.as_deref());
        components.extend(self.user.as_deref());

        let hash = Sha256::digest(components.join("|").as_bytes());
        BASE64.encode(&hash[..16])
    }
}

/// A [`FactorProvider`] that reads the device UID from this machine.
#[derive(Debug, Clone)]
pub struct SystemFactors {
    code_length: usize,
    code_order: Option<String>,
    device: DeviceInfo,
    user_account: Option<String>,
    user_account_created_date: Option<String>,
    app_version_hash: Option<String>,
    app_built_date: Option<String>,
}

impl SystemFactors {
    /// Collects device information once; other factors start empty.
    #[must_use]
    pub fn new(code_length: usize) -> Self {
        Self::with_device(code_length, DeviceInfo::collect())
    }

    /// Uses explicit device information.
    #[must_use]
    pub fn with_device(code_length: usize, device: DeviceInfo) -> Self {
        Self {
            code_length,
            code_order: None,
            device,
            user_account: None,
            user_account_created_date: None,
            app_version_hash: None,
            app_built_date: None,
        }
    }

    #[must_use]
    pub fn with_order(mut self, order: &FactorOrder) -> Self {
        self.code_order = Some(order.to_code_string());
        self
    }

    #[must_use]
    pub fn with_user_account(mut self, account: impl Into<String>) -> Self {
        self.user_account = Some(account.into());
        self
    }

    #[must_use]
    pub fn with_account_created(mut self, date: chrono::DateTime<chrono::Utc>) -> Self {
        self.user_account_created_date = Some(transforms::format_factor_date(date));
        self
    }

    /// Hashes `version` into the app-version-hash factor.
    #[must_use]
    pub fn with_app_version(mut self, version: &str) -> Self {
        self.app_version_hash = Some(transforms::app_version_hash(version));
        self
    }

    #[must_use]
    pub fn with_app_built(mut self, date: chrono::DateTime<chrono::Utc>) -> Self {
        self.app_built_date = Some(transforms::format_factor_date(date));
        self
    }

    #[must_use]
    pub fn device(&self) -> &DeviceInfo {
        &self.device
    }
}

impl FactorProvider for SystemFactors {
    fn code_length(&self) -> usize {
        self.code_length
    }

    fn code_order(&self) -> Option<String> {
        self.code_order.clone()
    }

    fn device_uid(&self) -> Option<String> {
        Some(self.device.fingerprint())
    }

    fn user_account(&self) -> Option<String> {
        self.user_account.clone()
    }

    fn user_account_created_date(&self) -> Option<String> {
        self.user_account_created_date.clone()
    }

    fn app_version_hash(&self) -> Option<String> {
        self.app_version_hash.clone()
    }

    fn app_built_date(&self) -> Option<String> {
        self.app_built_date.clone()
    }
}

fn get_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}

fn get_machine_id() -> Option<String> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("ioreg")
            .args(["-rd1", "-c", "IOPlatformExpertDevice"])
            .output()
            .ok()
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .and_then(|output| {
                output
                    .lines()
                    .find(|l| l.contains("IOPlatformUUID"))
                    .and_then(|l| l.split('"').nth(3))
                    .map(String::from)
            })
    }

    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/etc/machine-id")
            .or_else(|_| std::fs::read_to_string("/var/lib/dbus/machine-id"))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        None
    }
}
