//! Profile loading and commands for the `unlockcode` tool.
//!
//! A profile is a TOML or JSON file describing one customer's factors:
//!
//! ```toml
//! code_length = 8
//! code_order = "DeviceUID,AppVersionHash"
//! device_uid = "ABC123"
//! app_version_hash = "9f8e"
//! ```

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;
use unlockcode::transforms::{grouped, sha256_hex, sha256_hex_upper};
use unlockcode::{CodeTransforms, FactorType, StaticFactors, UnlockCodeManager};

/// Loads a profile. `.toml` files are parsed as TOML, anything else as JSON.
pub fn load_profile(path: &Path) -> Result<StaticFactors> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;

    let profile = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML profile {}", path.display()))?,
        _ => serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON profile {}", path.display()))?,
    };

    debug!("Loaded profile from {:?}", path);
    Ok(profile)
}

/// Factor values given on the command line; each replaces the profile value.
#[derive(Debug, Clone, Default)]
pub struct FactorOverrides {
    pub code_length: Option<usize>,
    pub code_order: Option<String>,
    pub device_uid: Option<String>,
    pub user_account: Option<String>,
    pub user_account_created_date: Option<String>,
    pub app_version_hash: Option<String>,
    pub app_built_date: Option<String>,
}

impl FactorOverrides {
    /// Applies the overrides on top of `profile`.
    #[must_use]
    pub fn apply(self, mut profile: StaticFactors) -> StaticFactors {
        if let Some(len) = self.code_length {
            profile.code_length = len;
        }
        if self.code_order.is_some() {
            profile.code_order = self.code_order;
        }

        for (factor, value) in [
            (FactorType::DeviceUid, self.device_uid),
            (FactorType::UserAccount, self.user_account),
            (FactorType::UserAccountCreatedDate, self.user_account_created_date),
            (FactorType::AppVersionHash, self.app_version_hash),
            (FactorType::AppBuiltDate, self.app_built_date),
        ] {
            if value.is_some() {
                profile.set_factor(factor, value);
            }
        }
        profile
    }
}

/// Built-in encryption hooks selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EncryptMode {
    /// Lowercase hex SHA-256.
    Sha256,
    /// Uppercase hex SHA-256.
    Sha256Upper,
}

/// Derivation hooks selected on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct HookOptions {
    pub encrypt: Option<EncryptMode>,
    /// Group size for `XXXX-XXXX` style codes.
    pub group: Option<usize>,
}

impl HookOptions {
    /// Builds the transforms for a profile with the given code length.
    #[must_use]
    pub fn transforms(&self, code_length: usize) -> CodeTransforms {
        let mut transforms = CodeTransforms::new();
        transforms = match self.encrypt {
            Some(EncryptMode::Sha256) => transforms.with_encrypt(sha256_hex),
            Some(EncryptMode::Sha256Upper) => transforms.with_encrypt(sha256_hex_upper),
            None => transforms,
        };
        if let Some(group) = self.group {
            transforms = transforms.with_resize(grouped(code_length, group, '-'));
        }
        transforms
    }
}

/// Builds a manager for `profile`.
pub fn build_manager(
    profile: StaticFactors,
    hooks: HookOptions,
) -> Result<UnlockCodeManager<StaticFactors>> {
    if profile.code_length == 0 {
        bail!("Profile has no code_length; set it in the profile or pass --length");
    }
    let transforms = hooks.transforms(profile.code_length);
    UnlockCodeManager::with_transforms(profile, transforms).context("Invalid profile")
}

/// Derives the expected code for `feature`.
pub fn derive_code(
    profile: StaticFactors,
    hooks: HookOptions,
    feature: Option<&str>,
) -> Result<String> {
    let manager = build_manager(profile, hooks)?;
    Ok(manager.expected_code(feature))
}

/// Checks `code` for `feature`.
pub fn check_code(
    profile: StaticFactors,
    hooks: HookOptions,
    feature: Option<&str>,
    code: &str,
) -> Result<bool> {
    let mut manager = build_manager(profile, hooks)?;
    Ok(manager.unlock(feature, code))
}

/// One line of the `factors` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorReport {
    pub factor: String,
    pub code: char,
    pub value: String,
}

/// Lists the factors that feed the code, in order.
pub fn list_factors(profile: StaticFactors, feature: Option<&str>) -> Result<Vec<FactorReport>> {
    let manager = build_manager(profile, HookOptions::default())?;
    Ok(manager
        .resolved_factors(feature)
        .entries()
        .iter()
        .map(|f| FactorReport {
            factor: f.factor.name().to_string(),
            code: f.factor.code(),
            value: f.value.clone(),
        })
        .collect())
}
