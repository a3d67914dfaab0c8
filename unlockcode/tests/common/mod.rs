//! Shared test helpers for unlock-code tests.

#![allow(dead_code)]

use unlockcode::{FactorProvider, FactorType, StaticFactors};

/// The device/version pair used throughout the docs: `ABC123` + `9f8e`.
pub fn device_and_version(code_length: usize) -> StaticFactors {
    StaticFactors::new(code_length)
        .with_order("DeviceUID,AppVersionHash")
        .with_factor(FactorType::DeviceUid, "ABC123")
        .with_factor(FactorType::AppVersionHash, "9f8e")
}

/// Every factor populated with a distinct value.
pub fn all_factors(code_length: usize) -> StaticFactors {
    StaticFactors::new(code_length)
        .with_factor(FactorType::DeviceUid, "DEV")
        .with_factor(FactorType::UserAccount, "user@example.com")
        .with_factor(FactorType::UserAccountCreatedDate, "20130303")
        .with_factor(FactorType::AppVersionHash, "a1b2c3")
        .with_factor(FactorType::AppBuiltDate, "20240101")
}

/// A provider that only implements the required capability.
#[derive(Debug)]
pub struct LengthOnly(pub usize);

impl FactorProvider for LengthOnly {
    fn code_length(&self) -> usize {
        self.0
    }
}

/// A provider that only knows the device UID and its order.
#[derive(Debug)]
pub struct DeviceOnly {
    pub uid: &'static str,
    pub order: &'static str,
}

impl FactorProvider for DeviceOnly {
    fn code_length(&self) -> usize {
        8
    }

    fn code_order(&self) -> Option<String> {
        Some(self.order.to_string())
    }

    fn device_uid(&self) -> Option<String> {
        Some(self.uid.to_string())
    }
}
