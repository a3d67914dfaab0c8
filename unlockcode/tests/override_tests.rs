//! Reviewer bypass behavior; only built with `--features review-override`.

#![cfg(feature = "review-override")]

mod common;

use common::device_and_version;
use unlockcode::{CodeConfiguration, FactorOrder, UnlockCodeManager, validate};

#[test]
fn override_code_always_validates() {
    let config = CodeConfiguration::new(6, FactorOrder::default())
        .unwrap()
        .with_override_code("REVIEW-2024");

    assert!(validate("REVIEW-2024", "ABC123", &config));
    assert!(validate("REVIEW-2024", "", &config));
    assert!(validate("ABC123", "ABC123", &config));
    assert!(!validate("review-2024", "ABC123", &config));
}

#[test]
fn empty_override_is_cleared() {
    let config = CodeConfiguration::new(6, FactorOrder::default())
        .unwrap()
        .with_override_code("");
    assert_eq!(config.override_code(), None);
    assert!(!validate("", "ABC123", &config));
}

#[test]
fn override_unlocks_through_manager() {
    let mut manager = UnlockCodeManager::new(device_and_version(6)).unwrap();
    let config = manager.configuration(None).clone().with_override_code("REVIEW");
    manager.set_configuration(config);

    assert!(manager.unlock(Some("pro"), "REVIEW"));
    assert!(!manager.is_locked(Some("pro")));
}

#[test]
fn override_survives_reload() {
    let mut manager = UnlockCodeManager::new(device_and_version(6)).unwrap();
    let config = manager.configuration(None).clone().with_override_code("REVIEW");
    manager.set_configuration(config);
    manager.reload_configuration().unwrap();

    assert_eq!(manager.configuration(None).override_code(), Some("REVIEW"));
}

#[test]
fn build_time_override_is_never_empty() {
    let config = CodeConfiguration::new(6, FactorOrder::default()).unwrap();

    assert_ne!(config.override_code(), Some(""));
    assert!(!validate("", "ABC123", &config));
}
