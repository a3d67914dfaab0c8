use unlockcode::{
    DeviceInfo, FactorOrder, FactorProvider, FactorType, SystemFactors, UnlockCodeManager,
};

fn fixed_device() -> DeviceInfo {
    DeviceInfo {
        os_name: "linux".into(),
        arch: "x86_64".into(),
        hostname: "build-host".into(),
        machine_id: Some("0123456789abcdef".into()),
        user: Some("kim".into()),
    }
}

#[test]
fn device_info_collection() {
    let info = DeviceInfo::collect();
    assert!(!info.os_name.is_empty());
    assert!(!info.arch.is_empty());
    assert!(!info.hostname.is_empty());
}

#[test]
fn fingerprint_is_stable() {
    let info = DeviceInfo::collect();
    assert_eq!(info.fingerprint(), info.fingerprint());
    assert_eq!(DeviceInfo::collect().fingerprint(), info.fingerprint());
}

#[test]
fn fingerprint_shape() {
    // 16 bytes, base64url without padding
    let uid = fixed_device().fingerprint();
    assert_eq!(uid.len(), 22);
    assert!(uid.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
}

#[test]
fn fingerprint_changes_with_machine_id() {
    let mut other = fixed_device();
    other.machine_id = Some("fedcba9876543210".into());
    assert_ne!(fixed_device().fingerprint(), other.fingerprint());
}

#[test]
fn device_info_serde() {
    let info = fixed_device();
    let json = serde_json::to_string(&info).unwrap();
    let parsed: DeviceInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.fingerprint(), info.fingerprint());
}

#[test]
fn system_factors_supply_device_uid() {
    let factors = SystemFactors::with_device(8, fixed_device());
    assert_eq!(factors.device_uid(), Some(fixed_device().fingerprint()));
    assert_eq!(factors.factor_value(FactorType::UserAccount), None);
}

#[test]
fn system_factors_host_values() {
    use chrono::TimeZone;

    let created = chrono::Utc.with_ymd_and_hms(2013, 3, 3, 0, 0, 0).unwrap();
    let factors = SystemFactors::with_device(64, fixed_device())
        .with_order(&FactorOrder::parse("UCV"))
        .with_user_account("kim@example.com")
        .with_account_created(created)
        .with_app_version("2.4.1");

    assert_eq!(factors.code_order().as_deref(), Some("UCV"));
    assert_eq!(factors.user_account_created_date().as_deref(), Some("20130303"));
    assert_eq!(
        factors.app_version_hash(),
        Some(unlockcode::transforms::app_version_hash("2.4.1"))
    );

    let manager = UnlockCodeManager::new(factors).unwrap();
    let expected = format!(
        "kim@example.com20130303{}",
        unlockcode::transforms::app_version_hash("2.4.1")
    );
    assert_eq!(manager.expected_code(None), expected[..64]);
}

#[test]
fn system_factors_unlock_on_this_machine() {
    let mut manager = UnlockCodeManager::new(SystemFactors::new(10)).unwrap();
    let code = manager.expected_code(None);
    assert_eq!(code.chars().count(), 10);
    assert!(manager.unlock(None, &code));
}
