use unlockcode::UnlockError;

#[test]
fn error_display_invalid_code_length() {
    let err = UnlockError::InvalidCodeLength(0);
    let msg = format!("{err}");
    assert!(msg.contains("invalid code length"));
    assert!(msg.contains('0'));
}

#[test]
fn error_from_serde_json() {
    let serde_err: Result<serde_json::Value, _> = serde_json::from_str("not json");
    let err: UnlockError = serde_err.unwrap_err().into();
    assert!(format!("{err}").contains("serialization"));
}

#[test]
fn error_is_debug() {
    let err = UnlockError::InvalidCodeLength(0);
    let _ = format!("{err:?}");
}
