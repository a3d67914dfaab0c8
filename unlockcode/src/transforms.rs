//! Ready-made derivation hooks and factor helpers.
//!
//! Plug these into [`CodeTransforms`](crate::CodeTransforms) or use them to
//! prepare factor values on the host side.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `code`. Usable as an encryption hook.
#[must_use]
pub fn sha256_hex(code: &str) -> String {
    hex::encode(Sha256::digest(code.as_bytes()))
}

/// Uppercase hex SHA-256 of `code`. Usable as an encryption hook.
#[must_use]
pub fn sha256_hex_upper(code: &str) -> String {
    hex::encode_upper(Sha256::digest(code.as_bytes()))
}

/// Hashes an app version string into an app-version-hash factor value.
#[must_use]
pub fn app_version_hash(version: &str) -> String {
    sha256_hex(version.trim())
}

/// Renders a date factor as `YYYYMMDD`.
#[must_use]
pub fn format_factor_date(date: DateTime<Utc>) -> String {
    date.format("%Y%m%d").to_string()
}

/// Builds a resize hook that keeps `length` characters and inserts
/// `separator` after every `group` characters, e.g. `ABCD-EF12`.
///
/// A `group` of zero disables grouping.
pub fn grouped(
    length: usize,
    group: usize,
    separator: char,
) -> impl Fn(&str) -> String + Send + Sync + Clone + 'static {
    move |code: &str| {
        let mut out = String::with_capacity(length + length / group.max(1));
        for (i, c) in code.chars().take(length).enumerate() {
            if group > 0 && i > 0 && i % group == 0 {
                out.push(separator);
            }
            out.push(c);
        }
        out
    }
}
