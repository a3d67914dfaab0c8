//! Expected-code derivation and candidate validation.
//!
//! Derivation:
//! 1. concatenate resolved factor values in order, no separator;
//! 2. apply the encryption hook if present;
//! 3. apply the resize hook if present and return its output verbatim;
//! 4. otherwise keep the first `code_length` characters. Shorter strings
//!    are returned unchanged; nothing is padded.

use crate::config::CodeConfiguration;
use crate::resolver::ResolvedFactors;
use std::fmt;
use std::sync::Arc;

/// A host post-processing hook.
pub type CodeHook = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Optional host hooks applied during derivation.
#[derive(Clone, Default)]
pub struct CodeTransforms {
    encrypt: Option<CodeHook>,
    resize: Option<CodeHook>,
}

impl CodeTransforms {
    /// No hooks: identity encryption, truncating resize.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hook that replaces the raw composite.
    #[must_use]
    pub fn with_encrypt<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.encrypt = Some(Arc::new(f));
        self
    }

    /// Sets the hook that produces the final code, bypassing truncation.
    #[must_use]
    pub fn with_resize<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.resize = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn has_encrypt(&self) -> bool {
        self.encrypt.is_some()
    }

    #[must_use]
    pub fn has_resize(&self) -> bool {
        self.resize.is_some()
    }
}

impl fmt::Debug for CodeTransforms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeTransforms")
            .field("encrypt", &self.has_encrypt())
            .field("resize", &self.has_resize())
            .finish()
    }
}

/// Derives the code a valid candidate must equal.
#[must_use]
pub fn derive_expected_code(
    factors: &ResolvedFactors,
    config: &CodeConfiguration,
    transforms: &CodeTransforms,
) -> String {
    let composite = factors.composite();

    let composite = match &transforms.encrypt {
        Some(encrypt) => encrypt(&composite),
        None => composite,
    };

    match &transforms.resize {
        Some(resize) => resize(&composite),
        None => truncate_chars(&composite, config.code_length()).to_string(),
    }
}

/// Returns the first `len` characters of `s`, or all of `s` if shorter.
#[must_use]
pub fn truncate_chars(s: &str, len: usize) -> &str {
    match s.char_indices().nth(len) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Exact, case-sensitive comparison.
#[must_use]
pub fn codes_match(candidate: &str, expected: &str) -> bool {
    candidate == expected
}

/// Checks `candidate` against `expected`.
///
/// With the `review-override` feature, a candidate equal to the configured
/// override code is accepted before the normal comparison.
#[must_use]
pub fn validate(candidate: &str, expected: &str, config: &CodeConfiguration) -> bool {
    matches_override(candidate, config) || codes_match(candidate, expected)
}

#[cfg(feature = "review-override")]
fn matches_override(candidate: &str, config: &CodeConfiguration) -> bool {
    let matched = config.override_code() == Some(candidate);
    if matched {
        tracing::warn!("Accepted reviewer override code; device factors were not checked");
    }
    matched
}

#[cfg(not(feature = "review-override"))]
fn matches_override(_candidate: &str, _config: &CodeConfiguration) -> bool {
    false
}
