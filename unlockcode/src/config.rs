//! Code configuration: target length, factor order and the optional
//! reviewer override.

use crate::error::{UnlockError, UnlockResult};
use crate::factor::FactorOrder;
use crate::provider::FactorProvider;
use serde::Serialize;
use tracing::warn;

/// Reviewer bypass code captured from `UNLOCKCODE_REVIEW_CODE` at compile time.
///
/// Only exists with the `review-override` feature. Any candidate equal to
/// this literal is accepted regardless of the device factors, so builds
/// carrying it must never be distributed.
#[cfg(feature = "review-override")]
pub const BUILD_OVERRIDE_CODE: Option<&str> = option_env!("UNLOCKCODE_REVIEW_CODE");

/// The compile-time override, with an empty value treated as unset.
#[cfg(feature = "review-override")]
fn build_override_code() -> Option<String> {
    BUILD_OVERRIDE_CODE
        .filter(|code| !code.is_empty())
        .map(str::to_string)
}

/// How the expected code is derived.
///
/// Always built through [`CodeConfiguration::new`], so `code_length` is at
/// least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeConfiguration {
    code_length: usize,
    order: FactorOrder,
    #[cfg(feature = "review-override")]
    #[serde(skip_serializing_if = "Option::is_none")]
    override_code: Option<String>,
}

impl CodeConfiguration {
    /// Creates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UnlockError::InvalidCodeLength`] if `code_length` is zero.
    pub fn new(code_length: usize, order: FactorOrder) -> UnlockResult<Self> {
        if code_length == 0 {
            return Err(UnlockError::InvalidCodeLength(code_length));
        }
        if order.is_empty() {
            warn!("Factor order is empty; every derived code will be empty");
        }

        Ok(Self {
            code_length,
            order,
            #[cfg(feature = "review-override")]
            override_code: build_override_code(),
        })
    }

    /// Reads length and order from the data source.
    ///
    /// A missing order string selects [`FactorOrder::default`].
    ///
    /// # Errors
    ///
    /// Returns [`UnlockError::InvalidCodeLength`] if the provider reports zero.
    pub fn from_provider<P: FactorProvider + ?Sized>(provider: &P) -> UnlockResult<Self> {
        let order = provider
            .code_order()
            .map(|s| FactorOrder::parse(&s))
            .unwrap_or_default();
        Self::new(provider.code_length(), order)
    }

    #[must_use]
    pub fn code_length(&self) -> usize {
        self.code_length
    }

    #[must_use]
    pub fn order(&self) -> &FactorOrder {
        &self.order
    }

    /// Returns a copy with a different order.
    #[must_use]
    pub fn with_order(mut self, order: FactorOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets the reviewer bypass code. An empty string clears it.
    #[cfg(feature = "review-override")]
    #[must_use]
    pub fn with_override_code(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.override_code = (!code.is_empty()).then_some(code);
        self
    }

    #[cfg(feature = "review-override")]
    #[must_use]
    pub fn override_code(&self) -> Option<&str> {
        self.override_code.as_deref()
    }
}
