//! The factor data source consumed by the resolver.

use crate::factor::FactorType;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Host-implemented capability set supplying code length, order and factor
/// values.
///
/// Only [`code_length`](FactorProvider::code_length) is required. Every other
/// capability defaults to `None`, which the resolver treats as "omit this
/// factor".
pub trait FactorProvider {
    /// Target length of the expected code.
    fn code_length(&self) -> usize;

    /// Factor order string; `None` selects the default order.
    fn code_order(&self) -> Option<String> {
        None
    }

    fn device_uid(&self) -> Option<String> {
        None
    }

    fn user_account(&self) -> Option<String> {
        None
    }

    fn user_account_created_date(&self) -> Option<String> {
        None
    }

    fn app_version_hash(&self) -> Option<String> {
        None
    }

    fn app_built_date(&self) -> Option<String> {
        None
    }

    /// Dispatches to the capability matching `factor`.
    fn factor_value(&self, factor: FactorType) -> Option<String> {
        match factor {
            FactorType::None => None,
            FactorType::DeviceUid => self.device_uid(),
            FactorType::UserAccount => self.user_account(),
            FactorType::UserAccountCreatedDate => self.user_account_created_date(),
            FactorType::AppVersionHash => self.app_version_hash(),
            FactorType::AppBuiltDate => self.app_built_date(),
        }
    }
}

macro_rules! forward_provider {
    ($($ty:ty),*) => {$(
        impl<P: FactorProvider + ?Sized> FactorProvider for $ty {
            fn code_length(&self) -> usize { (**self).code_length() }
            fn code_order(&self) -> Option<String> { (**self).code_order() }
            fn device_uid(&self) -> Option<String> { (**self).device_uid() }
            fn user_account(&self) -> Option<String> { (**self).user_account() }
            fn user_account_created_date(&self) -> Option<String> {
                (**self).user_account_created_date()
            }
            fn app_version_hash(&self) -> Option<String> { (**self).app_version_hash() }
            fn app_built_date(&self) -> Option<String> { (**self).app_built_date() }
        }
    )*};
}

forward_provider!(&P, Box<P>, Arc<P>);

/// A provider backed by fixed values.
///
/// Used for vendor-side profiles and tests. Deserializes from the same
/// field names in TOML or JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticFactors {
    #[serde(default)]
    pub code_length: usize,
    #[serde(default)]
    pub code_order: Option<String>,
    #[serde(default)]
    pub device_uid: Option<String>,
    #[serde(default)]
    pub user_account: Option<String>,
    #[serde(default)]
    pub user_account_created_date: Option<String>,
    #[serde(default)]
    pub app_version_hash: Option<String>,
    #[serde(default)]
    pub app_built_date: Option<String>,
}

impl StaticFactors {
    /// Creates an empty provider with the given code length.
    #[must_use]
    pub fn new(code_length: usize) -> Self {
        Self {
            code_length,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.code_order = Some(order.into());
        self
    }

    /// Sets the value for `factor`. Setting `FactorType::None` is a no-op.
    #[must_use]
    pub fn with_factor(mut self, factor: FactorType, value: impl Into<String>) -> Self {
        self.set_factor(factor, Some(value.into()));
        self
    }

    /// Sets or clears the value for `factor`.
    pub fn set_factor(&mut self, factor: FactorType, value: Option<String>) {
        let slot = match factor {
            FactorType::None => return,
            FactorType::DeviceUid => &mut self.device_uid,
            FactorType::UserAccount => &mut self.user_account,
            FactorType::UserAccountCreatedDate => &mut self.user_account_created_date,
            FactorType::AppVersionHash => &mut self.app_version_hash,
            FactorType::AppBuiltDate => &mut self.app_built_date,
        };
        *slot = value;
    }
}

impl FactorProvider for StaticFactors {
    fn code_length(&self) -> usize {
        self.code_length
    }

    fn code_order(&self) -> Option<String> {
        self.code_order.clone()
    }

    fn device_uid(&self) -> Option<String> {
        self.device_uid.clone()
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
