//! Feature-unlock codes derived from device and app identity.
//!
//! This crate handles:
//! - Resolving an ordered set of identity/version factors from a host
//!   data source
//! - Deriving the expected unlock code (concatenate, optional host hooks,
//!   truncate to length)
//! - Exact validation of user-supplied codes
//! - Per-feature lock state with explicit reset
//!
//! # Derivation
//!
//! Factor values are concatenated in order with no separator. A host
//! encryption hook may replace the composite; a host resize hook may then
//! produce the final code. Without a resize hook the composite is cut to
//! the configured length and never padded.
//!
//! ```
//! use unlockcode::{FactorType, StaticFactors, UnlockCodeManager};
//!
//! let factors = StaticFactors::new(6)
//!     .with_order("DeviceUID,AppVersionHash")
//!     .with_factor(FactorType::DeviceUid, "ABC123")
//!     .with_factor(FactorType::AppVersionHash, "9f8e");
//!
//! let mut manager = UnlockCodeManager::new(factors).unwrap();
//! assert!(manager.is_locked(None));
//! assert!(manager.unlock(None, "ABC123"));
//! assert!(!manager.is_locked(None));
//! ```
//!
//! # Reviewer override
//!
//! Building with the `review-override` feature compiles in a universal code
//! that passes validation on any device. It exists for app review only and
//! must never ship in a distributed build.
//!
//! This is not a tamper-proof licensing scheme: the derivation runs on the
//! client and can be reproduced by anyone who knows the factors.

mod config;
mod device;
mod engine;
mod error;
mod event;
mod factor;
mod manager;
mod provider;
mod resolver;
mod store;
pub mod transforms;

#[cfg(feature = "review-override")]
pub use config::BUILD_OVERRIDE_CODE;
pub use config::CodeConfiguration;
pub use device::{DeviceInfo, SystemFactors};
pub use engine::{
    CodeHook, CodeTransforms, codes_match, derive_expected_code, truncate_chars, validate,
};
pub use error::{UnlockError, UnlockResult};
pub use event::{Listener, SHOW_CODE_INPUT, UNLOCKED, UnlockEvent};
pub use factor::{FactorOrder, FactorType};
pub use manager::UnlockCodeManager;
pub use provider::{FactorProvider, StaticFactors};
pub use resolver::{ResolvedFactor, ResolvedFactors, resolve};
pub use store::{DEFAULT_FEATURE_KEY, FeatureKey, LockState, LockStateStore};
