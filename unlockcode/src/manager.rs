//! The host-facing unlock-code manager.

use crate::config::CodeConfiguration;
use crate::engine::{self, CodeTransforms};
use crate::error::UnlockResult;
use crate::event::{EventBus, UnlockEvent};
use crate::provider::FactorProvider;
use crate::resolver::{self, ResolvedFactors};
use crate::store::{FeatureKey, LockState, LockStateStore};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Ties the provider, derivation hooks and lock state together.
///
/// Features are named by `Option<&str>`; `None` is the single shared
/// feature. Every feature shares the configuration read from the provider
/// unless [`configure_feature`](Self::configure_feature) overrides it.
#[derive(Debug)]
pub struct UnlockCodeManager<P> {
    provider: P,
    transforms: CodeTransforms,
    config: CodeConfiguration,
    feature_configs: HashMap<FeatureKey, CodeConfiguration>,
    store: LockStateStore,
    events: EventBus,
}

impl<P: FactorProvider> UnlockCodeManager<P> {
    /// Creates a manager with no derivation hooks.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider reports a zero code length.
    pub fn new(provider: P) -> UnlockResult<Self> {
        Self::with_transforms(provider, CodeTransforms::default())
    }

    /// Creates a manager with host derivation hooks.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider reports a zero code length.
    pub fn with_transforms(provider: P, transforms: CodeTransforms) -> UnlockResult<Self> {
        let config = CodeConfiguration::from_provider(&provider)?;
        debug!(
            "Unlock code manager ready: length {}, order {}",
            config.code_length(),
            config.order()
        );

        Ok(Self {
            provider,
            transforms,
            config,
            feature_configs: HashMap::new(),
            store: LockStateStore::new(),
            events: EventBus::default(),
        })
    }

    /// Re-reads code length and order from the provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider now reports a zero code length; the
    /// previous configuration is kept in that case.
    pub fn reload_configuration(&mut self) -> UnlockResult<()> {
        let config = CodeConfiguration::from_provider(&self.provider)?;
        #[cfg(feature = "review-override")]
        let config = match self.config.override_code() {
            Some(code) => config.with_override_code(code),
            None => config,
        };
        self.config = config;
        Ok(())
    }

    /// Replaces the default configuration.
    pub fn set_configuration(&mut self, config: CodeConfiguration) {
        self.config = config;
    }

    /// Overrides length and order for one feature.
    pub fn configure_feature(&mut self, feature: Option<&str>, config: CodeConfiguration) {
        self.feature_configs.insert(FeatureKey::from(feature), config);
    }

    /// Returns the configuration used for `feature`.
    #[must_use]
    pub fn configuration(&self, feature: Option<&str>) -> &CodeConfiguration {
        self.config_for(&FeatureKey::from(feature))
    }

    /// Registers an event listener.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&UnlockEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(Arc::new(listener));
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.events.len()
    }

    /// True unless `feature` has been unlocked.
    #[must_use]
    pub fn is_locked(&self, feature: Option<&str>) -> bool {
        self.store.is_locked(&FeatureKey::from(feature))
    }

    /// Fires [`UnlockEvent::ShowCodeInput`] if `feature` is locked.
    ///
    /// Returns whether the feature is locked.
    pub fn request_code_input(&self, feature: Option<&str>) -> bool {
        let key = FeatureKey::from(feature);
        let locked = self.store.is_locked(&key);
        if locked {
            self.events.emit(&UnlockEvent::ShowCodeInput { feature: key });
        }
        locked
    }

    /// Validates `code` for `feature` and unlocks it on success.
    ///
    /// A rejected code leaves the state untouched. Fires
    /// [`UnlockEvent::Unlocked`] on success.
    pub fn unlock(&mut self, feature: Option<&str>, code: &str) -> bool {
        let key = FeatureKey::from(feature);
        let config = self.config_for(&key);
        let expected = self.derive(config);

        if !engine::validate(code, &expected, config) {
            debug!("Rejected unlock code for feature {}", key);
            return false;
        }

        if self.store.mark_unlocked(key.clone()) {
            info!("Feature {} unlocked", key);
        }
        self.events.emit(&UnlockEvent::Unlocked { feature: key });
        true
    }

    /// Locks `feature` again. No-op if it is already locked.
    pub fn reset_code(&mut self, feature: Option<&str>) {
        let key = FeatureKey::from(feature);
        if self.store.reset(&key) {
            info!("Feature {} locked again", key);
        }
    }

    /// Locks every feature.
    pub fn reset_all(&mut self) {
        self.store.reset_all();
        info!("All features locked");
    }

    /// Derives the code that would unlock `feature` right now.
    #[must_use]
    pub fn expected_code(&self, feature: Option<&str>) -> String {
        self.derive(self.config_for(&FeatureKey::from(feature)))
    }

    /// Resolves the factors used for `feature`.
    #[must_use]
    pub fn resolved_factors(&self, feature: Option<&str>) -> ResolvedFactors {
        let config = self.config_for(&FeatureKey::from(feature));
        resolver::resolve(config.order(), &self.provider)
    }

    /// Iterates over unlocked features.
    pub fn unlocked_features(&self) -> impl Iterator<Item = &FeatureKey> {
        self.store.unlocked_features()
    }

    /// Snapshot of the lock state for host persistence.
    #[must_use]
    pub fn lock_state(&self) -> LockState {
        self.store.snapshot()
    }

    /// Replaces the lock state with a previously saved snapshot.
    pub fn restore_lock_state(&mut self, state: LockState) {
        self.store = LockStateStore::from_snapshot(state);
        debug!("Restored lock state with {} unlocked feature(s)", self.store.len());
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[must_use]
    pub fn transforms(&self) -> &CodeTransforms {
        &self.transforms
    }

    fn config_for(&self, key: &FeatureKey) -> &CodeConfiguration {
        self.feature_configs.get(key).unwrap_or(&self.config)
    }

    fn derive(&self, config: &CodeConfiguration) -> String {
        let factors = resolver::resolve(config.order(), &self.provider);
        engine::derive_expected_code(&factors, config, &self.transforms)
    }
}
