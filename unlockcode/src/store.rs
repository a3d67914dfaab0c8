//! Per-feature lock state.
//!
//! Each feature is either locked or unlocked. A feature with no entry is
//! locked; unlocking inserts an entry and resetting removes it. The state
//! lives only as long as its owner; hosts that want persistence serialize a
//! [`LockState`] themselves.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Serialized name of the shared, unpartitioned feature.
pub const DEFAULT_FEATURE_KEY: &str = "__default__";

/// Identifies a lock-state partition.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeatureKey {
    /// The single shared feature used when the host passes no feature name.
    Default,
    Named(String),
}

impl FeatureKey {
    /// Creates a key for a named feature.
    ///
    /// The reserved name [`DEFAULT_FEATURE_KEY`] maps to [`FeatureKey::Default`].
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        if name == DEFAULT_FEATURE_KEY {
            Self::Default
        } else {
            Self::Named(name)
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => DEFAULT_FEATURE_KEY,
            Self::Named(name) => name,
        }
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl From<Option<&str>> for FeatureKey {
    fn from(feature: Option<&str>) -> Self {
        feature.map_or(Self::Default, Self::named)
    }
}

impl From<&str> for FeatureKey {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for FeatureKey {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}

impl From<FeatureKey> for String {
    fn from(key: FeatureKey) -> Self {
        match key {
            FeatureKey::Default => DEFAULT_FEATURE_KEY.to_string(),
            FeatureKey::Named(name) => name,
        }
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializable snapshot of every feature's unlock flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockState(BTreeMap<FeatureKey, bool>);

impl LockState {
    /// Parses a JSON snapshot.
    pub fn from_json(json: &str) -> crate::UnlockResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Renders the snapshot as JSON.
    pub fn to_json(&self) -> crate::UnlockResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Owns the unlock flag for every feature.
#[derive(Debug, Clone, Default)]
pub struct LockStateStore {
    unlocked: BTreeMap<FeatureKey, bool>,
}

impl LockStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from a snapshot. `false` entries are dropped.
    #[must_use]
    pub fn from_snapshot(state: LockState) -> Self {
        Self {
            unlocked: state.0.into_iter().filter(|(_, unlocked)| *unlocked).collect(),
        }
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> LockState {
        LockState(self.unlocked.clone())
    }

    /// True unless `feature` has been unlocked.
    #[must_use]
    pub fn is_locked(&self, feature: &FeatureKey) -> bool {
        !self.unlocked.get(feature).copied().unwrap_or(false)
    }

    /// Marks `feature` unlocked. Returns true if it was locked before.
    pub fn mark_unlocked(&mut self, feature: FeatureKey) -> bool {
        self.unlocked.insert(feature, true) != Some(true)
    }

    /// Locks `feature` again. Returns true if it was unlocked before.
    pub fn reset(&mut self, feature: &FeatureKey) -> bool {
        self.unlocked.remove(feature).unwrap_or(false)
    }

    /// Locks every feature.
    pub fn reset_all(&mut self) {
        self.unlocked.clear();
    }

    /// Iterates over unlocked features.
    pub fn unlocked_features(&self) -> impl Iterator<Item = &FeatureKey> {
        self.unlocked
            .iter()
            .filter(|(_, unlocked)| **unlocked)
            .map(|(key, _)| key)
    }

    /// Number of unlocked features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.unlocked_features().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
