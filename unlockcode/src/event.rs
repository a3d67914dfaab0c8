//! Lifecycle notifications for the presentation layer.
//!
//! Events are advisory. The manager fires them synchronously to every
//! registered listener; correctness never depends on anyone listening.

use crate::store::FeatureKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Notification name for [`UnlockEvent::ShowCodeInput`].
pub const SHOW_CODE_INPUT: &str = "unlockcode.show-code-input";
/// Notification name for [`UnlockEvent::Unlocked`].
pub const UNLOCKED: &str = "unlockcode.unlocked";

/// Something the host UI may want to react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UnlockEvent {
    /// The feature is locked and the host should prompt for a code.
    ShowCodeInput { feature: FeatureKey },
    /// The feature was unlocked by a valid code.
    Unlocked { feature: FeatureKey },
}

impl UnlockEvent {
    /// Stable notification name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShowCodeInput { .. } => SHOW_CODE_INPUT,
            Self::Unlocked { .. } => UNLOCKED,
        }
    }

    #[must_use]
    pub fn feature(&self) -> &FeatureKey {
        match self {
            Self::ShowCodeInput { feature } | Self::Unlocked { feature } => feature,
        }
    }
}

impl fmt::Display for UnlockEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.feature())
    }
}

/// A registered event callback.
pub type Listener = Arc<dyn Fn(&UnlockEvent) + Send + Sync>;

/// Fan-out list of listeners.
#[derive(Clone, Default)]
pub(crate) struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub(crate) fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub(crate) fn emit(&self, event: &UnlockEvent) {
        tracing::debug!("Emitting {} to {} listener(s)", event, self.listeners.len());
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
