//! Builds the ordered factor values for one derivation.

use crate::factor::{FactorOrder, FactorType};
use crate::provider::FactorProvider;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One factor value pulled from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFactor {
    pub factor: FactorType,
    pub value: String,
}

/// Factor values in concatenation order. Absent factors are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedFactors(Vec<ResolvedFactor>);

impl ResolvedFactors {
    /// Returns the resolved entries in order.
    #[must_use]
    pub fn entries(&self) -> &[ResolvedFactor] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Concatenates the values with no separator.
    #[must_use]
    pub fn composite(&self) -> String {
        self.0.iter().map(|f| f.value.as_str()).collect()
    }

    /// Returns the factor types that were actually resolved.
    pub fn factor_types(&self) -> impl Iterator<Item = FactorType> + '_ {
        self.0.iter().map(|f| f.factor)
    }
}

impl FromIterator<(FactorType, String)> for ResolvedFactors {
    fn from_iter<I: IntoIterator<Item = (FactorType, String)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(factor, value)| ResolvedFactor { factor, value })
                .collect(),
        )
    }
}

/// Queries `provider` for every factor in `order`.
///
/// Factors the provider does not supply, or supplies as an empty string,
/// are skipped. Never fails.
pub fn resolve<P: FactorProvider + ?Sized>(order: &FactorOrder, provider: &P) -> ResolvedFactors {
    let mut resolved = Vec::with_capacity(order.len());

    for &factor in order {
        match provider.factor_value(factor) {
            Some(value) if !value.is_empty() => resolved.push(ResolvedFactor { factor, value }),
            _ => debug!("Factor {} not supplied, omitting", factor),
        }
    }

    debug!(
        "Resolved {} of {} factors for order {}",
        resolved.len(),
        order.len(),
        order
    );
    ResolvedFactors(resolved)
}
