//! Property-based tests for code derivation.
//!
//! These laws must hold for any factor values:
//! - Derivation is deterministic
//! - Only the exact expected code validates
//! - Truncation keeps the leading `code_length` characters
//! - Short composites are never padded
//! - An absent factor behaves as if it were removed from the order

use proptest::prelude::*;
use unlockcode::{
    CodeConfiguration, CodeTransforms, FactorOrder, FactorType, StaticFactors, UnlockCodeManager,
    derive_expected_code, resolve, validate,
};

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn value_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::string::string_regex("[A-Za-z0-9@._-]{0,12}").unwrap())
}

fn factors_strategy() -> impl Strategy<Value = StaticFactors> {
    (
        1usize..40,
        value_strategy(),
        value_strategy(),
        value_strategy(),
        value_strategy(),
        value_strategy(),
    )
        .prop_map(|(len, device, account, created, version, built)| StaticFactors {
            code_length: len,
            code_order: None,
            device_uid: device,
            user_account: account,
            user_account_created_date: created,
            app_version_hash: version,
            app_built_date: built,
        })
}

fn order_strategy() -> impl Strategy<Value = FactorOrder> {
    prop::collection::vec(prop::sample::select(FactorType::ALL.to_vec()), 0..8)
        .prop_map(|factors| FactorOrder::new(factors))
}

fn derive(provider: &StaticFactors, order: &FactorOrder) -> String {
    let config = CodeConfiguration::new(provider.code_length, order.clone()).unwrap();
    derive_expected_code(&resolve(order, provider), &config, &CodeTransforms::new())
}

fn raw_composite(provider: &StaticFactors, order: &FactorOrder) -> String {
    resolve(order, provider).composite()
}

// =============================================================================
// DERIVATION PROPERTIES
// =============================================================================

mod derivation_properties {
    use super::*;

    proptest! {
        /// Same inputs always produce the same code
        #[test]
        fn deterministic(provider in factors_strategy(), order in order_strategy()) {
            prop_assert_eq!(derive(&provider, &order), derive(&provider, &order));
        }

        /// Long composites are cut to exactly `code_length` leading characters
        #[test]
        fn truncation_law(provider in factors_strategy(), order in order_strategy()) {
            let raw = raw_composite(&provider, &order);
            prop_assume!(raw.chars().count() > provider.code_length);

            let code = derive(&provider, &order);
            prop_assert_eq!(code.chars().count(), provider.code_length);
            prop_assert!(raw.starts_with(&code));
        }

        /// Short composites come back unmodified
        #[test]
        fn shorter_than_target_law(provider in factors_strategy(), order in order_strategy()) {
            let raw = raw_composite(&provider, &order);
            prop_assume!(raw.chars().count() <= provider.code_length);

            prop_assert_eq!(derive(&provider, &order), raw);
        }

        /// Dropping a capability equals dropping the factor from the order
        #[test]
        fn omission_law(
            provider in factors_strategy(),
            order in order_strategy(),
            missing in prop::sample::select(FactorType::ALL.to_vec()),
        ) {
            let mut without_value = provider.clone();
            without_value.set_factor(missing, None);

            prop_assert_eq!(
                derive(&without_value, &order),
                derive(&provider, &order.without(missing))
            );
        }
    }
}

// =============================================================================
// VALIDATION PROPERTIES
// =============================================================================

mod validation_properties {
    use super::*;

    proptest! {
        /// The derived code validates; any one-character mutation does not
        #[test]
        fn exact_match_only(
            provider in factors_strategy(),
            index in any::<prop::sample::Index>(),
            replacement in prop::char::range('!', '~'),
        ) {
            let order = FactorOrder::default();
            let config = CodeConfiguration::new(provider.code_length, order.clone()).unwrap();
            let expected = derive(&provider, &order);
            prop_assert!(validate(&expected, &expected, &config));

            prop_assume!(!expected.is_empty());
            let mut chars: Vec<char> = expected.chars().collect();
            let at = index.index(chars.len());
            prop_assume!(chars[at] != replacement);
            chars[at] = replacement;
            let mutated: String = chars.into_iter().collect();

            prop_assert!(!validate(&mutated, &expected, &config));
        }

        /// Unlock succeeds with the expected code and flips only that feature
        #[test]
        fn lock_state_law(provider in factors_strategy(), feature in "[a-z]{1,8}") {
            let mut manager = UnlockCodeManager::new(provider).unwrap();
            let code = manager.expected_code(Some(feature.as_str()));

            prop_assert!(manager.is_locked(Some(feature.as_str())));
            prop_assert!(manager.unlock(Some(feature.as_str()), &code));
            prop_assert!(!manager.is_locked(Some(feature.as_str())));
            prop_assert!(manager.is_locked(None));

            manager.reset_code(Some(feature.as_str()));
            prop_assert!(manager.is_locked(Some(feature.as_str())));
        }
    }
}
