// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Value Objects

use fleet_rental::domain::{Email, VehicleModel};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

// ============================================================================
// Generators
// ============================================================================

/// Addresses matching the accepted pattern, in mixed case
fn email_strategy() -> impl Strategy<Value = String> {
    (
        "[a-zA-Z0-9._%+-]{1,16}",
        "[a-zA-Z0-9-]{1,12}",
        "[a-zA-Z]{2,6}",
    )
        .prop_map(|(local, domain, tld)| format!("{}@{}.{}", local, domain, tld))
}

/// Flip the case of every ASCII letter
fn swap_case(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: Stored email is the trimmed, lower-cased input
    #[test]
    fn prop_email_is_normalized(raw in email_strategy(), pad in " {0,3}") {
        let email = Email::new(format!("{}{}{}", pad, raw, pad)).unwrap();
        prop_assert_eq!(email.as_str(), raw.to_lowercase());
    }

    /// Property: Emails differing only in case are equal and hash alike
    #[test]
    fn prop_email_equality_ignores_case(raw in email_strategy()) {
        let a = Email::new(&raw).unwrap();
        let b = Email::new(swap_case(&raw)).unwrap();

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(hash_of(&a), hash_of(&b));
    }

    /// Property: Normalization is idempotent
    #[test]
    fn prop_email_normalization_idempotent(raw in email_strategy()) {
        let once = Email::new(&raw).unwrap();
        let twice = Email::new(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Property: Input without an `@` is never accepted
    #[test]
    fn prop_email_requires_at_sign(raw in "[a-zA-Z0-9.]{0,24}") {
        prop_assert!(Email::new(&raw).is_err());
    }

    /// Property: Vehicle models compare case-insensitively on both parts
    #[test]
    fn prop_vehicle_model_equality_ignores_case(
        brand in "[a-zA-Z][a-zA-Z ]{0,10}[a-zA-Z]",
        model in "[a-zA-Z0-9]{1,10}",
    ) {
        let a = VehicleModel::new(&brand, &model).unwrap();
        let b = VehicleModel::new(swap_case(&brand), swap_case(&model)).unwrap();

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(hash_of(&a), hash_of(&b));
        prop_assert_eq!(a.full_name(), format!("{} {}", brand, model));
    }
}
