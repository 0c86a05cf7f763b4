#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property-based tests for the bcrypt pipeline.
//!
//! All cases run at the minimum cost factor — the properties under test are
//! independent of the work factor, and cost 4 keeps the suite fast.

use cadenas_core::{
    generate_salt, get_rounds, hash_with_salt, verify, HashParts, Version, MIN_COST,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Any password (arbitrary bytes, up to the 72-byte effective limit)
    /// verifies against its own hash.
    #[test]
    fn any_password_round_trips(password in proptest::collection::vec(any::<u8>(), 0..72)) {
        let salt = generate_salt(MIN_COST, Version::TwoB).expect("salt generation should succeed");
        let hashed = hash_with_salt(&password, &salt).expect("hash should succeed");
        prop_assert!(verify(&password, &hashed).expect("verify should succeed"));
    }

    /// A different password does not verify. All-NUL passwords are excluded:
    /// they collide by construction of the cyclic key schedule.
    #[test]
    fn different_password_fails_verification(
        a in proptest::collection::vec(any::<u8>(), 1..64),
        b in proptest::collection::vec(any::<u8>(), 1..64),
    ) {
        prop_assume!(a != b);
        prop_assume!(a.iter().any(|&x| x != 0) || b.iter().any(|&x| x != 0));

        let salt = generate_salt(MIN_COST, Version::TwoB).expect("salt generation should succeed");
        let hashed = hash_with_salt(&a, &salt).expect("hash should succeed");
        prop_assert!(!verify(&b, &hashed).expect("verify should succeed"));
    }

    /// The cost embedded in a generated salt survives hashing and is
    /// recovered by `get_rounds`.
    #[test]
    fn cost_round_trips(cost in 4u32..=6) {
        let salt = generate_salt(cost, Version::TwoB).expect("salt generation should succeed");
        let hashed = hash_with_salt("fixed password", &salt).expect("hash should succeed");
        prop_assert_eq!(get_rounds(&hashed).expect("get_rounds should succeed"), cost);
    }

    /// Formatting a parsed hash reproduces the original string exactly.
    #[test]
    fn format_is_idempotent_over_parse(password in proptest::collection::vec(any::<u8>(), 0..32)) {
        let salt = generate_salt(MIN_COST, Version::TwoA).expect("salt generation should succeed");
        let hashed = hash_with_salt(&password, &salt).expect("hash should succeed");
        let parts = HashParts::parse(&hashed).expect("parse should succeed");
        prop_assert_eq!(parts.format(), hashed);
    }

    /// Hashing is deterministic: same password and salt, same output.
    #[test]
    fn hashing_is_deterministic(password in proptest::collection::vec(any::<u8>(), 0..72)) {
        let salt = generate_salt(MIN_COST, Version::TwoB).expect("salt generation should succeed");
        let first = hash_with_salt(&password, &salt).expect("hash should succeed");
        let second = hash_with_salt(&password, &salt).expect("hash should succeed");
        prop_assert_eq!(first, second);
    }
}
