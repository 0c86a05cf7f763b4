#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Integration tests for the full salt -> hash -> verify pipeline.

use std::time::Instant;

use cadenas_core::{
    generate_salt, get_rounds, hash, hash_with_salt, verify, HashParts, Version, HASH_STRING_LEN,
};

#[test]
fn generated_hash_has_canonical_shape() {
    let stored = hash("a modest password", 4).expect("hash should succeed");
    assert_eq!(stored.len(), HASH_STRING_LEN);
    let parts = HashParts::parse(&stored).expect("parse should succeed");
    assert_eq!(parts.version(), Version::TwoB);
    assert_eq!(parts.cost(), 4);
    assert_eq!(parts.format(), stored);
}

#[test]
fn two_a_and_two_b_share_the_algorithm_core() {
    // The version tag selects formatting only; digests under the same salt
    // and cost are identical.
    let salt_b = generate_salt(4, Version::TwoB).expect("salt generation should succeed");
    let salt_a = format!("$2a${}", salt_b.split('$').skip(2).collect::<Vec<_>>().join("$"));

    let hash_b = hash_with_salt("shared password", &salt_b).expect("hash should succeed");
    let hash_a = hash_with_salt("shared password", &salt_a).expect("hash should succeed");

    assert_eq!(&hash_b[4..], &hash_a[4..]);
    assert!(hash_a.starts_with("$2a$"));
    assert!(hash_b.starts_with("$2b$"));
}

#[test]
fn fresh_salts_give_distinct_hashes_that_both_verify() {
    let first = hash("same password", 4).expect("hash should succeed");
    let second = hash("same password", 4).expect("hash should succeed");
    assert_ne!(first, second);
    assert!(verify("same password", &first).expect("verify should succeed"));
    assert!(verify("same password", &second).expect("verify should succeed"));
}

#[test]
fn concurrent_hashing_is_race_free() {
    // The Eksblowfish state is call-local scratch; concurrent calls share
    // nothing mutable and must agree on the result.
    let salt = generate_salt(4, Version::TwoB).expect("salt generation should succeed");
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let salt = salt.clone();
            std::thread::spawn(move || {
                hash_with_salt("concurrent password", &salt).expect("hash should succeed")
            })
        })
        .collect();

    let results: Vec<String> = handles
        .into_iter()
        .map(|h| h.join().expect("thread should not panic"))
        .collect();
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn cost_scaling_is_roughly_exponential() {
    // +3 cost units is 8x the key-schedule work. Timers and schedulers are
    // noisy, so only require a loose 2x separation.
    let salt_low = generate_salt(5, Version::TwoB).expect("salt generation should succeed");
    let salt_high = generate_salt(8, Version::TwoB).expect("salt generation should succeed");

    // Warm-up to amortize first-touch effects.
    hash_with_salt("timing probe", &salt_low).expect("hash should succeed");

    let start = Instant::now();
    hash_with_salt("timing probe", &salt_low).expect("hash should succeed");
    let low = start.elapsed();

    let start = Instant::now();
    hash_with_salt("timing probe", &salt_high).expect("hash should succeed");
    let high = start.elapsed();

    assert!(
        high > low * 2,
        "cost 8 ({high:?}) should take noticeably longer than cost 5 ({low:?})"
    );
}

#[test]
fn get_rounds_agrees_with_generated_salt_cost() {
    for cost in [4, 5, 6] {
        let salt = generate_salt(cost, Version::TwoB).expect("salt generation should succeed");
        let stored = hash_with_salt("pw", &salt).expect("hash should succeed");
        assert_eq!(get_rounds(&stored).expect("get_rounds should succeed"), cost);
    }
}
