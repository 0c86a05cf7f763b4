#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Known-answer tests against hashes produced by other bcrypt
//! implementations. The textual format must round-trip byte-for-byte, so
//! every vector here was generated outside this crate.

use cadenas_core::{hash_with_salt, verify, BcryptError};

#[test]
fn verifies_hash_from_online_generator() {
    let stored = "$2a$04$UuTkLRZZ6QofpDOlMz32MuuxEHA43WOemOYHPz6.SjsVsyO1tDU96";
    assert!(verify("password", stored).expect("verify should succeed"));
}

#[test]
fn verifies_hash_from_python_bcrypt() {
    let stored = "$2b$04$EGdrhbKUv8Oc9vGiXX0HQOxSg445d458Muh7DAHskb6QbtCvdxcie";
    assert!(verify("correctbatteryhorsestapler", stored).expect("verify should succeed"));
}

#[test]
fn verifies_hash_from_node_bcrypt() {
    let stored = "$2a$04$n4Uy0eSnMfvnESYL.bLwuuj0U/ETSsoTpRT9GVk5bektyVVa5xnIi";
    assert!(verify("correctbatteryhorsestapler", stored).expect("verify should succeed"));
}

#[test]
fn verifies_binary_password_hash_from_go() {
    // golang.org/x/crypto/bcrypt with a raw 32-byte password.
    let password: [u8; 32] = [
        29, 225, 195, 167, 223, 236, 85, 195, 114, 227, 7, 0, 209, 239, 189, 24, 51, 105, 124,
        168, 151, 75, 144, 64, 198, 197, 196, 4, 241, 97, 110, 135,
    ];
    let stored = "$2a$04$tjARW6ZON3PhrAIRW2LG/u9aDw5eFdstYLR8nFCNaOQmsH9XD23w.";
    assert!(verify(password, stored).expect("verify should succeed"));
}

#[test]
fn golden_regression_password123() {
    let hashed = hash_with_salt("password123", "$2b$10$N9qo8uLOickgx2ZMRZoMye")
        .expect("hash should succeed");
    assert_eq!(
        hashed,
        "$2b$10$N9qo8uLOickgx2ZMRZoMyeTfmMdmN8eFKxR3xiDBAJqt.vWQw1.JW"
    );
    assert!(verify("password123", &hashed).expect("verify should succeed"));
    assert!(!verify("password124", &hashed).expect("verify should succeed"));
}

#[test]
fn zero_salt_vector() {
    let hashed =
        hash_with_salt("hunter2", "$2b$12$......................").expect("hash should succeed");
    assert_eq!(
        hashed,
        "$2b$12$......................21jzCB1r6pN6rp5O2Ev0ejjTAboskKm"
    );
}

#[test]
fn fixed_salt_vector() {
    let hashed = hash_with_salt("My S3cre7 P@55w0rd!", "$2b$05$HlFShUxTu4ZHHfOLJwfmCe")
        .expect("hash should succeed");
    assert_eq!(
        hashed,
        "$2b$05$HlFShUxTu4ZHHfOLJwfmCeDj/kuKFKboanXtDJXxCC7aIPTUgxNDe"
    );
}

#[test]
fn long_passwords_truncate_at_72_bytes() {
    // Produced with python bcrypt against a 100-byte password; only the
    // first 72 bytes contribute.
    let stored = "$2a$05$......................YgIDy4hFBdVlc/6LHnD9mX488r9cLd2";
    let password = "x".repeat(100);
    assert!(verify(password.as_str(), stored).expect("verify should succeed"));
    assert!(verify("x".repeat(72).as_str(), stored).expect("verify should succeed"));
    assert!(!verify("x".repeat(71).as_str(), stored).expect("verify should succeed"));
}

#[test]
fn nul_bytes_distinguish_passwords() {
    // bcrypt treats NUL as an ordinary byte; these must all be distinct,
    // matching node and rust implementations.
    let passwords: [&[u8]; 6] = [
        b"\0",
        b"passw0rd\0",
        b"password\0with tail",
        b"\0passw0rd",
        b"a",
        b"a\0",
    ];
    let salt = "$2b$04$KBCwKxOzLha2MUDgW0PjXe";
    for (i, original) in passwords.iter().enumerate() {
        let stored = hash_with_salt(original, salt).expect("hash should succeed");
        for (j, candidate) in passwords.iter().enumerate() {
            assert_eq!(
                verify(candidate, &stored).expect("verify should succeed"),
                i == j,
                "password {i} checked against {j}"
            );
        }
    }
}

#[test]
fn all_nul_passwords_collide_by_construction() {
    // A quirk of the cyclic key schedule: passwords made entirely of NUL
    // bytes produce the same key stream regardless of length.
    let salt = "$2b$04$KBCwKxOzLha2MUDgW0PjXe";
    let stored = hash_with_salt(b"\0".as_slice(), salt).expect("hash should succeed");
    assert!(verify(b"\0\0\0\0\0\0\0\0".as_slice(), &stored).expect("verify should succeed"));
}

#[test]
fn tampered_version_tag_is_rejected() {
    let stored = "$2x$04$UuTkLRZZ6QofpDOlMz32MuuxEHA43WOemOYHPz6.SjsVsyO1tDU96";
    let err = verify("password", stored).expect_err("2x should be rejected");
    assert!(matches!(err, BcryptError::UnsupportedVersion(_)));
}
