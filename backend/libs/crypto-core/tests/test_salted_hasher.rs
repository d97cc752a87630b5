use crypto_core::{SaltedHasher, SHA256_HEX_LEN};

#[test]
fn identifier_token_is_fixed_length_lowercase_hex() {
    let hasher = SaltedHasher::new("default_salt_for_development");
    let token = hasher.hash_identifier("user-12345");

    assert_eq!(token.len(), SHA256_HEX_LEN);
    assert!(token
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}

#[test]
fn equal_identifiers_share_a_token() {
    let hasher = SaltedHasher::new("salt");
    let cloned = hasher.clone();

    assert_eq!(
        hasher.hash_identifier("user-67890"),
        cloned.hash_identifier("user-67890")
    );
    assert_ne!(
        hasher.hash_identifier("user-67890"),
        hasher.hash_identifier("user-67891")
    );
}

#[test]
fn token_does_not_contain_identifier() {
    let hasher = SaltedHasher::new("salt");
    let token = hasher.hash_identifier("user-12345");
    assert!(!token.contains("user-12345"));
}
