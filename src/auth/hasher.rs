//! Salted password hashing.
//!
//! A stored hash is `hex(salt) || hex(key)`: 32 bytes of random salt followed
//! by a 32-byte key derived with PBKDF2-HMAC-SHA256, 128 hex characters total.

use rand::RngCore;

use crate::error::AuthError;

/// Salt length in bytes (64 hex characters).
pub const SALT_BYTES: usize = 32;

/// Derived-key length in bytes (64 hex characters).
pub const KEY_BYTES: usize = 32;

/// PBKDF2-HMAC-SHA256 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Total stored-hash length in hex characters.
pub const STORED_HASH_LEN: usize = 2 * (SALT_BYTES + KEY_BYTES);

/// Hash a password with a fresh random salt.
///
/// Consumes entropy from the OS random source. Two calls with the same
/// password yield different outputs.
pub fn hash(password: &str) -> String {
    let mut salt = [0u8; SALT_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut salt);

    let key = derive_key(password, &salt);

    let mut out = String::with_capacity(STORED_HASH_LEN);
    out.push_str(&hex::encode(salt));
    out.push_str(&hex::encode(key));
    out
}

/// Verify a password against a stored hash.
///
/// Returns `Ok(false)` on a wrong password and [`AuthError::MalformedHash`]
/// when `stored_hash` is not exactly [`STORED_HASH_LEN`] hex characters.
pub fn verify(stored_hash: &str, password: &str) -> Result<bool, AuthError> {
    // Work on bytes so a multi-byte character can't panic the split below.
    let raw = stored_hash.as_bytes();
    if raw.len() != STORED_HASH_LEN {
        return Err(AuthError::MalformedHash);
    }
    let (salt_hex, key_hex) = raw.split_at(2 * SALT_BYTES);

    let salt: [u8; SALT_BYTES] = hex::decode(salt_hex)
        .map_err(|_| AuthError::MalformedHash)?
        .try_into()
        .map_err(|_| AuthError::MalformedHash)?;
    let stored_key = hex::decode(key_hex).map_err(|_| AuthError::MalformedHash)?;

    let candidate = derive_key(password, &salt);
    Ok(constant_time_eq(&candidate, &stored_key))
}

/// Burn one key derivation over a fixed salt.
///
/// Used on the unknown-username login path so it costs roughly the same as
/// verifying against a real record.
pub(crate) fn dummy_derive(password: &str) {
    let _ = derive_key(password, &[0u8; SALT_BYTES]);
}

/// Derive a key from a password and salt using PBKDF2-HMAC-SHA256.
fn derive_key(password: &str, salt: &[u8; SALT_BYTES]) -> [u8; KEY_BYTES] {
    let mut key = [0u8; KEY_BYTES];
    pbkdf2::pbkdf2_hmac::<sha2::Sha256>(
        password.as_bytes(),
        salt,
        PBKDF2_ITERATIONS,
        &mut key,
    );
    key
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let stored = hash("pw123");
        assert!(verify(&stored, "pw123").unwrap());
    }

    #[test]
    fn wrong_password_fails_verification() {
        let stored = hash("correct_password");
        assert!(!verify(&stored, "wrong_password").unwrap());
    }

    #[test]
    fn hash_output_is_128_lowercase_hex() {
        let stored = hash("anything");
        assert_eq!(stored.len(), STORED_HASH_LEN);
        assert!(stored
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn salt_randomness_gives_distinct_hashes() {
        let h1 = hash("same_password");
        let h2 = hash("same_password");
        assert_ne!(h1, h2);
        assert!(verify(&h1, "same_password").unwrap());
        assert!(verify(&h2, "same_password").unwrap());
    }

    #[test]
    fn empty_password_roundtrips() {
        let stored = hash("");
        assert!(verify(&stored, "").unwrap());
        assert!(!verify(&stored, "x").unwrap());
    }

    #[test]
    fn unicode_password_roundtrips() {
        let stored = hash("пароль-🔑-암호");
        assert!(verify(&stored, "пароль-🔑-암호").unwrap());
        assert!(!verify(&stored, "пароль").unwrap());
    }

    #[test]
    fn verify_rejects_wrong_length() {
        assert!(matches!(
            verify("deadbeef", "pw"),
            Err(AuthError::MalformedHash)
        ));
        let too_long = "a".repeat(STORED_HASH_LEN + 2);
        assert!(matches!(
            verify(&too_long, "pw"),
            Err(AuthError::MalformedHash)
        ));
        assert!(matches!(verify("", "pw"), Err(AuthError::MalformedHash)));
    }

    #[test]
    fn verify_rejects_non_hex_characters() {
        let bad = "z".repeat(STORED_HASH_LEN);
        assert!(matches!(verify(&bad, "pw"), Err(AuthError::MalformedHash)));
    }

    #[test]
    fn verify_rejects_multibyte_input_without_panicking() {
        // 64 two-byte characters: 128 bytes, but not valid hex.
        let bad = "é".repeat(64);
        assert_eq!(bad.len(), STORED_HASH_LEN);
        assert!(matches!(verify(&bad, "pw"), Err(AuthError::MalformedHash)));
    }

    #[test]
    fn uppercase_hex_still_verifies() {
        let stored = hash("pw123").to_uppercase();
        assert!(verify(&stored, "pw123").unwrap());
    }

    #[test]
    fn constant_time_eq_works() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"short", b"longer"));
    }
}
