//! One-way password hashing.
//!
//! Argon2id with a random per-password salt. `verify` answers false for a
//! wrong password or a malformed digest; it never panics and never errors.

use argon2::Argon2;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::password_hash::SaltString;

fn salt() -> SaltString {
    use rand::Rng;
    let ref mut bytes = [0u8; 16];
    rand::rng().fill(bytes);
    SaltString::encode_b64(bytes).expect("salt")
}

/// Hash a plaintext password. Fails only on degenerate input (empty).
pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    if password.is_empty() {
        return Err(argon2::password_hash::Error::Password);
    }
    Argon2::default()
        .hash_password(password.as_bytes(), &salt())
        .map(|h| h.to_string())
}

pub fn verify(password: &str, hashword: &str) -> bool {
    PasswordHash::new(hashword)
        .ok()
        .as_ref()
        .map(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), hash)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let digest = hash("secret1").expect("hash");
        assert!(verify("secret1", &digest));
    }

    #[test]
    fn wrong_password_fails() {
        let digest = hash("secret1").expect("hash");
        assert!(!verify("secret2", &digest));
    }

    #[test]
    fn malformed_digest_fails_quietly() {
        assert!(!verify("secret1", "not-a-phc-string"));
        assert!(!verify("secret1", ""));
    }

    #[test]
    fn empty_password_rejected() {
        assert!(hash("").is_err());
    }

    #[test]
    fn salts_differ_per_hash() {
        let a = hash("secret1").expect("hash");
        let b = hash("secret1").expect("hash");
        assert_ne!(a, b);
        assert!(verify("secret1", &b));
    }
}
