use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// One-way transform from plaintext to a storable digest, freshly salted.
pub fn hash(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| {
            error!(error = %e, "argon2 hash failed");
            anyhow::anyhow!("argon2 hash: {e}")
        })
}

/// Whether `plain` matches `digest`. Errors only on an unparseable digest;
/// a plain mismatch is `Ok(false)`.
pub fn verify(plain: &str, digest: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(digest).map_err(|e| {
        error!(error = %e, "argon2 digest parse failed");
        anyhow::anyhow!("argon2 digest parse: {e}")
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "secret1";
        let digest = hash(password).expect("hashing should succeed");
        assert!(verify(password, &digest).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let digest = hash("correct-horse-battery-staple").expect("hashing should succeed");
        assert!(!verify("wrong-password", &digest).expect("verify should not error"));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash("secret1").expect("hash a");
        let b = hash("secret1").expect("hash b");
        assert_ne!(a, b);
    }

    #[test]
    fn verify_errors_on_malformed_digest() {
        assert!(verify("anything", "not-a-valid-digest").is_err());
    }
}
