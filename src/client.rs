use std::fs;
use std::path::PathBuf;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use uuid::Uuid;

/// Display identity decoded from a locally held token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct PayloadClaims {
    sub: Uuid,
    email: String,
}

/// Client-side holder for the issued session token.
///
/// The token is kept in a plain file so a session survives process
/// restarts. `current_principal` decodes the payload segment without
/// verifying the signature -- the client does not hold the signing secret.
/// The result is display data only; authorization decisions happen
/// server-side against the full signature and expiry check.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Stores the token, replacing any previous session.
    pub fn persist(&self, token: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim().to_string();
        (!token.is_empty()).then_some(token)
    }

    /// The identity to display, or `None` when no usable session is held.
    /// A corrupt or structurally invalid token reads as "no session".
    pub fn current_principal(&self) -> Option<Principal> {
        decode_payload(&self.token()?)
    }

    /// Discards the held token. A missing file is fine.
    pub fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn decode_payload(token: &str) -> Option<Principal> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return None;
    }
    let payload = URL_SAFE_NO_PAD.decode(segments[1]).ok()?;
    let claims: PayloadClaims = serde_json::from_slice(&payload).ok()?;
    Some(Principal {
        user_id: claims.sub,
        email: claims.email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::JwtKeys;
    use crate::config::JwtConfig;

    fn keys() -> JwtKeys {
        JwtKeys::from_config(&JwtConfig {
            secret: "client-secret".into(),
            issuer: "iss".into(),
            audience: "aud".into(),
            ttl_minutes: 5,
        })
    }

    fn temp_store() -> SessionStore {
        let path = std::env::temp_dir().join(format!("ci-session-{}.token", Uuid::new_v4()));
        SessionStore::new(path)
    }

    #[test]
    fn persist_and_decode_roundtrip() {
        let store = temp_store();
        let user_id = Uuid::new_v4();
        let token = keys().mint(user_id, "a@b.com").expect("mint");

        store.persist(&token).expect("persist");
        let principal = store.current_principal().expect("principal");
        assert_eq!(principal.user_id, user_id);
        assert_eq!(principal.email, "a@b.com");
        store.clear();
    }

    #[test]
    fn corrupt_token_reads_as_no_session() {
        let store = temp_store();

        store.persist("only-one-segment").expect("persist");
        assert!(store.current_principal().is_none());

        store.persist("a.!!not-base64!!.c").expect("persist");
        assert!(store.current_principal().is_none());

        store.persist("a.bm90IGpzb24.c").expect("persist");
        assert!(store.current_principal().is_none());

        store.clear();
    }

    #[test]
    fn missing_file_reads_as_no_session() {
        let store = temp_store();
        assert!(store.token().is_none());
        assert!(store.current_principal().is_none());
    }

    #[test]
    fn clear_discards_the_session() {
        let store = temp_store();
        let token = keys().mint(Uuid::new_v4(), "a@b.com").expect("mint");
        store.persist(&token).expect("persist");
        assert!(store.token().is_some());

        store.clear();
        assert!(store.token().is_none());
        assert!(store.current_principal().is_none());

        // Clearing twice is harmless.
        store.clear();
    }
}
