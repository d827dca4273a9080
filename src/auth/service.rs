use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::auth::dto::PublicUser;
use crate::auth::jwt::JwtKeys;
use crate::auth::password;
use crate::error::AuthError;
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Registers a new identity and issues its first session token.
///
/// Email is trimmed and lowercased before validation and storage; the
/// duplicate check is delegated to the store's atomic create.
pub async fn signup(
    state: &AppState,
    email: &str,
    password_plain: &str,
) -> Result<(PublicUser, String), AuthError> {
    let email = email.trim().to_lowercase();

    if !is_valid_email(&email) {
        warn!(email = %email, "signup rejected: invalid email");
        return Err(AuthError::InvalidInput("invalid email"));
    }
    if password_plain.len() < MIN_PASSWORD_LEN {
        warn!("signup rejected: password too short");
        return Err(AuthError::InvalidInput(
            "password must be at least 6 characters",
        ));
    }

    let hash = password::hash(password_plain).map_err(AuthError::StoreUnavailable)?;
    let user = state.users.create(&email, &hash).await?;

    let token = JwtKeys::from_config(&state.config.jwt)
        .mint(user.id, &user.email)
        .map_err(AuthError::StoreUnavailable)?;

    info!(user_id = %user.id, email = %user.email, "user signed up");
    Ok((
        PublicUser {
            id: user.id,
            email: user.email,
        },
        token,
    ))
}

/// Verifies credentials and issues a fresh session token.
///
/// Unknown email and wrong password are indistinguishable to the caller;
/// both surface as [`AuthError::InvalidCredentials`].
pub async fn login(
    state: &AppState,
    email: &str,
    password_plain: &str,
) -> Result<(PublicUser, String), AuthError> {
    let email = email.trim().to_lowercase();

    let user = match state.users.find_by_email(&email).await? {
        Some(user) => user,
        None => {
            warn!(email = %email, "login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        }
    };

    let ok = password::verify(password_plain, &user.password_hash)
        .map_err(AuthError::StoreUnavailable)?;
    if !ok {
        warn!(user_id = %user.id, "login rejected: wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    let token = JwtKeys::from_config(&state.config.jwt)
        .mint(user.id, &user.email)
        .map_err(AuthError::StoreUnavailable)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok((
        PublicUser {
            id: user.id,
            email: user.email,
        },
        token,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRef;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email(""));
    }

    #[tokio::test]
    async fn signup_token_decodes_to_the_submitted_email() {
        let state = AppState::fake();
        let (user, token) = signup(&state, "a@b.com", "secret1").await.expect("signup");

        let claims = JwtKeys::from_ref(&state).verify(&token).expect("verify");
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(user.email, "a@b.com");
    }

    #[tokio::test]
    async fn signup_normalizes_email_casing_and_whitespace() {
        let state = AppState::fake();
        let (user, _) = signup(&state, "  A@B.com ", "secret1").await.expect("signup");
        assert_eq!(user.email, "a@b.com");

        // Login finds the record under any casing of the same address.
        let (user, _) = login(&state, "A@B.COM", "secret1").await.expect("login");
        assert_eq!(user.email, "a@b.com");
    }

    #[tokio::test]
    async fn signup_rejects_malformed_email() {
        let state = AppState::fake();
        let err = signup(&state, "not-an-email", "secret1").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn signup_rejects_short_password() {
        let state = AppState::fake();
        let err = signup(&state, "a@b.com", "short").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn duplicate_signup_fails_regardless_of_password() {
        let state = AppState::fake();
        signup(&state, "a@b.com", "secret1").await.expect("first signup");

        let err = signup(&state, "a@b.com", "different-password")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateIdentity));

        // Different casing of the same address is still the same identity.
        let err = signup(&state, "A@b.com", "secret1").await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateIdentity));
    }

    #[tokio::test]
    async fn login_returns_a_verifiable_token() {
        let state = AppState::fake();
        signup(&state, "a@b.com", "secret1").await.expect("signup");

        let (user, token) = login(&state, "a@b.com", "secret1").await.expect("login");
        let claims = JwtKeys::from_ref(&state).verify(&token).expect("verify");
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "a@b.com");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let state = AppState::fake();
        signup(&state, "a@b.com", "secret1").await.expect("signup");

        let wrong_password = login(&state, "a@b.com", "wrong").await.unwrap_err();
        let unknown_email = login(&state, "nobody@b.com", "secret1").await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }
}
