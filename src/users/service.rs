//! Credential verification and token issuance.
//!
//! Verification is a plain function over the store: look the account up by
//! email, check the submitted password against the stored hash, and fold
//! the result into a single [`LoginOutcome`]. The handler matches on the
//! outcome exactly once per request.

use rand::{distributions::Alphanumeric, Rng};
use sqlx::PgPool;
use tracing::warn;

use crate::users::{password, repo::User};

const ACCESS_TOKEN_LEN: usize = 48;

/// Result of one verification attempt.
pub enum LoginOutcome {
    /// Account found and password matched.
    Verified(User),
    /// Unknown user or wrong password; carries the message to surface.
    /// The two cases are deliberately indistinguishable to the caller.
    Rejected(String),
    /// The verification step itself errored (store failure, corrupt hash).
    Fault(anyhow::Error),
}

/// Pure decision step: fold a lookup result and a submitted password into
/// an outcome. Split from the lookup so it can be tested without a store.
pub fn evaluate(user: Option<User>, submitted: &str, login_error: &str) -> LoginOutcome {
    let Some(user) = user else {
        return LoginOutcome::Rejected(login_error.to_string());
    };
    match password::verify_password(submitted, &user.password_hash) {
        Ok(true) => LoginOutcome::Verified(user),
        Ok(false) => LoginOutcome::Rejected(login_error.to_string()),
        Err(e) => LoginOutcome::Fault(e),
    }
}

/// Locate the account by email and verify the submitted password.
pub async fn verify_credentials(
    db: &PgPool,
    email: &str,
    submitted: &str,
    login_error: &str,
) -> LoginOutcome {
    let user = match User::find_by_email(db, email).await {
        Ok(user) => user,
        Err(e) => {
            warn!(email = %email, error = %e, "credential lookup failed");
            return LoginOutcome::Fault(e);
        }
    };
    evaluate(user, submitted, login_error)
}

/// Generate a fresh opaque access token. No expiry; it lives on the account
/// until the next successful login overwrites it.
pub fn issue_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ACCESS_TOKEN_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::OffsetDateTime;
    use uuid::Uuid;

    const LOGIN_ERROR: &str = "Invalid email or password";

    fn user_with_password(plain: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            password_hash: password::hash_password(plain).expect("hash"),
            access_token: None,
            profile: json!({}),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn evaluate_accepts_correct_password() {
        let user = user_with_password("p");
        match evaluate(Some(user), "p", LOGIN_ERROR) {
            LoginOutcome::Verified(u) => assert_eq!(u.email, "a@x.com"),
            _ => panic!("expected Verified"),
        }
    }

    #[test]
    fn evaluate_rejects_wrong_password() {
        let user = user_with_password("p");
        match evaluate(Some(user), "wrong", LOGIN_ERROR) {
            LoginOutcome::Rejected(message) => assert_eq!(message, LOGIN_ERROR),
            _ => panic!("expected Rejected"),
        }
    }

    #[test]
    fn evaluate_rejects_unknown_user_with_same_message() {
        match evaluate(None, "p", LOGIN_ERROR) {
            LoginOutcome::Rejected(message) => assert_eq!(message, LOGIN_ERROR),
            _ => panic!("expected Rejected"),
        }
    }

    #[test]
    fn evaluate_faults_on_corrupt_hash() {
        let mut user = user_with_password("p");
        user.password_hash = "not-a-valid-hash".into();
        match evaluate(Some(user), "p", LOGIN_ERROR) {
            LoginOutcome::Fault(_) => {}
            _ => panic!("expected Fault"),
        }
    }

    #[test]
    fn issued_tokens_are_opaque_and_fresh() {
        let first = issue_token();
        let second = issue_token();
        assert_eq!(first.len(), ACCESS_TOKEN_LEN);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(first, second);
    }
}
