//! Users, login credentials, and session tokens
//!
//! Passwords are stored and compared in clear text and a user holds a single
//! session token that every successful login overwrites. Tokens never expire.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use core_kernel::UserId;

/// Opaque token identifying a logged-in user
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generates a fresh random token
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps a token received from a client
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the token text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are credentials; keep them out of debug output.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Username and password submitted at login
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// A registered user
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique identifier
    pub id: UserId,
    /// Login name, unique across users
    pub username: String,
    /// Clear-text password
    pub password: String,
    /// Token of the current session, if the user has ever logged in
    pub session_token: Option<SessionToken>,
}

impl User {
    /// Creates a user that has never logged in
    pub fn new(id: UserId, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            password: password.into(),
            session_token: None,
        }
    }

    /// Compares a submitted password with the stored one
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    /// Replaces the current session with `token`
    pub fn start_session(&mut self, token: SessionToken) {
        self.session_token = Some(token);
    }

    /// Checks whether `token` identifies this user's current session
    pub fn holds_session(&self, token: &SessionToken) -> bool {
        self.session_token.as_ref() == Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_differ() {
        assert_ne!(SessionToken::generate(), SessionToken::generate());
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = SessionToken::new("secret-value");
        assert!(!format!("{token:?}").contains("secret-value"));
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials::new("testuser", "pa55word");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("testuser"));
        assert!(!debug.contains("pa55word"));
    }

    #[test]
    fn test_new_session_replaces_old() {
        let mut user = User::new(UserId::new(1), "testuser", "pa55word");
        let first = SessionToken::generate();
        let second = SessionToken::generate();

        user.start_session(first.clone());
        user.start_session(second.clone());

        assert!(user.holds_session(&second));
        assert!(!user.holds_session(&first));
    }

    #[test]
    fn test_password_is_exact_match() {
        let user = User::new(UserId::new(1), "testuser", "pa55word");
        assert!(user.password_matches("pa55word"));
        assert!(!user.password_matches("PA55WORD"));
    }
}
