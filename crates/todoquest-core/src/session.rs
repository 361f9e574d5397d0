//! Trivial identity gate.
//!
//! Not a security boundary: any non-empty email/password pair "logs in".
//! There is no verification, no hashing, and nothing persists.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionGate {
    user: Option<String>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept the identity when both fields are non-empty. Empty input is
    /// ignored, not an error.
    pub fn login(&mut self, email: &str, password: &str) -> Option<Event> {
        if email.trim().is_empty() || password.trim().is_empty() {
            tracing::debug!("login ignored: blank credentials");
            return None;
        }
        self.user = Some(email.trim().to_string());
        Some(Event::LoggedIn {
            user: email.trim().to_string(),
            at: Utc::now(),
        })
    }

    pub fn logout(&mut self) -> Option<Event> {
        self.user.take()?;
        Some(Event::LoggedOut { at: Utc::now() })
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_fields() {
        let mut gate = SessionGate::new();
        assert!(gate.login("", "secret").is_none());
        assert!(gate.login("me@example.com", "").is_none());
        assert!(gate.login("  ", "  ").is_none());
        assert!(!gate.is_logged_in());

        assert!(gate.login("me@example.com", "secret").is_some());
        assert_eq!(gate.user(), Some("me@example.com"));
    }

    #[test]
    fn logout_clears_identity() {
        let mut gate = SessionGate::new();
        assert!(gate.logout().is_none());
        gate.login("me@example.com", "pw");
        assert!(gate.logout().is_some());
        assert!(!gate.is_logged_in());
        assert!(gate.logout().is_none());
    }
}
