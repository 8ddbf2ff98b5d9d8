use crate::domain::model::User;
use std::sync::{PoisonError, RwLock};

/// In-memory sign-in state. Holds the current user for the lifetime of one
/// process and nothing else: no credentials, no verification, no persistence.
#[derive(Debug, Default)]
pub struct Session {
    user: RwLock<Option<User>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current_user().is_some()
    }

    /// Any name/email pair is accepted; a submitted form simply becomes the
    /// current user.
    pub fn sign_in(&self, name: &str, email: &str) -> User {
        let user = User {
            name: name.to_string(),
            email: email.to_string(),
        };
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());
        user
    }

    pub fn sign_out(&self) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_and_out() {
        let session = Session::new();
        assert!(session.current_user().is_none());

        session.sign_in("Alice", "alice@example.com");
        assert!(session.is_signed_in());
        assert_eq!(session.current_user().unwrap().name, "Alice");

        session.sign_out();
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_sign_in_replaces_previous_user() {
        let session = Session::new();
        session.sign_in("Alice", "alice@example.com");
        session.sign_in("Bob", "bob@example.com");
        assert_eq!(session.current_user().unwrap().email, "bob@example.com");
    }

    #[test]
    fn test_nothing_survives_a_new_session() {
        let first = Session::new();
        first.sign_in("Alice", "alice@example.com");
        drop(first);

        let second = Session::new();
        assert!(second.current_user().is_none());
    }
}
