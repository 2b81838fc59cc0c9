//! Who is signed in.
//!
//! The store keys every query by user id, so each operation needs one. An
//! [`Identity`] provider answers "who is signed in right now", and
//! [`Session::resolve`] turns that answer into an explicit [`Session`] or
//! an [`Unauthenticated`](super::error::KeepError::Unauthenticated) error.
//! Operations re-resolve on every call instead of caching the answer, so a
//! sign-out between actions surfaces at the next action rather than acting
//! as a stale user.

use std::sync::{Arc, PoisonError, RwLock};

use super::error::{KeepError, Result};
use super::note::UserId;

/// Source of the currently signed-in user, typically backed by an auth SDK
/// that tracks its session locally.
pub trait Identity: Send + Sync {
    /// The signed-in user's id, or `None` when signed out.
    fn current_user_id(&self) -> Option<UserId>;
}

impl<I: Identity + ?Sized> Identity for Arc<I> {
    fn current_user_id(&self) -> Option<UserId> {
        (**self).current_user_id()
    }
}

/// Proof that a user was signed in when an operation started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
}

impl Session {
    /// Captures the current user, or fails when nobody is signed in.
    pub fn resolve(identity: &impl Identity) -> Result<Self> {
        match identity.current_user_id() {
            Some(user_id) => Ok(Self { user_id }),
            None => Err(KeepError::Unauthenticated),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

/// An [`Identity`] with a settable answer.
///
/// Tests flip it mid-scenario to simulate a sign-out; embedders whose auth
/// SDK pushes state changes can hold one and write into it.
#[derive(Debug, Default)]
pub struct StaticIdentity {
    user: RwLock<Option<UserId>>,
}

impl StaticIdentity {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user: RwLock::new(Some(user_id.into())),
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Replaces the signed-in user; `None` signs out.
    pub fn set_user(&self, user_id: Option<UserId>) {
        let mut user = self.user.write().unwrap_or_else(PoisonError::into_inner);
        *user = user_id;
    }
}

impl Identity for StaticIdentity {
    fn current_user_id(&self) -> Option<UserId> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_captures_the_user() {
        let identity = StaticIdentity::signed_in("user-1");
        let session = Session::resolve(&identity).unwrap();
        assert_eq!(session.user_id(), "user-1");
    }

    #[test]
    fn test_resolve_fails_when_signed_out() {
        let identity = StaticIdentity::signed_out();
        assert!(matches!(
            Session::resolve(&identity),
            Err(KeepError::Unauthenticated)
        ));
    }

    #[test]
    fn test_sign_out_is_visible_through_a_shared_handle() {
        let identity = Arc::new(StaticIdentity::signed_in("user-1"));
        let handle = Arc::clone(&identity);
        identity.set_user(None);
        assert!(Session::resolve(&handle).is_err());
    }
}
