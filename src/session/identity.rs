//! The identity provider as seen by the storefront: who is signed in, and signing out.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            role,
            signed_in_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum IdentityError {
    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_session(&self) -> Result<Option<Session>, IdentityError>;

    async fn sign_out(&self) -> Result<(), IdentityError>;
}

/// Keeps the session in memory. Used by the demo binary and tests.
#[derive(Default)]
pub struct LocalIdentity {
    session: Mutex<Option<Session>>,
}

impl LocalIdentity {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }

    pub fn sign_in(&self, session: Session) {
        info!(user_id = %session.user_id, role = ?session.role, "Signed in");
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentity {
    async fn current_session(&self) -> Result<Option<Session>, IdentityError> {
        Ok(self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        let previous = self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(session) = previous {
            info!(user_id = %session.user_id, "Signed out");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let identity = LocalIdentity::signed_out();
        assert_eq!(identity.current_session().await, Ok(None));

        identity.sign_in(Session::new("u1", "asha@example.com", Role::Customer));
        let session = identity.current_session().await.unwrap().unwrap();
        assert_eq!(session.user_id, "u1");
        assert!(!session.is_admin());

        identity.sign_out().await.unwrap();
        assert_eq!(identity.current_session().await, Ok(None));
    }
}
