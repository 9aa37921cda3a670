//! Identity capability.
//!
//! Session management lives outside this system; components only ever ask
//! "who is acting?" through this seam.

use crate::types::UserId;

/// Answers who the acting user is, if anyone.
pub trait Identity: Send + Sync {
    /// The authenticated user, or `None` for an anonymous caller.
    fn current_user(&self) -> Option<UserId>;
}

/// Identity backed by an already-resolved session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionIdentity {
    user: Option<UserId>,
}

impl SessionIdentity {
    /// Identity for a signed-in user.
    #[must_use]
    pub fn authenticated(user: UserId) -> Self {
        Self { user: Some(user) }
    }

    /// Identity for an anonymous caller.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

impl Identity for SessionIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.user
    }
}
