//! Like toggling.
//!
//! Row presence is the liked state, so a toggle is a read followed by one
//! write. Two tabs racing the same toggle can both pick the same branch;
//! the conflict outcomes (duplicate insert, double delete) collapse to
//! no-ops instead of surfacing as errors.
//!
//! There is deliberately no ownership check here: hiding the control on a
//! user's own trades is presentation's job.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use trade_social_core::error::{Error, StoreError};
use trade_social_core::identity::Identity;
use trade_social_data::store::LikeStore;

/// Outcome of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeState {
    pub liked: bool,
}

/// Flips the current user's like on a trade.
pub struct LikeToggle {
    likes: Arc<dyn LikeStore>,
    identity: Arc<dyn Identity>,
}

impl LikeToggle {
    #[must_use]
    pub fn new(likes: Arc<dyn LikeStore>, identity: Arc<dyn Identity>) -> Self {
        Self { likes, identity }
    }

    /// Likes the trade if the current user has not, unlikes it otherwise.
    ///
    /// # Errors
    /// `Unauthenticated` without a session, `Store` if the backend fails.
    pub async fn toggle(&self, trade_id: Uuid) -> Result<LikeState, Error> {
        let user = self.identity.current_user().ok_or(Error::Unauthenticated)?;

        let state = if self.likes.like_by_pair(trade_id, user).await?.is_some() {
            match self.likes.delete_like(trade_id, user).await {
                // Another toggle deleted it first; the row is gone either way.
                Ok(()) | Err(StoreError::NotFound) => LikeState { liked: false },
                Err(err) => return Err(err.into()),
            }
        } else {
            match self.likes.insert_like(trade_id, user).await {
                // Another toggle inserted it first; the row exists either way.
                Ok(_) | Err(StoreError::UniqueViolation) => LikeState { liked: true },
                Err(err) => return Err(err.into()),
            }
        };

        info!(trade_id = %trade_id, user_id = %user, liked = state.liked, "like toggled");
        Ok(state)
    }

    /// Whether the current user has liked the trade; `false` for anonymous
    /// callers.
    ///
    /// # Errors
    /// `Store` if the read fails.
    pub async fn like_for(&self, trade_id: Uuid) -> Result<bool, Error> {
        let Some(user) = self.identity.current_user() else {
            return Ok(false);
        };
        Ok(self.likes.like_by_pair(trade_id, user).await?.is_some())
    }
}
