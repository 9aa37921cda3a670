//! Comment validation and author-gated deletion.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use trade_social_core::error::{Error, ValidationError};
use trade_social_core::identity::Identity;
use trade_social_data::models::{CommentRecord, CommentWithAuthor};
use trade_social_data::store::CommentStore;

/// Longest accepted comment, counted over the trimmed content.
const MAX_COMMENT_CHARS: usize = 1000;

/// Validates comment content and scopes deletion to the author.
pub struct CommentGuard {
    comments: Arc<dyn CommentStore>,
    identity: Arc<dyn Identity>,
}

impl CommentGuard {
    #[must_use]
    pub fn new(comments: Arc<dyn CommentStore>, identity: Arc<dyn Identity>) -> Self {
        Self { comments, identity }
    }

    /// Stores a trimmed comment by the current user.
    ///
    /// # Errors
    /// `EmptyComment` when nothing remains after trimming, `CommentTooLong`
    /// past 1000 characters.
    pub async fn add(&self, trade_id: Uuid, content: &str) -> Result<CommentRecord, Error> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyComment.into());
        }
        if trimmed.chars().count() > MAX_COMMENT_CHARS {
            return Err(ValidationError::CommentTooLong.into());
        }
        let user = self.identity.current_user().ok_or(Error::Unauthenticated)?;
        let record = self.comments.insert_comment(trade_id, user, trimmed).await?;
        info!(trade_id = %trade_id, user_id = %user, comment_id = %record.id, "comment added");
        Ok(record)
    }

    /// Deletes a comment authored by the current user.
    ///
    /// # Errors
    /// `NotFoundOrForbidden` for a missing or non-owned comment; the caller
    /// cannot tell which.
    pub async fn remove(&self, comment_id: Uuid) -> Result<(), Error> {
        let user = self.identity.current_user().ok_or(Error::Unauthenticated)?;
        self.comments.delete_comment(comment_id, user).await?;
        info!(comment_id = %comment_id, user_id = %user, "comment removed");
        Ok(())
    }

    /// Comments on a trade in creation order, joined with their authors.
    ///
    /// # Errors
    /// `Store` if the read fails.
    pub async fn for_trade(&self, trade_id: Uuid) -> Result<Vec<CommentWithAuthor>, Error> {
        Ok(self.comments.comments_for_trade(trade_id).await?)
    }
}
