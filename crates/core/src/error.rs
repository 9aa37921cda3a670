//! Error taxonomy shared by every component.
//!
//! Each operation returns a `Result` carrying exactly one of these kinds;
//! nothing crosses a component boundary as a panic.

use thiserror::Error;

/// User-facing validation failures.
///
/// The messages are rendered inline on the originating form or control, so
/// each check gets its own variant and wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingFields,
    #[error("Invalid trade type")]
    InvalidTradeType,
    #[error("Invalid strategy")]
    InvalidStrategy,
    #[error("Entry price must be a positive number")]
    InvalidEntryPrice,
    #[error("Exit price must be a positive number")]
    InvalidExitPrice,
    #[error("Position size must be a positive number")]
    InvalidPositionSize,
    #[error("Invalid trade date")]
    InvalidTradeDate,
    #[error("Trade date cannot be in the future")]
    FutureTradeDate,
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,
    #[error("You have already rated this trade")]
    AlreadyRated,
    #[error("Comment cannot be empty")]
    EmptyComment,
    #[error("Comment must be less than 1000 characters")]
    CommentTooLong,
}

/// Failures surfaced by a store capability.
///
/// `NotFound` must stay distinguishable from other failures: the engines
/// build ownership masking and idempotent deletes on top of it, and map
/// `UniqueViolation` to domain outcomes (already liked, already rated).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No row matched the predicate.
    #[error("row not found")]
    NotFound,
    /// A uniqueness constraint rejected the write.
    #[error("unique constraint violated")]
    UniqueViolation,
    /// The backend failed or could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Service-level error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Bad input shape or range; recoverable once corrected.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No current user; the caller should redirect to sign-in.
    #[error("not authenticated")]
    Unauthenticated,
    /// An ownership-scoped mutation matched zero rows. Intentionally
    /// ambiguous: callers cannot tell "not yours" from "does not exist".
    #[error("not found")]
    NotFoundOrForbidden,
    /// Network or backend failure; safe to retry, no partial effect.
    #[error("store unavailable: {0}")]
    Store(String),
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFoundOrForbidden,
            // Contexts that expect a conflict intercept it before this
            // conversion runs; reaching here means the write was unexpected.
            StoreError::UniqueViolation => Self::Store("unique constraint violated".to_string()),
            StoreError::Unavailable(msg) => Self::Store(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_match_ui_wording() {
        assert_eq!(
            ValidationError::MissingFields.to_string(),
            "Please fill in all required fields"
        );
        assert_eq!(
            ValidationError::RatingOutOfRange.to_string(),
            "Rating must be between 1 and 5"
        );
        assert_eq!(
            ValidationError::FutureTradeDate.to_string(),
            "Trade date cannot be in the future"
        );
    }

    #[test]
    fn not_found_masks_ownership() {
        let err: Error = StoreError::NotFound.into();
        assert_eq!(err, Error::NotFoundOrForbidden);
        assert_eq!(err.to_string(), "not found");
    }

    #[test]
    fn unavailable_keeps_cause() {
        let err: Error = StoreError::Unavailable("connection refused".to_string()).into();
        assert_eq!(err, Error::Store("connection refused".to_string()));
    }

    #[test]
    fn validation_converts_transparently() {
        let err: Error = ValidationError::EmptyComment.into();
        assert_eq!(err.to_string(), "Comment cannot be empty");
    }
}
