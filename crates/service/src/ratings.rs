//! Rating lifecycle: at most one rating per user per trade.
//!
//! Values arrive as floats from a star control, get range-checked against
//! `1..=5`, and are stored rounded to the nearest integer. Mutations are
//! scoped to the rater, so touching someone else's rating reads as not
//! found.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use trade_social_core::error::{Error, StoreError, ValidationError};
use trade_social_core::identity::Identity;
use trade_social_data::models::{NewRating, RatingRecord};
use trade_social_data::store::RatingStore;

const MIN_RATING: f64 = 1.0;
const MAX_RATING: f64 = 5.0;

/// Enforces the one-rating-per-user-per-trade invariant.
pub struct RatingEngine {
    ratings: Arc<dyn RatingStore>,
    identity: Arc<dyn Identity>,
}

impl RatingEngine {
    #[must_use]
    pub fn new(ratings: Arc<dyn RatingStore>, identity: Arc<dyn Identity>) -> Self {
        Self { ratings, identity }
    }

    /// Rates a trade for the first time.
    ///
    /// # Errors
    /// `RatingOutOfRange` outside `[1, 5]`; `AlreadyRated` when this user
    /// already holds a rating for the trade (prefer
    /// [`RatingEngine::upsert_rating`] to avoid tracking prior state).
    pub async fn rate(&self, trade_id: Uuid, value: f64) -> Result<RatingRecord, Error> {
        let rating = checked_value(value)?;
        let rater = self.identity.current_user().ok_or(Error::Unauthenticated)?;
        let new_rating = NewRating {
            trade_id,
            rater_id: rater,
            rating,
        };
        match self.ratings.insert_rating(&new_rating).await {
            Ok(record) => {
                info!(trade_id = %trade_id, rater_id = %rater, rating, "trade rated");
                Ok(record)
            }
            Err(StoreError::UniqueViolation) => Err(ValidationError::AlreadyRated.into()),
            Err(err) => Err(err.into()),
        }
    }

    /// Changes the value of an existing rating owned by the current user.
    ///
    /// # Errors
    /// `NotFoundOrForbidden` when the rating id does not exist or belongs
    /// to another rater.
    pub async fn update_rating(&self, rating_id: Uuid, value: f64) -> Result<RatingRecord, Error> {
        let rating = checked_value(value)?;
        let rater = self.identity.current_user().ok_or(Error::Unauthenticated)?;
        let record = self.ratings.update_rating(rating_id, rater, rating).await?;
        info!(rating_id = %rating_id, rater_id = %rater, rating, "rating updated");
        Ok(record)
    }

    /// Removes a rating owned by the current user.
    ///
    /// # Errors
    /// `NotFoundOrForbidden` for a missing or non-owned id; removing twice
    /// yields the same result, never a crash.
    pub async fn remove_rating(&self, rating_id: Uuid) -> Result<(), Error> {
        let rater = self.identity.current_user().ok_or(Error::Unauthenticated)?;
        self.ratings.delete_rating(rating_id, rater).await?;
        info!(rating_id = %rating_id, rater_id = %rater, "rating removed");
        Ok(())
    }

    /// Creates or replaces the current user's rating in one idempotent
    /// write keyed by `(trade_id, rater_id)`.
    ///
    /// # Errors
    /// `RatingOutOfRange` outside `[1, 5]`; `Unauthenticated` without a
    /// session.
    pub async fn upsert_rating(&self, trade_id: Uuid, value: f64) -> Result<RatingRecord, Error> {
        let rating = checked_value(value)?;
        let rater = self.identity.current_user().ok_or(Error::Unauthenticated)?;
        let new_rating = NewRating {
            trade_id,
            rater_id: rater,
            rating,
        };
        let record = self.ratings.upsert_rating(&new_rating).await?;
        info!(trade_id = %trade_id, rater_id = %rater, rating, "rating upserted");
        Ok(record)
    }

    /// The current user's own rating for a trade; `None` when absent or
    /// anonymous.
    ///
    /// # Errors
    /// `Store` if the read fails.
    pub async fn rating_for(&self, trade_id: Uuid) -> Result<Option<RatingRecord>, Error> {
        let Some(rater) = self.identity.current_user() else {
            return Ok(None);
        };
        Ok(self.ratings.rating_by_pair(trade_id, rater).await?)
    }
}

fn checked_value(value: f64) -> Result<i16, ValidationError> {
    if !value.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(ValidationError::RatingOutOfRange);
    }
    Ok(value.round() as i16)
}
