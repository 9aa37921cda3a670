//! Trade submission and owner-gated mutation.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use trade_social_core::error::Error;
use trade_social_core::identity::Identity;
use trade_social_core::validation::TradeDraft;
use trade_social_data::models::TradeRecord;
use trade_social_data::store::TradeStore;

/// Validates drafts and performs owner-scoped trade writes.
pub struct TradeService {
    trades: Arc<dyn TradeStore>,
    identity: Arc<dyn Identity>,
}

impl TradeService {
    #[must_use]
    pub fn new(trades: Arc<dyn TradeStore>, identity: Arc<dyn Identity>) -> Self {
        Self { trades, identity }
    }

    /// Validates and persists a new trade for the current user.
    ///
    /// The owner id comes from the identity capability, never from the
    /// draft. Nothing is written when validation fails.
    ///
    /// # Errors
    /// `Validation` for a bad draft, `Unauthenticated` without a session,
    /// `Store` if the write fails.
    pub async fn submit(&self, draft: &TradeDraft) -> Result<TradeRecord, Error> {
        let trade = draft.validate(Utc::now())?;
        let owner = self.identity.current_user().ok_or(Error::Unauthenticated)?;
        let stored = self.trades.insert_trade(owner, &trade).await?;
        info!(
            trade_id = %stored.id,
            owner_id = %owner,
            asset_pair = %stored.asset_pair,
            "trade submitted"
        );
        Ok(stored)
    }

    /// Re-validates the draft and replaces the trade's mutable fields.
    ///
    /// # Errors
    /// `NotFoundOrForbidden` when the trade does not exist or is not owned
    /// by the current user; the two cases are indistinguishable.
    pub async fn update(&self, trade_id: Uuid, draft: &TradeDraft) -> Result<TradeRecord, Error> {
        let trade = draft.validate(Utc::now())?;
        let owner = self.identity.current_user().ok_or(Error::Unauthenticated)?;
        let stored = self.trades.update_trade(trade_id, owner, &trade).await?;
        info!(trade_id = %stored.id, owner_id = %owner, "trade updated");
        Ok(stored)
    }

    /// Deletes an owned trade.
    ///
    /// # Errors
    /// Same ownership masking as [`TradeService::update`].
    pub async fn delete(&self, trade_id: Uuid) -> Result<(), Error> {
        let owner = self.identity.current_user().ok_or(Error::Unauthenticated)?;
        self.trades.delete_trade(trade_id, owner).await?;
        info!(trade_id = %trade_id, owner_id = %owner, "trade deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use trade_social_core::error::ValidationError;
    use trade_social_core::identity::SessionIdentity;
    use trade_social_data::memory::MemoryStore;

    fn sample_draft() -> TradeDraft {
        TradeDraft {
            asset_pair: "BTC/USDT".to_string(),
            trade_type: "Long".to_string(),
            entry_price: "100".to_string(),
            exit_price: "110".to_string(),
            position_size: String::new(),
            strategy: "Scalp".to_string(),
            notes: String::new(),
            trade_date: "2024-01-15".to_string(),
            status: String::new(),
        }
    }

    fn service_for(store: &Arc<MemoryStore>, user: Option<Uuid>) -> TradeService {
        let identity = match user {
            Some(user) => SessionIdentity::authenticated(user),
            None => SessionIdentity::anonymous(),
        };
        TradeService::new(store.clone(), Arc::new(identity))
    }

    #[tokio::test]
    async fn submit_injects_owner_and_defaults_status() {
        let store = Arc::new(MemoryStore::new());
        let owner = store.add_profile("trader_joe");
        let service = service_for(&store, Some(owner));

        let stored = service.submit(&sample_draft()).await.unwrap();

        assert_eq!(stored.owner_id, owner);
        assert_eq!(stored.status, "Open");
        assert_eq!(stored.entry_price, dec!(100));
        assert_eq!(stored.exit_price, Some(dec!(110)));
        assert!(stored.pnl_percentage.is_none());
    }

    #[tokio::test]
    async fn submit_requires_authentication() {
        let store = Arc::new(MemoryStore::new());
        let service = service_for(&store, None);

        assert_eq!(
            service.submit(&sample_draft()).await,
            Err(Error::Unauthenticated)
        );
    }

    #[tokio::test]
    async fn submit_rejects_invalid_draft_without_writing() {
        let store = Arc::new(MemoryStore::new());
        let owner = store.add_profile("trader_joe");
        let service = service_for(&store, Some(owner));

        let mut draft = sample_draft();
        draft.entry_price = "-5".to_string();
        assert_eq!(
            service.submit(&draft).await,
            Err(Error::Validation(ValidationError::InvalidEntryPrice))
        );

        let page = trade_social_data::store::Page {
            limit: 10,
            offset: 0,
        };
        use trade_social_data::store::TradeStore as _;
        assert!(store.trades_page(page).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_is_owner_scoped() {
        let store = Arc::new(MemoryStore::new());
        let owner = store.add_profile("trader_joe");
        let stranger = store.add_profile("lurker");

        let stored = service_for(&store, Some(owner))
            .submit(&sample_draft())
            .await
            .unwrap();

        let mut draft = sample_draft();
        draft.status = "Closed".to_string();

        assert_eq!(
            service_for(&store, Some(stranger))
                .update(stored.id, &draft)
                .await,
            Err(Error::NotFoundOrForbidden)
        );

        let updated = service_for(&store, Some(owner))
            .update(stored.id, &draft)
            .await
            .unwrap();
        assert_eq!(updated.status, "Closed");
    }

    #[tokio::test]
    async fn delete_masks_missing_and_non_owned_alike() {
        let store = Arc::new(MemoryStore::new());
        let owner = store.add_profile("trader_joe");
        let stranger = store.add_profile("lurker");

        let stored = service_for(&store, Some(owner))
            .submit(&sample_draft())
            .await
            .unwrap();

        let stranger_service = service_for(&store, Some(stranger));
        let against_owned = stranger_service.delete(stored.id).await;
        let against_missing = stranger_service.delete(Uuid::new_v4()).await;
        assert_eq!(against_owned, Err(Error::NotFoundOrForbidden));
        assert_eq!(against_owned, against_missing);

        assert!(service_for(&store, Some(owner))
            .delete(stored.id)
            .await
            .is_ok());
    }
}
