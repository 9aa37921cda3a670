//! Trade submission validation.
//!
//! Normalizes a raw form submission into an insertable trade. Checks run in
//! a fixed order and short-circuit on the first failure, so the caller gets
//! exactly one message to render. Nothing is written until every check
//! passes; the owner id is injected later by the trade service, never taken
//! from the draft.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{Strategy, TradeStatus, TradeType};

/// A raw trade submission. Every field arrives as text, exactly as a form
/// posts it; empty strings mean "not provided".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeDraft {
    pub asset_pair: String,
    pub trade_type: String,
    pub entry_price: String,
    pub exit_price: String,
    pub position_size: String,
    pub strategy: String,
    pub notes: String,
    pub trade_date: String,
    pub status: String,
}

/// A validated, normalized trade ready for insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrade {
    pub asset_pair: String,
    pub trade_type: TradeType,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    pub position_size: Option<Decimal>,
    pub strategy: Strategy,
    pub notes: Option<String>,
    /// Stored verbatim; only "Open" and "Closed" come from the UI, but the
    /// column is not restricted beyond that.
    pub status: String,
    pub trade_date: DateTime<Utc>,
}

impl TradeDraft {
    /// Validates and normalizes the draft.
    ///
    /// `now` is the reference instant for the future-date check, passed in
    /// so callers and tests evaluate it at a single point.
    ///
    /// # Errors
    /// Returns the first failing check's [`ValidationError`]; later checks
    /// do not run.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<NewTrade, ValidationError> {
        let asset_pair = self.asset_pair.trim();
        if asset_pair.is_empty()
            || self.trade_type.trim().is_empty()
            || self.entry_price.trim().is_empty()
            || self.strategy.trim().is_empty()
            || self.trade_date.trim().is_empty()
        {
            return Err(ValidationError::MissingFields);
        }

        let trade_type =
            TradeType::parse(self.trade_type.trim()).ok_or(ValidationError::InvalidTradeType)?;
        let strategy =
            Strategy::parse(self.strategy.trim()).ok_or(ValidationError::InvalidStrategy)?;

        let entry_price = parse_positive_decimal(&self.entry_price)
            .ok_or(ValidationError::InvalidEntryPrice)?;
        let exit_price =
            parse_optional_positive(&self.exit_price, ValidationError::InvalidExitPrice)?;
        let position_size =
            parse_optional_positive(&self.position_size, ValidationError::InvalidPositionSize)?;

        let trade_date =
            parse_trade_date(self.trade_date.trim()).ok_or(ValidationError::InvalidTradeDate)?;
        if trade_date > now {
            return Err(ValidationError::FutureTradeDate);
        }

        let notes = match self.notes.trim() {
            "" => None,
            trimmed => Some(trimmed.to_string()),
        };
        let status = match self.status.trim() {
            "" => TradeStatus::Open.as_str().to_string(),
            raw => raw.to_string(),
        };

        Ok(NewTrade {
            asset_pair: asset_pair.to_string(),
            trade_type,
            entry_price,
            exit_price,
            position_size,
            strategy,
            notes,
            status,
            trade_date,
        })
    }
}

fn parse_positive_decimal(raw: &str) -> Option<Decimal> {
    raw.trim()
        .parse::<Decimal>()
        .ok()
        .filter(|value| *value > Decimal::ZERO)
}

fn parse_optional_positive(
    raw: &str,
    on_invalid: ValidationError,
) -> Result<Option<Decimal>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_positive_decimal(raw).map(Some).ok_or(on_invalid)
}

/// Accepts RFC 3339, the `datetime-local` form format, and a bare date.
/// Naive values are taken as UTC.
fn parse_trade_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn sample_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn sample_draft() -> TradeDraft {
        TradeDraft {
            asset_pair: "BTC/USDT".to_string(),
            trade_type: "Long".to_string(),
            entry_price: "100".to_string(),
            exit_price: "110".to_string(),
            position_size: "0.5".to_string(),
            strategy: "Swing".to_string(),
            notes: "entered on retest".to_string(),
            trade_date: "2025-06-14T09:30".to_string(),
            status: String::new(),
        }
    }

    // =========================================================================
    // Happy path
    // =========================================================================

    #[test]
    fn valid_draft_normalizes() {
        let trade = sample_draft().validate(sample_now()).unwrap();

        assert_eq!(trade.asset_pair, "BTC/USDT");
        assert_eq!(trade.trade_type, TradeType::Long);
        assert_eq!(trade.entry_price, dec!(100));
        assert_eq!(trade.exit_price, Some(dec!(110)));
        assert_eq!(trade.position_size, Some(dec!(0.5)));
        assert_eq!(trade.strategy, Strategy::Swing);
        assert_eq!(trade.notes.as_deref(), Some("entered on retest"));
        assert_eq!(trade.status, "Open");
        assert_eq!(
            trade.trade_date,
            Utc.with_ymd_and_hms(2025, 6, 14, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn optional_fields_may_be_empty() {
        let mut draft = sample_draft();
        draft.exit_price = String::new();
        draft.position_size = "   ".to_string();
        draft.notes = "  ".to_string();

        let trade = draft.validate(sample_now()).unwrap();
        assert_eq!(trade.exit_price, None);
        assert_eq!(trade.position_size, None);
        assert_eq!(trade.notes, None);
    }

    #[test]
    fn free_text_is_trimmed() {
        let mut draft = sample_draft();
        draft.asset_pair = "  ETH/USDT  ".to_string();
        draft.notes = "  scaled out early  ".to_string();

        let trade = draft.validate(sample_now()).unwrap();
        assert_eq!(trade.asset_pair, "ETH/USDT");
        assert_eq!(trade.notes.as_deref(), Some("scaled out early"));
    }

    #[test]
    fn unknown_status_passes_through() {
        let mut draft = sample_draft();
        draft.status = "Archived".to_string();
        assert_eq!(draft.validate(sample_now()).unwrap().status, "Archived");

        draft.status = "Closed".to_string();
        assert_eq!(draft.validate(sample_now()).unwrap().status, "Closed");
    }

    // =========================================================================
    // Check order and failures
    // =========================================================================

    #[test]
    fn missing_required_fields_short_circuits() {
        for field in ["asset_pair", "trade_type", "entry_price", "strategy", "trade_date"] {
            let mut draft = sample_draft();
            match field {
                "asset_pair" => draft.asset_pair = String::new(),
                "trade_type" => draft.trade_type = String::new(),
                "entry_price" => draft.entry_price = String::new(),
                "strategy" => draft.strategy = String::new(),
                _ => draft.trade_date = String::new(),
            }
            assert_eq!(
                draft.validate(sample_now()),
                Err(ValidationError::MissingFields),
                "missing {field}"
            );
        }
    }

    #[test]
    fn bad_enums_are_rejected() {
        let mut draft = sample_draft();
        draft.trade_type = "Sideways".to_string();
        assert_eq!(
            draft.validate(sample_now()),
            Err(ValidationError::InvalidTradeType)
        );

        let mut draft = sample_draft();
        draft.strategy = "Hodl".to_string();
        assert_eq!(
            draft.validate(sample_now()),
            Err(ValidationError::InvalidStrategy)
        );
    }

    #[test]
    fn entry_price_must_be_positive() {
        for bad in ["-5", "0", "abc", "1..2"] {
            let mut draft = sample_draft();
            draft.entry_price = bad.to_string();
            assert_eq!(
                draft.validate(sample_now()),
                Err(ValidationError::InvalidEntryPrice),
                "entry price {bad:?}"
            );
        }
    }

    #[test]
    fn provided_exit_price_must_be_positive() {
        let mut draft = sample_draft();
        draft.exit_price = "-1".to_string();
        assert_eq!(
            draft.validate(sample_now()),
            Err(ValidationError::InvalidExitPrice)
        );
    }

    #[test]
    fn provided_position_size_must_be_positive() {
        let mut draft = sample_draft();
        draft.position_size = "0".to_string();
        assert_eq!(
            draft.validate(sample_now()),
            Err(ValidationError::InvalidPositionSize)
        );
    }

    #[test]
    fn unparseable_date_is_rejected() {
        let mut draft = sample_draft();
        draft.trade_date = "last tuesday".to_string();
        assert_eq!(
            draft.validate(sample_now()),
            Err(ValidationError::InvalidTradeDate)
        );
    }

    #[test]
    fn future_date_is_rejected() {
        let now = sample_now();
        let mut draft = sample_draft();
        draft.trade_date = (now + Duration::days(1)).to_rfc3339();
        assert_eq!(draft.validate(now), Err(ValidationError::FutureTradeDate));
    }

    #[test]
    fn date_equal_to_now_is_accepted() {
        let now = sample_now();
        let mut draft = sample_draft();
        draft.trade_date = now.to_rfc3339();
        assert!(draft.validate(now).is_ok());
    }

    #[test]
    fn bare_date_parses_as_midnight_utc() {
        let mut draft = sample_draft();
        draft.trade_date = "2025-06-10".to_string();
        let trade = draft.validate(sample_now()).unwrap();
        assert_eq!(
            trade.trade_date,
            Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn entry_price_failure_reported_before_date_failure() {
        // Both fields are bad; the price check runs first.
        let mut draft = sample_draft();
        draft.entry_price = "-5".to_string();
        draft.trade_date = "not a date".to_string();
        assert_eq!(
            draft.validate(sample_now()),
            Err(ValidationError::InvalidEntryPrice)
        );
    }
}
