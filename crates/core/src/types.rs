//! Domain vocabulary shared across crates.
//!
//! The string representations match what the store persists and what the
//! form controls submit, so `as_str`/`parse` round-trip exactly.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a user (profile row).
pub type UserId = Uuid;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeType {
    Long,
    Short,
}

impl TradeType {
    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "Long",
            Self::Short => "Short",
        }
    }

    /// Parses from the exact form value; anything else is rejected.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Long" => Some(Self::Long),
            "Short" => Some(Self::Short),
            _ => None,
        }
    }
}

/// Trading strategy label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    Scalp,
    Swing,
    DayTrade,
}

impl Strategy {
    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scalp => "Scalp",
            Self::Swing => "Swing",
            Self::DayTrade => "Day trade",
        }
    }

    /// Parses from the exact form value; anything else is rejected.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Scalp" => Some(Self::Scalp),
            "Swing" => Some(Self::Swing),
            "Day trade" => Some(Self::DayTrade),
            _ => None,
        }
    }
}

/// Lifecycle status of a trade.
///
/// The store column is free text (unknown statuses pass through verbatim);
/// this enum covers the two values the UI offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeStatus {
    #[default]
    Open,
    Closed,
}

impl TradeStatus {
    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
        }
    }

    /// Parses from the stored value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Open" => Some(Self::Open),
            "Closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_type_round_trips() {
        assert_eq!(TradeType::parse("Long"), Some(TradeType::Long));
        assert_eq!(TradeType::parse("Short"), Some(TradeType::Short));
        assert_eq!(TradeType::Long.as_str(), "Long");
        assert_eq!(TradeType::Short.as_str(), "Short");
    }

    #[test]
    fn trade_type_rejects_casing_variants() {
        assert_eq!(TradeType::parse("long"), None);
        assert_eq!(TradeType::parse("LONG"), None);
        assert_eq!(TradeType::parse(""), None);
    }

    #[test]
    fn strategy_round_trips() {
        assert_eq!(Strategy::parse("Scalp"), Some(Strategy::Scalp));
        assert_eq!(Strategy::parse("Swing"), Some(Strategy::Swing));
        assert_eq!(Strategy::parse("Day trade"), Some(Strategy::DayTrade));
        assert_eq!(Strategy::DayTrade.as_str(), "Day trade");
    }

    #[test]
    fn strategy_rejects_unknown_labels() {
        assert_eq!(Strategy::parse("Daytrade"), None);
        assert_eq!(Strategy::parse("day trade"), None);
        assert_eq!(Strategy::parse("Position"), None);
    }

    #[test]
    fn status_defaults_to_open() {
        assert_eq!(TradeStatus::default(), TradeStatus::Open);
        assert_eq!(TradeStatus::parse("Open"), Some(TradeStatus::Open));
        assert_eq!(TradeStatus::parse("Closed"), Some(TradeStatus::Closed));
        assert_eq!(TradeStatus::parse("Settled"), None);
    }
}
