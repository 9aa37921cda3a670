//! Core types, validation, and capabilities for the trade reputation engine.
//!
//! This crate holds the domain vocabulary (trade type, strategy, status),
//! the trade submission validator, the error taxonomy shared by every
//! component, the identity capability, and configuration.

pub mod config;
pub mod config_loader;
pub mod error;
pub mod identity;
pub mod types;
pub mod validation;

pub use config::{AppConfig, DatabaseConfig, FeedConfig};
pub use config_loader::ConfigLoader;
pub use error::{Error, StoreError, ValidationError};
pub use identity::{Identity, SessionIdentity};
pub use types::{Strategy, TradeStatus, TradeType, UserId};
pub use validation::{NewTrade, TradeDraft};
