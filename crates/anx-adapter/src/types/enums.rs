/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn from_buy_flag(is_buy: bool) -> Self {
        if is_buy { Side::Buy } else { Side::Sell }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Limit,
    Market,
}

/// Server-reported order status.
///
/// `Submitted -> Active | Rejected`,
/// `Active -> PartiallyFilled | Filled | Cancelled | Replaced`,
/// `PartiallyFilled -> Active | Filled`.
/// The adapter never drives these transitions; each query returns the
/// exchange's current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Submitted,
    Active,
    #[serde(alias = "PARTIAL_FILL")]
    PartiallyFilled,
    #[serde(alias = "FULL_FILL")]
    Filled,
    #[serde(alias = "CANCELED")]
    Cancelled,
    Rejected,
    Replaced,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// No further transitions are possible
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Filled
                | OrderStatus::Cancelled
                | OrderStatus::Rejected
                | OrderStatus::Replaced
        )
    }

    /// The order may still trade
    pub fn is_open(self) -> bool {
        matches!(
            self,
            OrderStatus::Submitted | OrderStatus::Active | OrderStatus::PartiallyFilled
        )
    }
}

/// Market segment part of the market data cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Spot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeKind {
    Trade,
    CryptoWithdrawal,
    FiatWithdrawal,
    /// Worst-case estimate when the maker/taker tier cannot be determined
    OfflineTrade,
}
