/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OrderStatus, OrderType, Side};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: String,
    pub counter: String,
}

impl CurrencyPair {
    pub fn new(base: impl Into<String>, counter: impl Into<String>) -> Self {
        Self {
            base: base.into().to_ascii_uppercase(),
            counter: counter.into().to_ascii_uppercase(),
        }
    }

    /// Exchange-native pair code used in market data paths, e.g. `BTCUSD`
    pub fn native(&self) -> String {
        format!("{}{}", self.base, self.counter)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.counter)
    }
}

impl FromStr for CurrencyPair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((base, counter)) if !base.is_empty() && !counter.is_empty() => {
                Ok(Self::new(base, counter))
            }
            _ => Err(format!("invalid currency pair: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub pair: CurrencyPair,
    pub bid: Decimal,
    pub ask: Decimal,
    pub last: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub volume: Decimal,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookLevel {
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub price: Decimal,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub amount: Decimal,
}

/// Asks ascending by price, bids descending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub pair: CurrencyPair,
    pub asks: Vec<OrderBookLevel>,
    pub bids: Vec<OrderBookLevel>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl OrderBook {
    pub fn new(
        pair: CurrencyPair,
        mut asks: Vec<OrderBookLevel>,
        mut bids: Vec<OrderBookLevel>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        asks.sort_by(|a, b| a.price.cmp(&b.price));
        bids.sort_by(|a, b| b.price.cmp(&a.price));
        Self {
            pair,
            asks,
            bids,
            updated_at,
        }
    }

    pub fn best_ask(&self) -> Option<&OrderBookLevel> {
        self.asks.first()
    }

    pub fn best_bid(&self) -> Option<&OrderBookLevel> {
        self.bids.first()
    }
}

/// Exchange-native order snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    #[serde(rename = "orderId")]
    pub id: String,
    pub status: OrderStatus,
    #[serde(rename = "orderType")]
    pub order_type: OrderType,
    #[serde(rename = "buyTradedCurrency")]
    pub is_buy: bool,
    pub traded_currency: String,
    #[serde(
        rename = "tradedCurrencyAmount",
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub traded_amount: Decimal,
    #[serde(
        rename = "tradedCurrencyAmountOutstanding",
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub traded_outstanding: Decimal,
    pub settlement_currency: String,
    #[serde(
        rename = "settlementCurrencyAmount",
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub settlement_amount: Decimal,
    #[serde(
        rename = "settlementCurrencyAmountOutstanding",
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub settlement_outstanding: Decimal,
    #[serde(
        rename = "limitPriceInSettlementCurrency",
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub limit_price: Decimal,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub executed_average_rate: Decimal,
    /// Epoch milliseconds
    #[serde(default)]
    pub timestamp: i64,
}

/// Exchange-neutral view of an order, as consumed by the trading engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitOrderSnapshot {
    pub id: String,
    pub side: Side,
    pub order_type: OrderType,
    pub pair: CurrencyPair,
    pub original_amount: Decimal,
    pub remaining_amount: Decimal,
    pub limit_price: Option<Decimal>,
    pub average_price: Option<Decimal>,
    pub status: OrderStatus,
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<&OrderRecord> for LimitOrderSnapshot {
    fn from(record: &OrderRecord) -> Self {
        let non_zero = |value: Decimal| (!value.is_zero()).then_some(value);
        Self {
            id: record.id.clone(),
            side: Side::from_buy_flag(record.is_buy),
            order_type: record.order_type,
            pair: CurrencyPair::new(&record.traded_currency, &record.settlement_currency),
            original_amount: record.traded_amount,
            remaining_amount: record.traded_outstanding,
            limit_price: non_zero(record.limit_price),
            average_price: non_zero(record.executed_average_rate),
            status: record.status,
            timestamp: millis_to_datetime(record.timestamp),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Wallet {
    pub available: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountInfo {
    pub rights: BTreeSet<String>,
    pub wallets: BTreeMap<String, Wallet>,
}

impl AccountInfo {
    pub fn has_right(&self, right: &str) -> bool {
        self.rights.contains(right)
    }

    pub fn wallet(&self, currency: &str) -> Option<&Wallet> {
        self.wallets.get(currency)
    }
}

/// Epoch milliseconds to UTC; zero and out-of-range values map to `None`
pub fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    if millis <= 0 {
        return None;
    }
    Utc.timestamp_millis_opt(millis).single()
}

pub(crate) mod serde_helpers {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use std::str::FromStr;

    /// Absent, null and empty-string amounts all mean zero on this exchange
    pub fn deserialize_decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Decimal::ZERO);
        }

        if let Some(raw) = value.as_str() {
            if raw.trim().is_empty() {
                return Ok(Decimal::ZERO);
            }
            return Decimal::from_str(raw.trim()).map_err(serde::de::Error::custom);
        }

        if value.is_number() {
            return Decimal::from_str(&value.to_string())
                .or_else(|_| Decimal::from_scientific(&value.to_string()))
                .map_err(serde::de::Error::custom);
        }

        Err(serde::de::Error::custom("invalid decimal value"))
    }

    pub fn serialize_decimal<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }
}
