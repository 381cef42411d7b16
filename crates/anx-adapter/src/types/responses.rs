/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response payloads (envelope fields stripped)
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::models::{OrderBookLevel, OrderRecord, serde_helpers};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerResponse {
    pub ticker: WireTicker,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireTicker {
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub bid: Decimal,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub ask: Decimal,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub last: Decimal,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub high: Decimal,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub low: Decimal,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub vol: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthResponse {
    pub depth: WireDepth,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireDepth {
    #[serde(default)]
    pub asks: Vec<OrderBookLevel>,
    #[serde(default)]
    pub bids: Vec<OrderBookLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderResponse {
    pub order_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CancelOrdersResponse {
    #[serde(default)]
    pub errors: Vec<CancelError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelError {
    pub order_id: String,
    pub error_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderListResponse {
    #[serde(default)]
    pub orders: Vec<OrderRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInfoResponse {
    pub order: OrderRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountResponse {
    #[serde(default)]
    pub rights: Vec<String>,
    #[serde(default)]
    pub wallets: BTreeMap<String, WireWallet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireWallet {
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub available: Decimal,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCoinResponse {
    pub transaction_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiveAddressResponse {
    pub address: String,
}
