/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::OrderType;
use crate::http::{AnxError, Result};

/// Cancel-and-replace instruction attached to a new order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceOrder {
    pub existing_id: String,
    /// Exchange-enforced: replace only while the old order is still active
    pub only_if_active: bool,
}

/// Outbound order. Buys are sized in the traded currency, sells in the
/// settlement currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_type: OrderType,
    pub is_buy: bool,
    pub traded_currency: String,
    pub traded_amount: Option<Decimal>,
    pub settlement_currency: String,
    pub settlement_amount: Option<Decimal>,
    pub limit_price: Option<Decimal>,
    pub replace: Option<ReplaceOrder>,
}

impl Order {
    pub fn limit_buy(
        traded_currency: &str,
        settlement_currency: &str,
        traded_amount: Decimal,
        limit_price: Decimal,
    ) -> Self {
        Self {
            order_type: OrderType::Limit,
            is_buy: true,
            traded_currency: traded_currency.to_string(),
            traded_amount: Some(traded_amount),
            settlement_currency: settlement_currency.to_string(),
            settlement_amount: None,
            limit_price: Some(limit_price),
            replace: None,
        }
    }

    pub fn limit_sell(
        traded_currency: &str,
        settlement_currency: &str,
        settlement_amount: Decimal,
        limit_price: Decimal,
    ) -> Self {
        Self {
            order_type: OrderType::Limit,
            is_buy: false,
            traded_currency: traded_currency.to_string(),
            traded_amount: None,
            settlement_currency: settlement_currency.to_string(),
            settlement_amount: Some(settlement_amount),
            limit_price: Some(limit_price),
            replace: None,
        }
    }

    pub fn replacing(mut self, existing_id: impl Into<String>, only_if_active: bool) -> Self {
        self.replace = Some(ReplaceOrder {
            existing_id: existing_id.into(),
            only_if_active,
        });
        self
    }

    /// Amount selected by the side: traded amount for buys, settlement for sells
    pub fn sized_amount(&self) -> Option<Decimal> {
        if self.is_buy {
            self.traded_amount
        } else {
            self.settlement_amount
        }
    }

    /// Local consistency checks run before anything is signed or sent
    pub fn validate(&self) -> Result<()> {
        if self.traded_currency.trim().is_empty() || self.settlement_currency.trim().is_empty() {
            return Err(AnxError::Validation(
                "traded and settlement currencies are required".to_string(),
            ));
        }

        let (field, amount) = if self.is_buy {
            ("traded_amount", self.traded_amount)
        } else {
            ("settlement_amount", self.settlement_amount)
        };
        match amount {
            None => {
                let side = if self.is_buy { "buy" } else { "sell" };
                return Err(AnxError::Validation(format!(
                    "{field} is required for a {side} order"
                )));
            }
            Some(value) if value <= Decimal::ZERO => {
                return Err(AnxError::Validation(format!("{field} must be positive")));
            }
            Some(_) => {}
        }

        match (self.order_type, self.limit_price) {
            (OrderType::Limit, None) => Err(AnxError::Validation(
                "limit_price is required for a limit order".to_string(),
            )),
            (OrderType::Limit, Some(price)) if price <= Decimal::ZERO => Err(
                AnxError::Validation("limit_price must be positive".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

/// Body of `order/new`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrderRequest {
    pub order: WireOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOrder {
    pub order_type: OrderType,
    pub buy_traded_currency: bool,
    pub traded_currency: String,
    pub settlement_currency: String,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traded_currency_amount: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_currency_amount: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_price_in_settlement_currency: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_existing_order_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_only_if_active: Option<bool>,
}

impl From<&Order> for NewOrderRequest {
    fn from(order: &Order) -> Self {
        let (traded_currency_amount, settlement_currency_amount) = if order.is_buy {
            (order.traded_amount, None)
        } else {
            (None, order.settlement_amount)
        };
        let limit_price = match order.order_type {
            OrderType::Limit => order.limit_price,
            OrderType::Market => None,
        };

        Self {
            order: WireOrder {
                order_type: order.order_type,
                buy_traded_currency: order.is_buy,
                traded_currency: order.traded_currency.to_ascii_uppercase(),
                settlement_currency: order.settlement_currency.to_ascii_uppercase(),
                traded_currency_amount,
                settlement_currency_amount,
                limit_price_in_settlement_currency: limit_price,
                replace_existing_order_uuid: order.replace.as_ref().map(|r| r.existing_id.clone()),
                replace_only_if_active: order.replace.as_ref().map(|r| r.only_if_active),
            },
        }
    }
}

/// Body of `order/cancel`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrdersRequest {
    pub order_ids: Vec<String>,
}

/// Body of `order/list`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersRequest {
    pub active_only: bool,
}

/// Body of `order/info`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInfoRequest {
    pub order_id: String,
}

/// Body of `send` (crypto withdrawal)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCoinRequest {
    pub ccy: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<String>,
}

/// Body of `receive` (deposit address)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiveAddressRequest {
    pub ccy: String,
}
