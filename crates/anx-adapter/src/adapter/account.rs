/*
[INPUT]:  Signed account queries, withdrawal requests
[OUTPUT]: Account info, withdrawal permission, withdrawal ids, deposit addresses
[POS]:    Adapter layer - account operations exposed to the trading engine
[UPDATE]: When permission names or withdrawal rules change
*/

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::warn;

use crate::fee;
use crate::http::{AnxClient, AnxError, Result};
use crate::types::AccountInfo;

/// Account right required to move funds off the exchange
pub const WITHDRAW_RIGHT: &str = "withdraw";

#[derive(Debug, Clone)]
pub struct AccountAdapter {
    client: Arc<AnxClient>,
}

impl AccountAdapter {
    pub fn new(client: Arc<AnxClient>) -> Self {
        Self { client }
    }

    pub async fn get_account_info(&self) -> Result<AccountInfo> {
        self.client.account_info().await
    }

    pub async fn has_withdrawal_permission(&self) -> Result<bool> {
        let account = self.get_account_info().await?;
        Ok(account.has_right(WITHDRAW_RIGHT))
    }

    /// Like `has_withdrawal_permission`, with an advisory warning when the
    /// right is absent. Missing rights are a valid configuration, not an error.
    pub async fn check_withdrawal_permission(&self) -> Result<bool> {
        let allowed = self.has_withdrawal_permission().await?;
        if !allowed {
            warn!(
                right = WITHDRAW_RIGHT,
                "API key lacks withdrawal permission; withdrawals will be rejected"
            );
        }
        Ok(allowed)
    }

    /// Withdraw crypto currency to an external address and return the
    /// exchange transaction id.
    pub async fn withdraw(
        &self,
        currency: &str,
        amount: Decimal,
        address: &str,
        destination_tag: Option<&str>,
    ) -> Result<String> {
        if fee::is_fiat(currency) {
            return Err(AnxError::NotYetImplemented("fiat withdrawal"));
        }
        if amount <= Decimal::ZERO {
            return Err(AnxError::Validation(
                "withdrawal amount must be positive".to_string(),
            ));
        }
        if address.trim().is_empty() {
            return Err(AnxError::Validation(
                "withdrawal address is required".to_string(),
            ));
        }
        self.client
            .send_coin(currency, amount, address, destination_tag)
            .await
    }

    pub async fn request_deposit_address(&self, currency: &str) -> Result<String> {
        if fee::is_fiat(currency) {
            return Err(AnxError::NotYetImplemented("fiat deposit address"));
        }
        self.client.receive_address(currency).await
    }

    /// Expected withdrawal fee; `None` when no schedule is published
    pub fn withdrawal_fee(&self, currency: &str, amount: Decimal) -> Option<Decimal> {
        if fee::is_fiat(currency) {
            fee::fiat_withdrawal_fee(currency, amount).map(|f| f.max(Decimal::ZERO))
        } else {
            fee::crypto_withdrawal_fee(currency)
        }
    }
}
