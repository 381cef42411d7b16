/*
[INPUT]:  Signed account queries and withdrawal parameters
[OUTPUT]: Account rights and wallets, withdrawal ids, deposit addresses
[POS]:    HTTP layer - account endpoints (require Rest-Key + Rest-Sign)
[UPDATE]: When adding new account endpoints or changing query parameters
*/

use rust_decimal::Decimal;
use serde_json::json;

use crate::http::{AnxClient, Result};
use crate::types::{
    AccountInfo, AccountResponse, ReceiveAddressRequest, ReceiveAddressResponse, SendCoinRequest,
    SendCoinResponse, Wallet,
};

impl AnxClient {
    /// Query account rights and wallet balances
    ///
    /// POST /api/{version}/account
    pub async fn account_info(&self) -> Result<AccountInfo> {
        let envelope = self
            .post_signed::<_, AccountResponse>("account", &json!({}))
            .await?;
        let account = envelope.payload;

        Ok(AccountInfo {
            rights: account.rights.into_iter().collect(),
            wallets: account
                .wallets
                .into_iter()
                .map(|(currency, wallet)| {
                    (
                        currency.to_ascii_uppercase(),
                        Wallet {
                            available: wallet.available,
                            total: wallet.balance,
                        },
                    )
                })
                .collect(),
        })
    }

    /// Withdraw crypto currency to an external address
    ///
    /// POST /api/{version}/send
    pub async fn send_coin(
        &self,
        currency: &str,
        amount: Decimal,
        address: &str,
        destination_tag: Option<&str>,
    ) -> Result<String> {
        let req = SendCoinRequest {
            ccy: currency.to_ascii_uppercase(),
            amount,
            address: address.to_string(),
            destination_tag: destination_tag.map(str::to_string),
        };
        let envelope = self.post_signed::<_, SendCoinResponse>("send", &req).await?;
        Ok(envelope.payload.transaction_id)
    }

    /// Request a deposit address for a currency
    ///
    /// POST /api/{version}/receive
    pub async fn receive_address(&self, currency: &str) -> Result<String> {
        let req = ReceiveAddressRequest {
            ccy: currency.to_ascii_uppercase(),
        };
        let envelope = self
            .post_signed::<_, ReceiveAddressResponse>("receive", &req)
            .await?;
        Ok(envelope.payload.address)
    }
}
