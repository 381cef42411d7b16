/*
[INPUT]:  Fee kind, amount, price, maker/taker flag, currency
[OUTPUT]: Non-negative fee amount
[POS]:    Pricing layer - exchange fee schedule (pure, no I/O)
[UPDATE]: When the exchange publishes a new fee or withdrawal schedule
*/

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::FeeKind;

pub const MAKER_FEE_RATE: Decimal = dec!(0.01);
pub const TAKER_FEE_RATE: Decimal = dec!(0.02);
/// Worst-case rate used when the maker/taker tier is unknown
pub const OFFLINE_FEE_RATE: Decimal = dec!(0.002);
/// Flat part of the fiat withdrawal fee
pub const FIAT_WITHDRAWAL_BASE_FEE: Decimal = dec!(250);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRequest {
    pub kind: FeeKind,
    pub amount: Decimal,
    pub price: Decimal,
    pub is_maker: bool,
    pub currency: String,
}

impl FeeRequest {
    pub fn trade(amount: Decimal, price: Decimal, is_maker: bool) -> Self {
        Self {
            kind: FeeKind::Trade,
            amount,
            price,
            is_maker,
            currency: String::new(),
        }
    }

    pub fn offline_trade(amount: Decimal, price: Decimal) -> Self {
        Self {
            kind: FeeKind::OfflineTrade,
            amount,
            price,
            is_maker: false,
            currency: String::new(),
        }
    }

    pub fn crypto_withdrawal(currency: &str, amount: Decimal) -> Self {
        Self {
            kind: FeeKind::CryptoWithdrawal,
            amount,
            price: Decimal::ZERO,
            is_maker: false,
            currency: currency.to_string(),
        }
    }

    pub fn fiat_withdrawal(currency: &str, amount: Decimal) -> Self {
        Self {
            kind: FeeKind::FiatWithdrawal,
            amount,
            price: Decimal::ZERO,
            is_maker: false,
            currency: currency.to_string(),
        }
    }
}

/// Fee for a request. Total: never fails, never negative.
pub fn compute_fee(req: &FeeRequest) -> Decimal {
    let fee = match req.kind {
        FeeKind::Trade => {
            let rate = if req.is_maker {
                MAKER_FEE_RATE
            } else {
                TAKER_FEE_RATE
            };
            saturating_product(&[rate, req.amount, req.price])
        }
        FeeKind::CryptoWithdrawal => crypto_withdrawal_fee(&req.currency).unwrap_or(Decimal::ZERO),
        FeeKind::FiatWithdrawal => {
            fiat_withdrawal_fee(&req.currency, req.amount).unwrap_or(Decimal::ZERO)
        }
        FeeKind::OfflineTrade => saturating_product(&[OFFLINE_FEE_RATE, req.amount, req.price]),
    };
    fee.max(Decimal::ZERO)
}

/// Product of `factors`, saturating at `Decimal::MAX` / `Decimal::MIN`.
/// Pass the rate first.
fn saturating_product(factors: &[Decimal]) -> Decimal {
    let mut product = Decimal::ONE;
    for factor in factors {
        match product.checked_mul(*factor) {
            Some(next) => product = next,
            None => return saturate(factors),
        }
    }
    product
}

fn saturate(factors: &[Decimal]) -> Decimal {
    let negatives = factors.iter().filter(|f| f.is_sign_negative() && !f.is_zero()).count();
    if negatives % 2 == 0 {
        Decimal::MAX
    } else {
        Decimal::MIN
    }
}

/// Fixed network fee per crypto currency; `None` for unlisted currencies
pub fn crypto_withdrawal_fee(currency: &str) -> Option<Decimal> {
    match currency.to_ascii_uppercase().as_str() {
        "BTC" => Some(dec!(0.0002)),
        "LTC" => Some(dec!(0.02)),
        "ETH" => Some(dec!(0.01)),
        "DOGE" => Some(dec!(5)),
        _ => None,
    }
}

/// Percentage part of the fiat withdrawal fee
fn fiat_withdrawal_rate(currency: &str) -> Option<Decimal> {
    match currency.to_ascii_uppercase().as_str() {
        "HKD" => Some(dec!(0.005)),
        _ => None,
    }
}

/// `250 + rate * amount` for currencies with a published schedule.
///
/// `None` flags a fiat currency the exchange has no schedule for; callers
/// must not treat that as a free withdrawal. `compute_fee` reports it as
/// zero so it stays total.
pub fn fiat_withdrawal_fee(currency: &str, amount: Decimal) -> Option<Decimal> {
    fiat_withdrawal_rate(currency).map(|rate| {
        let variable = saturating_product(&[rate, amount]);
        FIAT_WITHDRAWAL_BASE_FEE
            .checked_add(variable)
            .unwrap_or(Decimal::MAX)
    })
}

/// ISO 4217 codes of fiat currencies the withdrawal endpoints treat as non-crypto
const FIAT_CURRENCIES: &[&str] = &[
    "AED", "ARS", "AUD", "BRL", "CAD", "CHF", "CLP", "CNH", "CNY", "CZK", "DKK", "EUR", "GBP",
    "HKD", "HUF", "IDR", "ILS", "INR", "JPY", "KRW", "MOP", "MXN", "MYR", "NOK", "NZD", "PHP",
    "PLN", "RUB", "SAR", "SEK", "SGD", "THB", "TRY", "TWD", "USD", "VND", "ZAR",
];

pub fn is_fiat(currency: &str) -> bool {
    let code = currency.trim().to_ascii_uppercase();
    FIAT_CURRENCIES.contains(&code.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(dec!(1000), dec!(1000), true, dec!(10000))]
    #[case(dec!(1000), dec!(1000), false, dec!(20000))]
    #[case(dec!(0.5), dec!(20000), true, dec!(100))]
    #[case(dec!(1), dec!(-1000), false, Decimal::ZERO)]
    #[case(dec!(-3), dec!(1000), true, Decimal::ZERO)]
    #[case(dec!(10000000000000000), dec!(10000000000000000), false, Decimal::MAX)]
    #[case(dec!(-10000000000000000), dec!(10000000000000000), true, Decimal::ZERO)]
    #[case(Decimal::MAX, Decimal::MAX, true, Decimal::MAX)]
    fn test_trade_fee_by_tier(
        #[case] amount: Decimal,
        #[case] price: Decimal,
        #[case] is_maker: bool,
        #[case] expected: Decimal,
    ) {
        assert_eq!(compute_fee(&FeeRequest::trade(amount, price, is_maker)), expected);
    }

    #[rstest]
    #[case(dec!(2), dec!(3))]
    #[case(dec!(123.456), dec!(0.789))]
    #[case(dec!(0), dec!(99))]
    fn test_trade_fee_matches_formula(#[case] amount: Decimal, #[case] price: Decimal) {
        assert_eq!(
            compute_fee(&FeeRequest::trade(amount, price, true)),
            dec!(0.01) * amount * price
        );
        assert_eq!(
            compute_fee(&FeeRequest::trade(amount, price, false)),
            dec!(0.02) * amount * price
        );
    }

    #[test]
    fn test_fiat_withdrawal_hkd() {
        let fee = compute_fee(&FeeRequest::fiat_withdrawal("HKD", dec!(1)));
        assert_eq!(fee, dec!(250) + dec!(0.005) * dec!(1));
        assert_eq!(fiat_withdrawal_fee("hkd", dec!(10000)), Some(dec!(300)));
    }

    #[test]
    fn test_fiat_withdrawal_without_schedule_is_flagged() {
        assert_eq!(fiat_withdrawal_fee("USD", dec!(100)), None);
        assert_eq!(
            compute_fee(&FeeRequest::fiat_withdrawal("USD", dec!(100))),
            Decimal::ZERO
        );
    }

    #[rstest]
    #[case("BTC", dec!(0.0002))]
    #[case("ltc", dec!(0.02))]
    #[case("XYZ", Decimal::ZERO)]
    fn test_crypto_withdrawal_table(#[case] currency: &str, #[case] expected: Decimal) {
        assert_eq!(
            compute_fee(&FeeRequest::crypto_withdrawal(currency, dec!(10))),
            expected
        );
    }

    #[test]
    fn test_offline_estimate() {
        assert_eq!(
            compute_fee(&FeeRequest::offline_trade(dec!(2), dec!(1000))),
            dec!(4)
        );
    }

    #[rstest]
    fn test_fee_never_negative(
        #[values(FeeKind::Trade, FeeKind::CryptoWithdrawal, FeeKind::FiatWithdrawal, FeeKind::OfflineTrade)]
        kind: FeeKind,
        #[values(Decimal::MIN, dec!(-1000000), dec!(-1), dec!(0), dec!(1), dec!(1000000), Decimal::MAX)]
        amount: Decimal,
        #[values(Decimal::MIN, dec!(-5000), dec!(0), dec!(5000), Decimal::MAX)] price: Decimal,
        #[values(true, false)] is_maker: bool,
    ) {
        let req = FeeRequest {
            kind,
            amount,
            price,
            is_maker,
            currency: "HKD".to_string(),
        };
        assert!(compute_fee(&req) >= Decimal::ZERO);
    }

    #[test]
    fn test_large_notional_within_range_after_rate() {
        // 1e15 * 1e14 alone overflows; the rate keeps the fee representable
        let fee = compute_fee(&FeeRequest::trade(
            dec!(1000000000000000),
            dec!(100000000000000),
            false,
        ));
        assert_eq!(fee, dec!(2000000000000000000000000000));
    }

    #[test]
    fn test_fiat_withdrawal_extreme_amounts() {
        let fee = fiat_withdrawal_fee("HKD", Decimal::MAX).expect("HKD has a schedule");
        assert!(fee > FIAT_WITHDRAWAL_BASE_FEE);
        assert_eq!(
            compute_fee(&FeeRequest::fiat_withdrawal("HKD", Decimal::MIN)),
            Decimal::ZERO
        );
    }

    #[rstest]
    #[case("hkd", true)]
    #[case("CNY", true)]
    #[case(" twd ", true)]
    #[case("BTC", false)]
    #[case("XRP", false)]
    fn test_fiat_detection(#[case] currency: &str, #[case] expected: bool) {
        assert_eq!(is_fiat(currency), expected);
    }
}
