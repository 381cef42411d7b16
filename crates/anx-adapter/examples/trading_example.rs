/*
[INPUT]:  ANX_API_KEY / ANX_API_SECRET (base64) environment variables
[OUTPUT]: Account permissions, open orders, a placed and cancelled order
[POS]:    Examples - signed trading workflow
[UPDATE]: When trading or account operations change
*/

use anx_adapter::*;
use rust_decimal_macros::dec;

/// Example: signed trading workflow
///
/// Places a far-from-market limit buy and cancels it straight away.
#[tokio::main]
async fn main() {
    println!("=== ANX Trading Example ===\n");

    let (key, secret) = match (std::env::var("ANX_API_KEY"), std::env::var("ANX_API_SECRET")) {
        (Ok(k), Ok(s)) => (k, s),
        _ => {
            eprintln!("Set ANX_API_KEY and ANX_API_SECRET to run this example");
            return;
        }
    };

    let credentials = match Credentials::from_base64(key, &secret) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid credentials: {}", e);
            return;
        }
    };
    let client = match AnxClient::new() {
        Ok(c) => c.with_credentials(credentials),
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    let exchange = AnxExchange::new(client);

    match exchange.account().check_withdrawal_permission().await {
        Ok(allowed) => println!("✓ Withdrawal permission: {}", allowed),
        Err(e) => println!("✗ Error: {}", e),
    }

    match exchange.orders().list_snapshots(true).await {
        Ok(orders) => println!("✓ {} open orders", orders.len()),
        Err(e) => println!("✗ Error: {}", e),
    }

    let order = Order::limit_buy("BTC", "USD", dec!(0.001), dec!(1000));
    println!(
        "\nEstimated fee: {}",
        exchange.orders().estimate_trade_fee(dec!(0.001), dec!(1000), true)
    );

    let order_id = match exchange.orders().submit(&order).await {
        Ok(id) => {
            println!("✓ Order placed: {}", id);
            id
        }
        Err(e) => {
            println!("✗ Order rejected: {}", e);
            return;
        }
    };

    match exchange.orders().cancel(&[order_id.clone()]).await {
        Ok(failures) if failures.is_empty() => println!("✓ Order {} cancelled", order_id),
        Ok(failures) => println!("✗ Cancel failures: {:?}", failures),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Trading example complete");
}
