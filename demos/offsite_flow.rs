//! Full offsite payment flow example.
//!
//! Walks through authorize, confirm, customer extraction, and capture using
//! an in-process stub gateway, so it runs offline. Swap the stub for the
//! built-in REST client by constructing the porter with `Porter::from_toml`
//! alone.
//!
//! # Running this example
//!
//! ```bash
//! cargo run --example offsite_flow
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "examples are allowed to use println"
)]

use std::sync::Arc;

use paypal_porter::{ChargeParams, GatewayApi, Porter, config::PorterConfig};
use rust_decimal::Decimal;
use serde_json::{Value, json};

const CONFIG: &str = r#"
    gateway_name = "PayPal"
    environment = "sandbox"

    [offsite_urls]
    return_url = "https://shop.example.com/checkout/return"
    cancel_url = "https://shop.example.com/checkout/cancel"

    [endpoints.default]
    client_id = "demo-client-id"
    secret = "demo-client-secret"
"#;

/// Stub gateway returning canned replies, standing in for the live API.
struct StubGateway;

#[async_trait::async_trait]
impl GatewayApi for StubGateway {
    async fn authorize(&self, params: &ChargeParams) -> paypal_porter::Result<Value> {
        println!("   gateway saw authorize for {} {}", params.amount, params.currency);
        Ok(json!({"id": "PAY-1", "state": "created"}))
    }

    async fn confirm(&self, params: &ChargeParams) -> paypal_porter::Result<Value> {
        println!(
            "   gateway saw confirm of {} by payer {}",
            params.transaction_reference.as_deref().unwrap_or("?"),
            params.payer_id.as_deref().unwrap_or("?"),
        );
        Ok(json!({
            "id": "PAY-EXEC-7",
            "state": "approved",
            "payer": {
                "payer_info": {
                    "first_name": "Avery",
                    "last_name": "Chen",
                    "email": "avery@example.com",
                    "billing_address": {
                        "line1": "100 Front St",
                        "city": "Toronto",
                        "state": "ON",
                        "postal_code": "M5J 1E3",
                        "country_code": "CA",
                    },
                }
            }
        }))
    }

    async fn capture(&self, params: &ChargeParams) -> paypal_porter::Result<Value> {
        println!(
            "   gateway saw capture of {}",
            params.transaction_reference.as_deref().unwrap_or("?"),
        );
        Ok(json!({"id": "CAP-3", "state": "completed"}))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("PayPal Porter: Offsite Flow Example\n");

    // Step 1: build the porter from configuration.
    println!("1. Building porter from TOML configuration...");
    let config = PorterConfig::from_toml(CONFIG)?;
    let porter = Porter::with_gateway_api(config, Arc::new(StubGateway))?;
    println!("   ✓ Porter ready for gateway '{}'", porter.config().gateway_name);

    let amount = Decimal::new(1999, 2);

    // Step 2: authorize.
    println!("\n2. Sending authorize request...");
    let mut authorize = porter.authorize_controller("T-1", amount, "USD")?;
    let reference = authorize
        .send()
        .await?
        .transaction_reference()
        .unwrap_or_default()
        .to_owned();
    println!("   ✓ Authorized, gateway reference: {reference}");
    println!("   (the customer now approves on the gateway's hosted page)");

    // Step 3: confirm with the payer id from the return redirect.
    println!("\n3. Sending confirm request...");
    let mut confirm = porter.confirm_controller("T-1", amount, "USD", &reference, "PAYER-9")?;
    confirm.send().await?;
    let confirmed = confirm.response().expect("confirm completed");
    let confirm_reference = confirmed.transaction_reference().unwrap_or_default().to_owned();
    println!("   ✓ Confirmed, gateway reference: {confirm_reference}");

    // Step 4: derive the customer identity.
    println!("\n4. Extracting offsite customer...");
    let customer = porter.offsite_customer(confirmed)?;
    println!("   ✓ {} {} <{}>", customer.first_name, customer.last_name, customer.email);
    println!(
        "     {}, {} {} {}",
        customer.address_line1, customer.city, customer.postal_code, customer.country_code
    );

    // Step 5: capture.
    println!("\n5. Sending capture request...");
    let mut capture = porter.capture_controller("T-1", amount, "USD", &confirm_reference)?;
    capture.send().await?;
    println!("   ✓ Captured {amount} USD");

    println!("\n✓ Example complete");
    Ok(())
}
