//! Error handling example.
//!
//! Shows the three failure kinds a caller has to handle and what state a
//! controller is left in after a failed send.
//!
//! # Running this example
//!
//! ```bash
//! cargo run --example error_handling
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "examples are allowed to use println"
)]

use std::sync::Arc;

use paypal_porter::{
    ChargeParams, GatewayApi, Phase, Porter, PorterError, SendState, config::PorterConfig,
};
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

/// Stub gateway that rejects every request.
struct DecliningGateway;

fn declined(phase: Phase) -> PorterError {
    PorterError::GatewayRequest {
        phase,
        message: "gateway returned status 422: INSTRUMENT_DECLINED".to_owned(),
    }
}

#[async_trait::async_trait]
impl GatewayApi for DecliningGateway {
    async fn authorize(&self, _params: &ChargeParams) -> paypal_porter::Result<Value> {
        Err(declined(Phase::Authorize))
    }

    async fn confirm(&self, _params: &ChargeParams) -> paypal_porter::Result<Value> {
        Err(declined(Phase::Confirm))
    }

    async fn capture(&self, _params: &ChargeParams) -> paypal_porter::Result<Value> {
        Err(declined(Phase::Capture))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("PayPal Porter: Error Handling Example\n");

    // Configuration errors: an endpoint id with no credentials.
    println!("1. Requesting an unconfigured endpoint...");
    let porter = Porter::from_toml(CONFIG)?;
    match porter.gateway_data("backup") {
        Err(PorterError::Configuration(msg)) => println!("   ✗ Configuration error: {msg}"),
        other => println!("   unexpected outcome: {other:?}"),
    }

    // Gateway errors: the send fails and the controller stays pending.
    println!("\n2. Sending through a declining gateway...");
    let config = PorterConfig::from_toml(CONFIG)?;
    let porter = Porter::with_gateway_api(config, Arc::new(DecliningGateway))?;
    let mut authorize = porter.authorize_controller("T-1", Decimal::new(1999, 2), "USD")?;
    match authorize.send().await {
        Err(PorterError::GatewayRequest { phase, message }) => {
            println!("   ✗ {phase} failed: {message}");
        }
        other => println!("   unexpected outcome: {other:?}"),
    }
    assert_eq!(authorize.state(), SendState::Pending);
    println!("   controller is still pending; retry with a fresh controller");

    // Extraction errors: a confirm response without payer data.
    println!("\n3. Extracting a customer from an empty confirm response...");
    struct EmptyConfirmGateway;

    #[async_trait::async_trait]
    impl GatewayApi for EmptyConfirmGateway {
        async fn authorize(&self, _params: &ChargeParams) -> paypal_porter::Result<Value> {
            Ok(json!({"id": "PAY-1"}))
        }

        async fn confirm(&self, _params: &ChargeParams) -> paypal_porter::Result<Value> {
            Ok(json!({"id": "PAY-EXEC-1"}))
        }

        async fn capture(&self, _params: &ChargeParams) -> paypal_porter::Result<Value> {
            Ok(json!({}))
        }
    }

    let config = PorterConfig::from_toml(CONFIG)?;
    let porter = Porter::with_gateway_api(config, Arc::new(EmptyConfirmGateway))?;
    let mut confirm =
        porter.confirm_controller("T-1", Decimal::new(1999, 2), "USD", "PAY-1", "PAYER-9")?;
    confirm.send().await?;
    match porter.offsite_customer(confirm.response().expect("confirm completed")) {
        Err(PorterError::MissingCustomerData(msg)) => {
            println!("   ✗ Missing customer data: {msg}");
        }
        other => println!("   unexpected outcome: {other:?}"),
    }

    println!("\n✓ Example complete");
    Ok(())
}
