//! Integration tests for the full offsite payment flow.
//!
//! Drives authorize, confirm, customer extraction, and capture end to end
//! against a recording gateway double, checking what actually crosses the
//! gateway boundary.

use std::sync::{Arc, Mutex};

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
    client_id = "client-id"
    secret = "client-secret"
"#;

/// Gateway double that records every call and replays canned replies.
struct RecordingGateway {
    authorize_reply: Value,
    confirm_reply: Value,
    capture_reply: Value,
    calls: Mutex<Vec<(Phase, ChargeParams)>>,
}

impl RecordingGateway {
    fn new(authorize_reply: Value, confirm_reply: Value, capture_reply: Value) -> Arc<Self> {
        Arc::new(Self {
            authorize_reply,
            confirm_reply,
            capture_reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn record(&self, phase: Phase, params: &ChargeParams) {
        self.calls.lock().unwrap().push((phase, params.clone()));
    }

    fn calls(&self) -> Vec<(Phase, ChargeParams)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl GatewayApi for RecordingGateway {
    async fn authorize(&self, params: &ChargeParams) -> paypal_porter::Result<Value> {
        self.record(Phase::Authorize, params);
        Ok(self.authorize_reply.clone())
    }

    async fn confirm(&self, params: &ChargeParams) -> paypal_porter::Result<Value> {
        self.record(Phase::Confirm, params);
        Ok(self.confirm_reply.clone())
    }

    async fn capture(&self, params: &ChargeParams) -> paypal_porter::Result<Value> {
        self.record(Phase::Capture, params);
        Ok(self.capture_reply.clone())
    }
}

fn canadian_confirm_reply() -> Value {
    json!({
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
    })
}

fn porter_with(gateway: Arc<RecordingGateway>) -> Porter {
    let config = PorterConfig::from_toml(CONFIG).unwrap();
    Porter::with_gateway_api(config, gateway).unwrap()
}

#[tokio::test]
async fn test_full_offsite_flow() {
    let gateway = RecordingGateway::new(
        json!({"id": "PAY-1", "state": "created"}),
        canadian_confirm_reply(),
        json!({"id": "CAP-3", "state": "completed"}),
    );
    let porter = porter_with(Arc::clone(&gateway));
    let amount = Decimal::new(1999, 2);

    // Phase 1: authorize.
    let mut authorize = porter.authorize_controller("T1", amount, "USD").unwrap();
    assert_eq!(authorize.state(), SendState::Pending);
    let reference = {
        let response = authorize.send().await.unwrap();
        assert_eq!(response.phase(), Phase::Authorize);
        assert_eq!(response.amount(), amount);
        response.transaction_reference().unwrap().to_owned()
    };
    assert_eq!(reference, "PAY-1");
    assert_eq!(authorize.state(), SendState::Completed);

    // Phase 2: confirm with the authorize reference and the redirect payer id.
    let mut confirm = porter
        .confirm_controller("T1", amount, "USD", &reference, "PAYER-9")
        .unwrap();
    let confirm_reference = {
        let response = confirm.send().await.unwrap();
        assert_eq!(response.gateway_name(), "PayPal");
        response.transaction_reference().unwrap().to_owned()
    };

    // Customer identity comes from the confirm response.
    let customer = porter.offsite_customer(confirm.response().unwrap()).unwrap();
    assert_eq!(customer.first_name, "Avery");
    assert_eq!(customer.country_code, "CA");
    assert_eq!(customer.address_line2, None);
    assert_eq!(customer.phone, None);

    // Phase 3: capture against the confirm reference.
    let mut capture = porter
        .capture_controller("T1", amount, "USD", &confirm_reference)
        .unwrap();
    capture.send().await.unwrap();

    // What crossed the gateway boundary, in order.
    let calls = gateway.calls();
    assert_eq!(calls.len(), 3);

    let (phase, authorize_params) = &calls[0];
    assert_eq!(*phase, Phase::Authorize);
    assert_eq!(authorize_params.transaction_id, "T1");
    assert_eq!(authorize_params.amount, amount);
    assert_eq!(authorize_params.currency, "USD");
    assert_eq!(
        authorize_params.return_url.as_deref(),
        Some("https://shop.example.com/checkout/return")
    );

    let (phase, confirm_params) = &calls[1];
    assert_eq!(*phase, Phase::Confirm);
    assert_eq!(confirm_params.transaction_reference.as_deref(), Some("PAY-1"));
    assert_eq!(confirm_params.payer_id.as_deref(), Some("PAYER-9"));

    // The capture must pass the exact confirm reference through.
    let (phase, capture_params) = &calls[2];
    assert_eq!(*phase, Phase::Capture);
    assert_eq!(capture_params.transaction_reference.as_deref(), Some("PAY-EXEC-7"));
    assert_eq!(capture_params.payer_id, None);
}

#[tokio::test]
async fn test_customer_from_shipping_only_response() {
    let confirm_reply = json!({
        "id": "PAY-EXEC-8",
        "payer": {
            "payer_info": {
                "first_name": "Noa",
                "last_name": "Berg",
                "email": "noa@example.com",
                "shipping_address": {
                    "line1": "Kungsgatan 1",
                    "city": "Stockholm",
                    "state": "AB",
                    "postal_code": "111 43",
                    "country_code": "SE",
                },
            }
        }
    });
    let gateway = RecordingGateway::new(json!({"id": "PAY-2"}), confirm_reply, json!({}));
    let porter = porter_with(gateway);

    let mut confirm = porter
        .confirm_controller("T2", Decimal::new(4500, 2), "SEK", "PAY-2", "PAYER-1")
        .unwrap();
    confirm.send().await.unwrap();

    let customer = porter.offsite_customer(confirm.response().unwrap()).unwrap();
    assert_eq!(customer.address_line1, "Kungsgatan 1");
    assert_eq!(customer.city, "Stockholm");
    assert_eq!(customer.country_code, "SE");
}

#[tokio::test]
async fn test_customer_extraction_fails_without_payer_data() {
    let gateway = RecordingGateway::new(json!({"id": "PAY-3"}), json!({"id": "PAY-EXEC-9"}), json!({}));
    let porter = porter_with(gateway);

    let mut confirm = porter
        .confirm_controller("T3", Decimal::ONE, "USD", "PAY-3", "PAYER-1")
        .unwrap();
    confirm.send().await.unwrap();

    let err = porter
        .offsite_customer(confirm.response().unwrap())
        .unwrap_err();
    assert!(matches!(err, PorterError::MissingCustomerData(_)));
}

#[tokio::test]
async fn test_metadata_amount_survives_disagreeing_gateway_echo() {
    let gateway = RecordingGateway::new(
        json!({
            "id": "PAY-4",
            "transactions": [{"amount": {"total": "0.01", "currency": "USD"}}],
        }),
        json!({}),
        json!({}),
    );
    let porter = porter_with(gateway);

    let amount = Decimal::new(1999, 2);
    let mut authorize = porter.authorize_controller("T4", amount, "USD").unwrap();
    let response = authorize.send().await.unwrap();
    assert_eq!(response.amount(), amount);
}
