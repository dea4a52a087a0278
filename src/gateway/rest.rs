//! REST implementation of the gateway API.
//!
//! This is the boundary where the gateway's untyped response is first
//! received. Requests go to the PayPal REST payment endpoints; responses come
//! back as raw JSON for the response services to wrap.

use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, instrument};
use url::Url;

use crate::{
    config::{Environment, GatewayCredentials},
    entity::Phase,
    error::{PorterError, Result},
    gateway::{ChargeParams, GatewayApi},
};

/// Gateway API client for the PayPal REST endpoints.
///
/// Credentials are applied at construction; the client can be shared across
/// concurrent controllers. Timeouts bound every call, so a hung gateway
/// surfaces as a [`PorterError::GatewayRequest`] rather than blocking the
/// caller indefinitely.
pub struct RestGateway {
    client: Client,
    base_url: Url,
    credentials: GatewayCredentials,
}

impl RestGateway {
    /// Creates a client for the given environment and credentials.
    ///
    /// Configuration:
    /// - Connection timeout: 10 seconds
    /// - Total timeout: 30 seconds
    /// - Connection pool: max 10 idle connections per host
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::Configuration`] if the HTTP client cannot be
    /// built.
    pub fn new(environment: Environment, credentials: GatewayCredentials) -> Result<Self> {
        let base_url = Url::parse(environment.base_url())
            .map_err(|e| PorterError::Configuration(format!("invalid gateway base URL: {e}")))?;

        let client = Client::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| PorterError::Configuration(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { client, base_url, credentials })
    }

    /// Body for an authorize call, in the gateway's payment-create shape.
    fn authorize_body(params: &ChargeParams) -> Result<Value> {
        let (Some(return_url), Some(cancel_url)) = (&params.return_url, &params.cancel_url) else {
            return Err(PorterError::gateway(
                Phase::Authorize,
                "missing offsite redirect URLs",
            ));
        };

        Ok(json!({
            "intent": "authorize",
            "payer": { "payment_method": "paypal" },
            "redirect_urls": {
                "return_url": return_url,
                "cancel_url": cancel_url,
            },
            "transactions": [{
                "amount": {
                    "total": format_amount(params),
                    "currency": params.currency,
                },
                "custom": params.transaction_id,
            }],
        }))
    }

    /// Path and body for a confirm call against a prior authorization.
    fn confirm_parts(params: &ChargeParams) -> Result<(String, Value)> {
        let reference = require_reference(Phase::Confirm, params)?;
        let Some(payer_id) = &params.payer_id else {
            return Err(PorterError::gateway(Phase::Confirm, "missing payer id"));
        };
        let path = format!("/v1/payments/payment/{reference}/execute");
        Ok((path, json!({ "payer_id": payer_id })))
    }

    /// Path and body for a capture call against a confirmed authorization.
    fn capture_parts(params: &ChargeParams) -> Result<(String, Value)> {
        let reference = require_reference(Phase::Capture, params)?;
        let path = format!("/v1/payments/authorization/{reference}/capture");
        let body = json!({
            "amount": {
                "total": format_amount(params),
                "currency": params.currency,
            },
            "is_final_capture": true,
        });
        Ok((path, body))
    }

    /// Posts a body to the gateway and returns the parsed response payload.
    #[instrument(skip(self, body))]
    async fn post(&self, phase: Phase, path: &str, body: Value) -> Result<Value> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| PorterError::gateway(phase, format!("invalid endpoint path: {e}")))?;

        debug!("posting gateway request");

        let response = self
            .client
            .post(url)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| PorterError::gateway(phase, e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(PorterError::gateway(
                phase,
                format!("gateway returned status {status}: {detail}"),
            ));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| PorterError::gateway(phase, format!("malformed gateway response: {e}")))
    }
}

impl std::fmt::Debug for RestGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestGateway")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl GatewayApi for RestGateway {
    async fn authorize(&self, params: &ChargeParams) -> Result<Value> {
        let body = Self::authorize_body(params)?;
        self.post(Phase::Authorize, "/v1/payments/payment", body).await
    }

    async fn confirm(&self, params: &ChargeParams) -> Result<Value> {
        let (path, body) = Self::confirm_parts(params)?;
        self.post(Phase::Confirm, &path, body).await
    }

    async fn capture(&self, params: &ChargeParams) -> Result<Value> {
        let (path, body) = Self::capture_parts(params)?;
        self.post(Phase::Capture, &path, body).await
    }
}

/// Renders an amount the way the gateway expects it, two decimal places.
fn format_amount(params: &ChargeParams) -> String {
    format!("{:.2}", params.amount)
}

fn require_reference<'a>(phase: Phase, params: &'a ChargeParams) -> Result<&'a str> {
    params
        .transaction_reference
        .as_deref()
        .ok_or_else(|| PorterError::gateway(phase, "missing gateway reference"))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn params(amount: Decimal) -> ChargeParams {
        ChargeParams {
            transaction_id: "T-1".to_owned(),
            amount,
            currency: "USD".to_owned(),
            return_url: Some("https://shop.example.com/return".to_owned()),
            cancel_url: Some("https://shop.example.com/cancel".to_owned()),
            transaction_reference: Some("PAY-1".to_owned()),
            payer_id: Some("PAYER-9".to_owned()),
        }
    }

    #[test]
    fn test_authorize_body_shape() {
        let body = RestGateway::authorize_body(&params(Decimal::new(1999, 2))).unwrap();
        assert_eq!(body["intent"], "authorize");
        assert_eq!(body["redirect_urls"]["return_url"], "https://shop.example.com/return");
        assert_eq!(body["transactions"][0]["amount"]["total"], "19.99");
        assert_eq!(body["transactions"][0]["amount"]["currency"], "USD");
        assert_eq!(body["transactions"][0]["custom"], "T-1");
    }

    #[test]
    fn test_authorize_body_requires_redirect_urls() {
        let mut p = params(Decimal::ONE);
        p.return_url = None;
        let err = RestGateway::authorize_body(&p).unwrap_err();
        assert!(matches!(
            err,
            PorterError::GatewayRequest { phase: Phase::Authorize, .. }
        ));
    }

    #[test]
    fn test_confirm_parts_use_reference_and_payer() {
        let (path, body) = RestGateway::confirm_parts(&params(Decimal::ONE)).unwrap();
        assert_eq!(path, "/v1/payments/payment/PAY-1/execute");
        assert_eq!(body["payer_id"], "PAYER-9");
    }

    #[test]
    fn test_confirm_parts_require_payer_id() {
        let mut p = params(Decimal::ONE);
        p.payer_id = None;
        let err = RestGateway::confirm_parts(&p).unwrap_err();
        assert!(err.to_string().contains("missing payer id"));
    }

    #[test]
    fn test_capture_parts_use_reference() {
        let (path, body) = RestGateway::capture_parts(&params(Decimal::new(2000, 2))).unwrap();
        assert_eq!(path, "/v1/payments/authorization/PAY-1/capture");
        assert_eq!(body["amount"]["total"], "20.00");
        assert_eq!(body["is_final_capture"], true);
    }

    #[test]
    fn test_capture_parts_require_reference() {
        let mut p = params(Decimal::ONE);
        p.transaction_reference = None;
        let err = RestGateway::capture_parts(&p).unwrap_err();
        assert!(matches!(
            err,
            PorterError::GatewayRequest { phase: Phase::Capture, .. }
        ));
    }

    #[test]
    fn test_amount_is_rendered_with_two_decimals() {
        assert_eq!(format_amount(&params(Decimal::new(5, 0))), "5.00");
        assert_eq!(format_amount(&params(Decimal::new(1999, 2))), "19.99");
    }

    #[test]
    fn test_client_construction() {
        let gateway = RestGateway::new(
            Environment::Sandbox,
            GatewayCredentials {
                client_id: "id".to_owned(),
                secret: "secret".to_owned(),
            },
        );
        assert!(gateway.is_ok());
    }
}
