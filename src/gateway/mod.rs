//! Gateway API abstraction.
//!
//! The remote payment gateway sits behind the [`GatewayApi`] trait. The crate
//! ships one concrete implementation, [`RestGateway`], which talks to the
//! PayPal REST API; tests and alternative transports plug in their own.

mod rest;

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::{config::Environment, error::Result};

pub use rest::RestGateway;

/// Flat parameter set a request entity serializes into for sending.
///
/// Each phase fills the fields it needs; the optional fields stay `None` for
/// phases that do not carry them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeParams {
    /// Caller-assigned transaction id.
    pub transaction_id: String,
    /// Transaction amount. Non-negative.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Offsite return redirect URL (authorize and confirm).
    pub return_url: Option<String>,
    /// Offsite cancel redirect URL (authorize and confirm).
    pub cancel_url: Option<String>,
    /// Gateway reference from the previous phase (confirm and capture).
    pub transaction_reference: Option<String>,
    /// Payer id from the gateway's return redirect (confirm only).
    pub payer_id: Option<String>,
}

/// Operations a remote payment gateway must expose.
///
/// Implementations apply their credentials at construction and must be safe
/// to share across concurrent controllers. Each operation either returns the
/// gateway's raw response payload or a
/// [`PorterError::GatewayRequest`](crate::error::PorterError::GatewayRequest)
/// carrying the failed phase.
#[async_trait::async_trait]
pub trait GatewayApi: Send + Sync {
    /// Reserves funds and obtains the offsite approval redirect.
    async fn authorize(&self, params: &ChargeParams) -> Result<Value>;

    /// Completes an authorization after offsite approval.
    async fn confirm(&self, params: &ChargeParams) -> Result<Value>;

    /// Settles a confirmed authorization.
    async fn capture(&self, params: &ChargeParams) -> Result<Value>;
}

/// A configured gateway handle bound to one merchant account and environment.
///
/// Built once per endpoint id and shared read-only by every controller using
/// that endpoint. Holds no per-request state.
#[derive(Clone)]
pub struct GatewayData {
    api: Arc<dyn GatewayApi>,
    gateway_name: String,
    environment: Environment,
}

impl GatewayData {
    /// Binds a configured API client to a gateway name and environment.
    #[must_use]
    pub fn new(api: Arc<dyn GatewayApi>, gateway_name: String, environment: Environment) -> Self {
        Self { api, gateway_name, environment }
    }

    /// The configured API client.
    #[must_use]
    pub fn api(&self) -> &Arc<dyn GatewayApi> {
        &self.api
    }

    /// Display name of this gateway configuration.
    #[must_use]
    pub fn gateway_name(&self) -> &str {
        &self.gateway_name
    }

    /// The environment this handle is bound to.
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }
}

impl std::fmt::Debug for GatewayData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayData")
            .field("gateway_name", &self.gateway_name)
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}
