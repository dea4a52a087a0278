//! Confirm-phase services, including offsite-customer extraction.

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    entity::{ConfirmRequestData, OffsiteCustomer, Phase, ResponseData, ResponseMetadata},
    error::{PorterError, Result},
    gateway::GatewayData,
    service::send_charge,
};

/// Submits confirm requests through a gateway.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfirmRequestService;

impl ConfirmRequestService {
    /// Sends a confirm request and wraps the gateway's reply.
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::GatewayRequest`] if the transport fails or the
    /// gateway rejects the request. No retry is performed at this layer.
    #[instrument(
        skip(self, gateway, request, response_service),
        fields(gateway = gateway.gateway_name(), transaction_id = request.transaction_id())
    )]
    pub async fn send(
        &self,
        gateway: &GatewayData,
        request: &ConfirmRequestData,
        response_service: &ConfirmResponseService,
    ) -> Result<ResponseData> {
        let raw = send_charge(gateway, request).await?;
        info!("confirm request completed");
        Ok(response_service.new_response_data(
            raw,
            gateway.gateway_name(),
            ResponseMetadata::new(request.amount()),
        ))
    }
}

/// Wraps raw confirm replies and extracts customer identity from them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfirmResponseService;

impl ConfirmResponseService {
    /// Creates the response entity for a raw confirm reply.
    #[must_use]
    pub fn new_response_data(
        &self,
        raw: Value,
        gateway_name: &str,
        metadata: ResponseMetadata,
    ) -> ResponseData {
        ResponseData::new(raw, gateway_name.to_owned(), Phase::Confirm, metadata)
    }

    /// Derives the offsite customer identity from a confirm response.
    ///
    /// Reads the `payer.payer_info` path of the raw payload. The billing
    /// address is preferred; when the gateway sent none, the shipping address
    /// is used instead. Resolution is eager, so a response that cannot yield
    /// a complete customer record fails as a whole rather than producing a
    /// partial one.
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::MissingCustomerData`] when the payload carries
    /// no payer information, no email, or neither address.
    pub fn offsite_customer(&self, response: &ResponseData) -> Result<OffsiteCustomer> {
        let payer_info = response
            .raw()
            .pointer("/payer/payer_info")
            .filter(|value| !value.is_null())
            .ok_or_else(|| {
                PorterError::MissingCustomerData(
                    "payer information absent from gateway response".to_owned(),
                )
            })?;

        let info: PayerInfo = serde_json::from_value(payer_info.clone()).map_err(|e| {
            PorterError::MissingCustomerData(format!("malformed payer information: {e}"))
        })?;

        let email = info
            .email
            .filter(|email| !email.is_empty())
            .ok_or_else(|| PorterError::MissingCustomerData("payer email absent".to_owned()))?;

        // Billing wins when both are present.
        let address = info
            .billing_address
            .or(info.shipping_address)
            .ok_or_else(|| PorterError::MissingCustomerData("payer address absent".to_owned()))?;

        Ok(OffsiteCustomer {
            first_name: info.first_name,
            last_name: info.last_name,
            email,
            address_line1: address.line1,
            address_line2: address.line2,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country_code: address.country_code,
            phone: None,
        })
    }
}

/// The `payer.payer_info` block of a confirm reply.
#[derive(Debug, Deserialize)]
struct PayerInfo {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    email: Option<String>,
    billing_address: Option<PayerAddress>,
    shipping_address: Option<PayerAddress>,
}

/// A billing or shipping address inside `payer_info`.
#[derive(Debug, Deserialize)]
struct PayerAddress {
    line1: String,
    line2: Option<String>,
    city: String,
    state: String,
    postal_code: String,
    country_code: String,
}
