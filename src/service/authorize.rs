//! Authorize-phase services.

use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    entity::{AuthorizeRequestData, Phase, ResponseData, ResponseMetadata},
    error::Result,
    gateway::GatewayData,
    service::send_charge,
};

/// Submits authorize requests through a gateway.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizeRequestService;

impl AuthorizeRequestService {
    /// Sends an authorize request and wraps the gateway's reply.
    ///
    /// The response metadata carries the amount of the original request, not
    /// whatever the gateway echoes back.
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::GatewayRequest`](crate::error::PorterError::GatewayRequest)
    /// if the transport fails or the gateway rejects the request. No retry is
    /// performed at this layer.
    #[instrument(
        skip(self, gateway, request, response_service),
        fields(gateway = gateway.gateway_name(), transaction_id = request.transaction_id())
    )]
    pub async fn send(
        &self,
        gateway: &GatewayData,
        request: &AuthorizeRequestData,
        response_service: &AuthorizeResponseService,
    ) -> Result<ResponseData> {
        let raw = send_charge(gateway, request).await?;
        info!("authorize request completed");
        Ok(response_service.new_response_data(
            raw,
            gateway.gateway_name(),
            ResponseMetadata::new(request.amount()),
        ))
    }
}

/// Wraps raw authorize replies into response entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizeResponseService;

impl AuthorizeResponseService {
    /// Creates the response entity for a raw authorize reply.
    #[must_use]
    pub fn new_response_data(
        &self,
        raw: Value,
        gateway_name: &str,
        metadata: ResponseMetadata,
    ) -> ResponseData {
        ResponseData::new(raw, gateway_name.to_owned(), Phase::Authorize, metadata)
    }
}
