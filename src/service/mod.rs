//! Per-phase request and response services.
//!
//! A request service knows how to submit one phase's request entity through a
//! [`GatewayData`](crate::gateway::GatewayData) and produce the matching
//! response entity. A response service is pure construction: it wraps a raw
//! gateway payload into a [`ResponseData`](crate::entity::ResponseData)
//! without performing I/O. The confirm response service additionally owns
//! offsite-customer extraction.

mod authorize;
mod capture;
mod confirm;

use serde_json::Value;
use tracing::debug;

use crate::{
    entity::{Phase, RequestData},
    error::Result,
    gateway::GatewayData,
};

pub use authorize::{AuthorizeRequestService, AuthorizeResponseService};
pub use capture::{CaptureRequestService, CaptureResponseService};
pub use confirm::{ConfirmRequestService, ConfirmResponseService};

/// Submits a request entity through the gateway operation for its phase.
///
/// This is the shared send primitive every request service delegates to. No
/// retry happens here; a transport or gateway failure propagates to the
/// caller with phase context already attached by the gateway implementation.
pub(crate) async fn send_charge<R: RequestData>(
    gateway: &GatewayData,
    request: &R,
) -> Result<Value> {
    let params = request.charge_params();
    debug!(
        gateway = gateway.gateway_name(),
        phase = %request.phase(),
        transaction_id = %params.transaction_id,
        "dispatching gateway request"
    );
    match request.phase() {
        Phase::Authorize => gateway.api().authorize(&params).await,
        Phase::Confirm => gateway.api().confirm(&params).await,
        Phase::Capture => gateway.api().capture(&params).await,
    }
}
