//! Single-use controllers, one per transaction phase.
//!
//! A controller binds one gateway handle, one request entity, and the phase's
//! request and response services into a single callable unit. It starts
//! pending, transitions to completed on a successful send, and holds the
//! resulting response for later retrieval.
//!
//! Calling `send` again after success is a no-op that returns the cached
//! response. A failed send surfaces its error and leaves the controller
//! pending; retry by constructing a new controller, not by resending this
//! one.

use std::sync::Arc;

use crate::{
    entity::{AuthorizeRequestData, CaptureRequestData, ConfirmRequestData, ResponseData},
    error::Result,
    gateway::GatewayData,
    service::{
        AuthorizeRequestService, AuthorizeResponseService, CaptureRequestService,
        CaptureResponseService, ConfirmRequestService, ConfirmResponseService,
    },
};

/// Lifecycle state of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    /// Constructed, not yet sent.
    Pending,
    /// Send succeeded; the response is available.
    Completed,
}

/// Controller for one authorize request.
#[derive(Debug)]
pub struct AuthorizeController {
    gateway: Arc<GatewayData>,
    request: AuthorizeRequestData,
    request_service: AuthorizeRequestService,
    response_service: AuthorizeResponseService,
    response: Option<ResponseData>,
}

impl AuthorizeController {
    /// Binds a gateway handle and a prepared request entity.
    #[must_use]
    pub fn new(gateway: Arc<GatewayData>, request: AuthorizeRequestData) -> Self {
        Self {
            gateway,
            request,
            request_service: AuthorizeRequestService,
            response_service: AuthorizeResponseService,
            response: None,
        }
    }

    /// Sends the authorize request once.
    ///
    /// On success the controller is completed and subsequent calls return the
    /// cached response without touching the gateway again. On failure the
    /// controller remains pending.
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::GatewayRequest`](crate::error::PorterError::GatewayRequest)
    /// when the transport fails or the gateway rejects the request.
    pub async fn send(&mut self) -> Result<&ResponseData> {
        if self.response.is_none() {
            let response = self
                .request_service
                .send(&self.gateway, &self.request, &self.response_service)
                .await?;
            self.response = Some(response);
        }
        Ok(self
            .response
            .as_ref()
            .expect("response is cached after a successful send"))
    }

    /// The controller's lifecycle state.
    #[must_use]
    pub fn state(&self) -> SendState {
        if self.response.is_some() { SendState::Completed } else { SendState::Pending }
    }

    /// The response, once the controller has completed.
    #[must_use]
    pub fn response(&self) -> Option<&ResponseData> {
        self.response.as_ref()
    }

    /// The request entity this controller was built with.
    #[must_use]
    pub fn request(&self) -> &AuthorizeRequestData {
        &self.request
    }
}

/// Controller for one confirm request.
///
/// Also the place to derive the offsite customer from, once completed, via
/// its response service.
#[derive(Debug)]
pub struct ConfirmController {
    gateway: Arc<GatewayData>,
    request: ConfirmRequestData,
    request_service: ConfirmRequestService,
    response_service: ConfirmResponseService,
    response: Option<ResponseData>,
}

impl ConfirmController {
    /// Binds a gateway handle and a prepared request entity.
    #[must_use]
    pub fn new(gateway: Arc<GatewayData>, request: ConfirmRequestData) -> Self {
        Self {
            gateway,
            request,
            request_service: ConfirmRequestService,
            response_service: ConfirmResponseService,
            response: None,
        }
    }

    /// Sends the confirm request once. See [`AuthorizeController::send`] for
    /// the send-twice and failure semantics, which are identical.
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::GatewayRequest`](crate::error::PorterError::GatewayRequest)
    /// when the transport fails or the gateway rejects the request.
    pub async fn send(&mut self) -> Result<&ResponseData> {
        if self.response.is_none() {
            let response = self
                .request_service
                .send(&self.gateway, &self.request, &self.response_service)
                .await?;
            self.response = Some(response);
        }
        Ok(self
            .response
            .as_ref()
            .expect("response is cached after a successful send"))
    }

    /// The controller's lifecycle state.
    #[must_use]
    pub fn state(&self) -> SendState {
        if self.response.is_some() { SendState::Completed } else { SendState::Pending }
    }

    /// The response, once the controller has completed.
    #[must_use]
    pub fn response(&self) -> Option<&ResponseData> {
        self.response.as_ref()
    }

    /// The request entity this controller was built with.
    #[must_use]
    pub fn request(&self) -> &ConfirmRequestData {
        &self.request
    }
}

/// Controller for one capture request.
#[derive(Debug)]
pub struct CaptureController {
    gateway: Arc<GatewayData>,
    request: CaptureRequestData,
    request_service: CaptureRequestService,
    response_service: CaptureResponseService,
    response: Option<ResponseData>,
}

impl CaptureController {
    /// Binds a gateway handle and a prepared request entity.
    #[must_use]
    pub fn new(gateway: Arc<GatewayData>, request: CaptureRequestData) -> Self {
        Self {
            gateway,
            request,
            request_service: CaptureRequestService,
            response_service: CaptureResponseService,
            response: None,
        }
    }

    /// Sends the capture request once. See [`AuthorizeController::send`] for
    /// the send-twice and failure semantics, which are identical.
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::GatewayRequest`](crate::error::PorterError::GatewayRequest)
    /// when the transport fails or the gateway rejects the request.
    pub async fn send(&mut self) -> Result<&ResponseData> {
        if self.response.is_none() {
            let response = self
                .request_service
                .send(&self.gateway, &self.request, &self.response_service)
                .await?;
            self.response = Some(response);
        }
        Ok(self
            .response
            .as_ref()
            .expect("response is cached after a successful send"))
    }

    /// The controller's lifecycle state.
    #[must_use]
    pub fn state(&self) -> SendState {
        if self.response.is_some() { SendState::Completed } else { SendState::Pending }
    }

    /// The response, once the controller has completed.
    #[must_use]
    pub fn response(&self) -> Option<&ResponseData> {
        self.response.as_ref()
    }

    /// The request entity this controller was built with.
    #[must_use]
    pub fn request(&self) -> &CaptureRequestData {
        &self.request
    }
}
