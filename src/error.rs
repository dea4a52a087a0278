//! Error types for the PayPal porter.
//!
//! This module defines all error types that can occur while orchestrating an
//! offsite payment. All errors implement the standard [`std::error::Error`]
//! trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Configuration errors** ([`PorterError::Configuration`]): no resolvable
//!   credentials or endpoint
//! - **Gateway errors** ([`PorterError::GatewayRequest`]): transport failures
//!   or gateway-side rejections during a send
//! - **Extraction errors** ([`PorterError::MissingCustomerData`]): a confirm
//!   response lacks required payer or address fields
//!
//! # Examples
//!
//! ```
//! use paypal_porter::error::{PorterError, Result};
//!
//! fn require_endpoint(id: &str) -> Result<()> {
//!     if id.is_empty() {
//!         return Err(PorterError::Configuration("endpoint id is empty".to_owned()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::entity::Phase;

/// Result type alias for porter operations.
///
/// This is a convenience type that uses [`PorterError`] as the error type.
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, PorterError>;

/// Errors that can occur while orchestrating an offsite payment.
///
/// Every failure propagates synchronously to the immediate caller; nothing is
/// logged and swallowed internally. A send either fully succeeds, producing a
/// response entity, or fully fails, leaving its controller pending.
///
/// # Error Recovery
///
/// - [`Configuration`](Self::Configuration): fatal to the requested
///   operation, not retryable. Fix the porter configuration.
/// - [`GatewayRequest`](Self::GatewayRequest): not retried internally. A
///   caller may retry by constructing a new controller; retry policy is a
///   transport-layer concern.
/// - [`MissingCustomerData`](Self::MissingCustomerData): the gateway response
///   cannot be defaulted into a customer record. Inspect the raw response.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum PorterError {
    /// No resolvable credentials or gateway endpoint.
    ///
    /// Returned when a controller builder cannot resolve the requested
    /// endpoint id, when configuration validation fails, or when the
    /// underlying HTTP client cannot be constructed.
    #[error("gateway configuration error: {0}")]
    Configuration(String),

    /// Transport failure or gateway-side rejection during a send.
    ///
    /// Carries the phase that was being sent so callers can tell an
    /// authorize failure from a capture failure without parsing the message.
    #[error("{phase} request failed: {message}")]
    GatewayRequest {
        /// The phase whose send failed.
        phase: Phase,
        /// Diagnostic detail from the transport or the gateway.
        message: String,
    },

    /// A confirm-phase response lacks required payer or address fields.
    ///
    /// Both a missing email and a missing address map to this kind; the
    /// message distinguishes them.
    #[error("offsite customer information missing: {0}")]
    MissingCustomerData(String),
}

impl PorterError {
    /// Builds a [`PorterError::GatewayRequest`] with phase context.
    pub(crate) fn gateway(phase: Phase, message: impl std::fmt::Display) -> Self {
        Self::GatewayRequest { phase, message: message.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_display() {
        let error = PorterError::Configuration("no endpoint 'backup'".to_owned());
        assert_eq!(error.to_string(), "gateway configuration error: no endpoint 'backup'");
    }

    #[test]
    fn test_gateway_request_display_includes_phase() {
        let error = PorterError::gateway(Phase::Authorize, "connection refused");
        assert_eq!(error.to_string(), "authorize request failed: connection refused");
    }

    #[test]
    fn test_gateway_request_display_capture() {
        let error = PorterError::gateway(Phase::Capture, "422 Unprocessable Entity");
        assert!(error.to_string().starts_with("capture request failed"));
    }

    #[test]
    fn test_missing_customer_data_display() {
        let error = PorterError::MissingCustomerData("payer email absent".to_owned());
        assert_eq!(
            error.to_string(),
            "offsite customer information missing: payer email absent"
        );
    }
}
