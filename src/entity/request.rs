//! Request entities, one per transaction phase.
//!
//! A request entity holds the parameters of one phase of a transaction. Its
//! phase is fixed at construction; the scalar fields are set through explicit
//! setters before the entity is handed to a controller. Once sent, a request
//! entity is not reused, which the single-use controllers enforce by owning
//! their request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    entity::Phase,
    gateway::ChargeParams,
};

/// Offsite redirect URLs for the gateway's hosted approval page.
///
/// The gateway sends the customer back to `return_url` after approval and to
/// `cancel_url` if they abandon the flow. Both are opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsiteUrls {
    /// Where the gateway redirects after the customer approves.
    pub return_url: String,
    /// Where the gateway redirects if the customer cancels.
    pub cancel_url: String,
}

/// Capability shared by the per-phase request entities.
///
/// A request entity knows which phase it belongs to and how to serialize
/// itself into the flat parameter set the gateway API accepts.
pub trait RequestData {
    /// The phase this request belongs to.
    fn phase(&self) -> Phase;

    /// Serializes this request into gateway charge parameters.
    fn charge_params(&self) -> ChargeParams;
}

/// Parameters for an authorize-phase request.
///
/// Amounts must be non-negative; the setters store what they are given and
/// the caller is responsible for supplying a valid amount.
#[derive(Debug, Clone)]
pub struct AuthorizeRequestData {
    offsite_urls: OffsiteUrls,
    transaction_id: String,
    amount: Decimal,
    currency: String,
}

impl AuthorizeRequestData {
    /// Creates an authorize request bound to the given redirect URLs.
    ///
    /// The transaction id, amount, and currency must be set before the
    /// request is handed to a controller.
    #[must_use]
    pub fn new(offsite_urls: OffsiteUrls) -> Self {
        Self {
            offsite_urls,
            transaction_id: String::new(),
            amount: Decimal::ZERO,
            currency: String::new(),
        }
    }

    /// Sets the caller-assigned transaction id.
    pub fn set_transaction_id(&mut self, transaction_id: impl Into<String>) {
        self.transaction_id = transaction_id.into();
    }

    /// Sets the amount to authorize. Must be non-negative.
    pub fn set_amount(&mut self, amount: Decimal) {
        self.amount = amount;
    }

    /// Sets the ISO 4217 currency code.
    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.currency = currency.into();
    }

    /// The caller-assigned transaction id.
    #[must_use]
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// The amount to authorize.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The ISO 4217 currency code.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// The offsite redirect URLs.
    #[must_use]
    pub fn offsite_urls(&self) -> &OffsiteUrls {
        &self.offsite_urls
    }
}

impl RequestData for AuthorizeRequestData {
    fn phase(&self) -> Phase {
        Phase::Authorize
    }

    fn charge_params(&self) -> ChargeParams {
        ChargeParams {
            transaction_id: self.transaction_id.clone(),
            amount: self.amount,
            currency: self.currency.clone(),
            return_url: Some(self.offsite_urls.return_url.clone()),
            cancel_url: Some(self.offsite_urls.cancel_url.clone()),
            transaction_reference: None,
            payer_id: None,
        }
    }
}

/// Parameters for a confirm-phase request.
///
/// In addition to the authorize fields, a confirm carries the gateway
/// reference returned by the prior authorize response and the payer id the
/// gateway appended to the return redirect.
#[derive(Debug, Clone)]
pub struct ConfirmRequestData {
    offsite_urls: OffsiteUrls,
    transaction_id: String,
    amount: Decimal,
    currency: String,
    transaction_reference: String,
    payer_id: String,
}

impl ConfirmRequestData {
    /// Creates a confirm request bound to the given redirect URLs.
    #[must_use]
    pub fn new(offsite_urls: OffsiteUrls) -> Self {
        Self {
            offsite_urls,
            transaction_id: String::new(),
            amount: Decimal::ZERO,
            currency: String::new(),
            transaction_reference: String::new(),
            payer_id: String::new(),
        }
    }

    /// Sets the caller-assigned transaction id.
    pub fn set_transaction_id(&mut self, transaction_id: impl Into<String>) {
        self.transaction_id = transaction_id.into();
    }

    /// Sets the amount to confirm. Must be non-negative.
    pub fn set_amount(&mut self, amount: Decimal) {
        self.amount = amount;
    }

    /// Sets the ISO 4217 currency code.
    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.currency = currency.into();
    }

    /// Sets the gateway reference returned by the authorize response.
    pub fn set_transaction_reference(&mut self, reference: impl Into<String>) {
        self.transaction_reference = reference.into();
    }

    /// Sets the payer id from the gateway's return redirect.
    pub fn set_payer_id(&mut self, payer_id: impl Into<String>) {
        self.payer_id = payer_id.into();
    }

    /// The caller-assigned transaction id.
    #[must_use]
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// The amount to confirm.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The ISO 4217 currency code.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// The gateway reference from the prior authorize response.
    #[must_use]
    pub fn transaction_reference(&self) -> &str {
        &self.transaction_reference
    }

    /// The payer id from the gateway's return redirect.
    #[must_use]
    pub fn payer_id(&self) -> &str {
        &self.payer_id
    }

    /// The offsite redirect URLs.
    #[must_use]
    pub fn offsite_urls(&self) -> &OffsiteUrls {
        &self.offsite_urls
    }
}

impl RequestData for ConfirmRequestData {
    fn phase(&self) -> Phase {
        Phase::Confirm
    }

    fn charge_params(&self) -> ChargeParams {
        ChargeParams {
            transaction_id: self.transaction_id.clone(),
            amount: self.amount,
            currency: self.currency.clone(),
            return_url: Some(self.offsite_urls.return_url.clone()),
            cancel_url: Some(self.offsite_urls.cancel_url.clone()),
            transaction_reference: Some(self.transaction_reference.clone()),
            payer_id: Some(self.payer_id.clone()),
        }
    }
}

/// Parameters for a capture-phase request.
///
/// A capture settles a confirmed authorization, so it carries the gateway
/// reference from the confirm response and no payer id. The customer is no
/// longer involved, so no redirect URLs are serialized.
#[derive(Debug, Clone)]
pub struct CaptureRequestData {
    transaction_id: String,
    amount: Decimal,
    currency: String,
    transaction_reference: String,
}

impl CaptureRequestData {
    /// Creates an empty capture request.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transaction_id: String::new(),
            amount: Decimal::ZERO,
            currency: String::new(),
            transaction_reference: String::new(),
        }
    }

    /// Sets the caller-assigned transaction id.
    pub fn set_transaction_id(&mut self, transaction_id: impl Into<String>) {
        self.transaction_id = transaction_id.into();
    }

    /// Sets the amount to capture. Must be non-negative.
    pub fn set_amount(&mut self, amount: Decimal) {
        self.amount = amount;
    }

    /// Sets the ISO 4217 currency code.
    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.currency = currency.into();
    }

    /// Sets the gateway reference returned by the confirm response.
    pub fn set_transaction_reference(&mut self, reference: impl Into<String>) {
        self.transaction_reference = reference.into();
    }

    /// The caller-assigned transaction id.
    #[must_use]
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// The amount to capture.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The ISO 4217 currency code.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// The gateway reference from the prior confirm response.
    #[must_use]
    pub fn transaction_reference(&self) -> &str {
        &self.transaction_reference
    }
}

impl Default for CaptureRequestData {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestData for CaptureRequestData {
    fn phase(&self) -> Phase {
        Phase::Capture
    }

    fn charge_params(&self) -> ChargeParams {
        ChargeParams {
            transaction_id: self.transaction_id.clone(),
            amount: self.amount,
            currency: self.currency.clone(),
            return_url: None,
            cancel_url: None,
            transaction_reference: Some(self.transaction_reference.clone()),
            payer_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> OffsiteUrls {
        OffsiteUrls {
            return_url: "https://shop.example.com/checkout/return".to_owned(),
            cancel_url: "https://shop.example.com/checkout/cancel".to_owned(),
        }
    }

    #[test]
    fn test_authorize_setters_store_verbatim() {
        let mut request = AuthorizeRequestData::new(urls());
        request.set_transaction_id("T-100");
        request.set_amount(Decimal::new(1999, 2));
        request.set_currency("USD");

        assert_eq!(request.transaction_id(), "T-100");
        assert_eq!(request.amount(), Decimal::new(1999, 2));
        assert_eq!(request.currency(), "USD");
        assert_eq!(request.phase(), Phase::Authorize);
    }

    #[test]
    fn test_authorize_charge_params_carry_redirect_urls() {
        let mut request = AuthorizeRequestData::new(urls());
        request.set_transaction_id("T-100");
        request.set_amount(Decimal::new(500, 2));
        request.set_currency("EUR");

        let params = request.charge_params();
        assert_eq!(
            params.return_url.as_deref(),
            Some("https://shop.example.com/checkout/return")
        );
        assert_eq!(
            params.cancel_url.as_deref(),
            Some("https://shop.example.com/checkout/cancel")
        );
        assert_eq!(params.transaction_reference, None);
        assert_eq!(params.payer_id, None);
    }

    #[test]
    fn test_confirm_charge_params_carry_reference_and_payer() {
        let mut request = ConfirmRequestData::new(urls());
        request.set_transaction_id("T-200");
        request.set_amount(Decimal::new(1999, 2));
        request.set_currency("USD");
        request.set_transaction_reference("PAY-1");
        request.set_payer_id("PAYER-9");

        let params = request.charge_params();
        assert_eq!(params.transaction_reference.as_deref(), Some("PAY-1"));
        assert_eq!(params.payer_id.as_deref(), Some("PAYER-9"));
        assert_eq!(request.phase(), Phase::Confirm);
    }

    #[test]
    fn test_capture_charge_params_omit_offsite_fields() {
        let mut request = CaptureRequestData::new();
        request.set_transaction_id("T-300");
        request.set_amount(Decimal::new(1999, 2));
        request.set_currency("USD");
        request.set_transaction_reference("PAY-CONFIRMED-4");

        let params = request.charge_params();
        assert_eq!(params.return_url, None);
        assert_eq!(params.cancel_url, None);
        assert_eq!(params.payer_id, None);
        assert_eq!(params.transaction_reference.as_deref(), Some("PAY-CONFIRMED-4"));
        assert_eq!(request.phase(), Phase::Capture);
    }
}
