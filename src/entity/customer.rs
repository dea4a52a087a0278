//! Offsite customer identity derived from a confirm response.

/// Customer identity returned by the gateway after offsite approval.
///
/// Derived only from a confirm-phase [`ResponseData`](crate::entity::ResponseData)
/// and never persisted by this crate. `address_line2` is `None` when the
/// gateway sent no second line, which is distinct from an empty second line.
/// `phone` is always `None` on this extraction path; the payload examined
/// here does not carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsiteCustomer {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address the customer used with the gateway.
    pub email: String,
    /// First address line.
    pub address_line1: String,
    /// Second address line, if the gateway sent one.
    pub address_line2: Option<String>,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Postal code.
    pub postal_code: String,
    /// Country code (ISO 3166-1 alpha-2).
    pub country_code: String,
    /// Phone number. Never populated by this extraction path.
    pub phone: Option<String>,
}
