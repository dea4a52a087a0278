//! Domain entities for the offsite payment lifecycle.
//!
//! One phase of a transaction flows through three entity kinds: a request
//! entity carrying the caller's parameters, a response entity wrapping the
//! gateway's raw reply, and, after a completed confirm, a derived
//! [`OffsiteCustomer`] record.

mod customer;
mod phase;
mod request;
mod response;

pub use customer::OffsiteCustomer;
pub use phase::Phase;
pub use request::{
    AuthorizeRequestData, CaptureRequestData, ConfirmRequestData, OffsiteUrls, RequestData,
};
pub use response::{ResponseData, ResponseMetadata};
