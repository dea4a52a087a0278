//! PayPal Porter: Offsite Payment Orchestration
//!
//! A Rust library that drives the three phases of an offsite PayPal payment,
//! authorize, confirm, and capture, translating internal transaction
//! parameters into gateway requests and gateway responses back into typed
//! domain entities.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │     Caller       │  builds a Porter from configuration
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────────────────────────────────────┐
//! │              Porter (this crate)                 │
//! │  ┌─────────────┐   ┌────────────┐   ┌─────────┐  │
//! │  │ Controllers │───│  Services  │───│ Entities│  │
//! │  │ (one/phase) │   │ (send/wrap)│   │ (req/res│  │
//! │  └──────┬──────┘   └────────────┘   │ /cust.) │  │
//! │         │                           └─────────┘  │
//! └─────────┼────────────────────────────────────────┘
//!           │ GatewayApi trait
//! ┌─────────▼────────┐
//! │  Payment gateway │  RestGateway over HTTPS, or any
//! │  (PayPal REST)   │  caller-supplied implementation
//! └──────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use paypal_porter::Porter;
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> paypal_porter::Result<()> {
//! let porter = Porter::from_toml(r#"
//!     gateway_name = "PayPal"
//!     environment = "sandbox"
//!
//!     [offsite_urls]
//!     return_url = "https://shop.example.com/checkout/return"
//!     cancel_url = "https://shop.example.com/checkout/cancel"
//!
//!     [endpoints.default]
//!     client_id = "client-id"
//!     secret = "client-secret"
//! "#)?;
//!
//! // Phase 1: authorize. The customer approves on the gateway's hosted page.
//! let mut authorize = porter.authorize_controller("T-1", Decimal::new(1999, 2), "USD")?;
//! let reference = authorize
//!     .send()
//!     .await?
//!     .transaction_reference()
//!     .unwrap_or_default()
//!     .to_owned();
//!
//! // Phase 2: confirm, once the redirect comes back with a payer id.
//! let mut confirm =
//!     porter.confirm_controller("T-1", Decimal::new(1999, 2), "USD", &reference, "PAYER-9")?;
//! let confirmed = confirm.send().await?.clone();
//! let customer = porter.offsite_customer(&confirmed)?;
//! println!("payer country: {}", customer.country_code);
//!
//! // Phase 3: capture the confirmed authorization.
//! let confirm_reference = confirmed.transaction_reference().unwrap_or_default().to_owned();
//! let mut capture =
//!     porter.capture_controller("T-1", Decimal::new(1999, 2), "USD", &confirm_reference)?;
//! capture.send().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`porter`]: the caller-constructed facade and endpoint cache
//! - [`controller`]: single-use per-phase controllers (pending to completed)
//! - [`service`]: per-phase request submission and response wrapping
//! - [`entity`]: request, response, and customer entities plus [`entity::Phase`]
//! - [`gateway`]: the [`gateway::GatewayApi`] trait and the REST client
//! - [`config`]: TOML configuration with validation
//! - [`error`]: error types with recovery guidance
//!
//! # Concurrency
//!
//! Each send is one blocking round trip to the gateway from the controller's
//! point of view; a controller is settled only when its send returns.
//! Independent controllers may run concurrently, and a cached
//! [`gateway::GatewayData`] may be shared across them, provided the
//! underlying API client tolerates concurrent use. The crate performs no
//! internal locking, queuing, or cancellation; wrap the send call externally
//! for timeouts.
//!
//! # Error Handling
//!
//! All operations return [`Result<T, PorterError>`](error::Result). Failures
//! propagate synchronously to the caller; there is no partial success. See
//! [`error::PorterError`] for the taxonomy and per-kind recovery notes.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod controller;
pub mod entity;
pub mod error;
pub mod gateway;
pub mod porter;
pub mod service;

pub use config::{Environment, GatewayCredentials, PorterConfig};
pub use controller::{AuthorizeController, CaptureController, ConfirmController, SendState};
pub use entity::{OffsiteCustomer, Phase, ResponseData};
pub use error::{PorterError, Result};
pub use gateway::{ChargeParams, GatewayApi, GatewayData, RestGateway};
pub use porter::{DEFAULT_ENDPOINT_ID, Porter};
