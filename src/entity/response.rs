//! Response entities wrapping raw gateway replies.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::entity::Phase;

/// Typed metadata attached to a [`ResponseData`].
///
/// The amount is always present and always equals the amount of the
/// originating request; the gateway's echoed amount is not treated as
/// authoritative. Per-phase extras go into the string map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMetadata {
    amount: Decimal,
    extra: BTreeMap<String, String>,
}

impl ResponseMetadata {
    /// Creates metadata carrying the originating request's amount.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self { amount, extra: BTreeMap::new() }
    }

    /// The amount of the originating request.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Adds a phase-specific metadata entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.extra.insert(key.into(), value.into());
    }

    /// Looks up a phase-specific metadata entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }
}

/// The outcome of one sent request.
///
/// Wraps the gateway's raw reply together with the context downstream
/// consumers need: which gateway configuration produced it, which phase was
/// performed, and the typed [`ResponseMetadata`]. A response entity is
/// created exactly once per send, by the matching response service, and is
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct ResponseData {
    raw: Value,
    gateway_name: String,
    phase: Phase,
    metadata: ResponseMetadata,
}

impl ResponseData {
    /// Wraps a raw gateway reply. Only response services construct this.
    pub(crate) fn new(
        raw: Value,
        gateway_name: String,
        phase: Phase,
        metadata: ResponseMetadata,
    ) -> Self {
        Self { raw, gateway_name, phase, metadata }
    }

    /// The gateway's raw reply, read-only.
    ///
    /// This is the one untyped surface of the crate; everything else consumes
    /// the typed accessors.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The gateway configuration that produced this response.
    #[must_use]
    pub fn gateway_name(&self) -> &str {
        &self.gateway_name
    }

    /// The phase that was performed.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The typed metadata for this response.
    #[must_use]
    pub fn metadata(&self) -> &ResponseMetadata {
        &self.metadata
    }

    /// Shortcut for the originating request's amount.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.metadata.amount()
    }

    /// The gateway-assigned reference of this response, if any.
    ///
    /// This is the `id` the gateway returns for a created or executed
    /// payment. Feed it into the next phase as its transaction reference.
    #[must_use]
    pub fn transaction_reference(&self) -> Option<&str> {
        self.raw.get("id").and_then(Value::as_str)
    }
}
