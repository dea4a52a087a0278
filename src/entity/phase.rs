//! Transaction phases.

use serde::{Deserialize, Serialize};

/// One of the three sequential steps of an offsite payment transaction.
///
/// An offsite flow always runs authorize, then confirm (once the customer
/// approves on the gateway's hosted page), then capture. Each phase carries
/// the gateway-assigned reference of the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Reserve funds and obtain the offsite approval redirect.
    Authorize,
    /// Complete the authorization after the customer approved offsite.
    Confirm,
    /// Settle a previously confirmed authorization.
    Capture,
}

impl Phase {
    /// Returns the stable wire name of this phase.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authorize => "authorize",
            Self::Confirm => "confirm",
            Self::Capture => "capture",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
