//! Optional runtime capabilities, probed once at startup.
//!
//! A capability is either a usable handle or the reason it could not be
//! obtained. Consumers match on it instead of discovering absence through a
//! failed call.

use serde::Serialize;

#[derive(Clone)]
pub enum Capability<T> {
    Available(T),
    Unavailable(String),
}

/// Serializable view of a capability for `/health` and startup logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CapabilityStatus {
    Available,
    Unavailable { reason: String },
}

impl<T> Capability<T> {
    pub fn status(&self) -> CapabilityStatus {
        match self {
            Capability::Available(_) => CapabilityStatus::Available,
            Capability::Unavailable(reason) => CapabilityStatus::Unavailable {
                reason: reason.clone(),
            },
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }
}

impl std::fmt::Display for CapabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapabilityStatus::Available => write!(f, "available"),
            CapabilityStatus::Unavailable { reason } => write!(f, "unavailable ({reason})"),
        }
    }
}
