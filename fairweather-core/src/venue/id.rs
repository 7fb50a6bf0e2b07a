//! Venue identifiers and tri-state opening status.

use serde::{Deserialize, Serialize};

/// Opaque, provider-assigned venue identifier.
///
/// Identifiers are unique within one request and compare as plain strings,
/// which the ranker relies on for deterministic tie-breaks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(String);

impl VenueId {
    /// Wrap a raw identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VenueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VenueId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for VenueId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Whether a venue is currently open.
///
/// Serialises as an optional boolean: `true`, `false` or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum OpenState {
    /// Confirmed open.
    Open,
    /// Confirmed closed.
    Closed,
    /// No opening information.
    #[default]
    Unknown,
}

impl From<Option<bool>> for OpenState {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Open,
            Some(false) => Self::Closed,
            None => Self::Unknown,
        }
    }
}

impl From<OpenState> for Option<bool> {
    fn from(value: OpenState) -> Self {
        match value {
            OpenState::Open => Some(true),
            OpenState::Closed => Some(false),
            OpenState::Unknown => None,
        }
    }
}
