//! Well-known probe state codes.
//!
//! The cache stores whatever integer the prober hands it. `ProbeState` names
//! the conventional codes so producers don't pass magic numbers and so listings
//! can show a label instead of a bare integer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of probing a single port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeState {
    /// No service listening, RST received.
    Closed,
    /// Service listening.
    Open,
    /// No response, possibly dropped by a firewall.
    Filtered,
    /// Open or filtered (UDP-specific ambiguity).
    #[serde(rename = "open|filtered")]
    OpenFiltered,
}

impl ProbeState {
    /// The integer code stored in the cache.
    pub const fn code(self) -> i32 {
        match self {
            Self::Closed => 0,
            Self::Open => 1,
            Self::Filtered => 2,
            Self::OpenFiltered => 3,
        }
    }

    /// Interpret a stored code. Unknown codes return `None`.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Closed),
            1 => Some(Self::Open),
            2 => Some(Self::Filtered),
            3 => Some(Self::OpenFiltered),
            _ => None,
        }
    }

    /// Check if the state means a service may be reachable.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open | Self::OpenFiltered)
    }
}

impl From<ProbeState> for i32 {
    fn from(state: ProbeState) -> Self {
        state.code()
    }
}

impl fmt::Display for ProbeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Filtered => write!(f, "filtered"),
            Self::OpenFiltered => write!(f, "open|filtered"),
        }
    }
}

/// Human-readable label for a stored state code.
pub fn state_label(code: i32) -> String {
    match ProbeState::from_code(code) {
        Some(state) => state.to_string(),
        None => code.to_string(),
    }
}
