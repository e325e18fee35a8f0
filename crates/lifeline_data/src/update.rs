use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A discrete unit of simulated time.
///
/// `Immediate` marks a refresh that happens outside the normal tick, when a
/// recorder asks for a first reading as soon as it attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Update {
    Tick(u64),
    Immediate,
}

impl Update {
    /// Whether this update happened outside the regular tick.
    pub fn is_immediate(&self) -> bool {
        matches!(self, Update::Immediate)
    }

    /// Tick number, if this is a regular update.
    pub fn tick(&self) -> Option<u64> {
        match self {
            Update::Tick(t) => Some(*t),
            Update::Immediate => None,
        }
    }
}

impl From<u64> for Update {
    fn from(tick: u64) -> Self {
        Update::Tick(tick)
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Update::Tick(t) => write!(f, "{t}"),
            Update::Immediate => f.write_str("-1"),
        }
    }
}

impl FromStr for Update {
    type Err = std::num::ParseIntError;

    /// Accepts a tick number or `-1` for an immediate update.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "-1" {
            return Ok(Update::Immediate);
        }
        s.parse().map(Update::Tick)
    }
}
