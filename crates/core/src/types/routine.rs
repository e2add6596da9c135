//! Routine tier and timing enums.
//!
//! These mirror the values the quiz produces and the routine matrix is keyed
//! by, so they serialize to the exact strings used in the dataset
//! (`"Essential"`, `"AM"`, `"Both"`, ...).

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Routine complexity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Essential,
    Enhanced,
    Comprehensive,
}

impl Tier {
    /// All tiers, in upgrade order.
    pub const ALL: [Self; 3] = [Self::Essential, Self::Enhanced, Self::Comprehensive];

    /// The tier a customer upgrades to from this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Essential => Some(Self::Enhanced),
            Self::Enhanced => Some(Self::Comprehensive),
            Self::Comprehensive => None,
        }
    }

    /// Number of steps a single-timing routine of this tier should contain.
    #[must_use]
    pub const fn expected_step_count(self) -> usize {
        match self {
            Self::Essential => 3,
            Self::Enhanced => 5,
            Self::Comprehensive => 7,
        }
    }

    /// Position in [`Tier::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Essential => 0,
            Self::Enhanced => 1,
            Self::Comprehensive => 2,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Essential => "Essential",
            Self::Enhanced => "Enhanced",
            Self::Comprehensive => "Comprehensive",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a tier or timing string is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseRoutineEnumError {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl FromStr for Tier {
    type Err = ParseRoutineEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "essential" => Ok(Self::Essential),
            "enhanced" => Ok(Self::Enhanced),
            "comprehensive" => Ok(Self::Comprehensive),
            _ => Err(ParseRoutineEnumError {
                kind: "tier",
                value: s.to_string(),
            }),
        }
    }
}

/// The daily slot a routine step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timing {
    AM,
    PM,
}

impl Timing {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AM => "AM",
            Self::PM => "PM",
        }
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timing {
    type Err = ParseRoutineEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Self::AM),
            "PM" => Ok(Self::PM),
            _ => Err(ParseRoutineEnumError {
                kind: "timing",
                value: s.to_string(),
            }),
        }
    }
}

/// When the customer wants to run their routine, as answered in the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimingPreference {
    AM,
    PM,
    /// Morning and night. The quiz also emits `"AM/PM"` for this answer.
    #[serde(alias = "AM/PM")]
    Both,
}

impl TimingPreference {
    /// The single timing this preference restricts to, or `None` for `Both`.
    #[must_use]
    pub const fn only(self) -> Option<Timing> {
        match self {
            Self::AM => Some(Timing::AM),
            Self::PM => Some(Timing::PM),
            Self::Both => None,
        }
    }

    /// Returns `true` if a step with `timing` is included by this preference.
    #[must_use]
    pub fn includes(self, timing: Timing) -> bool {
        self.only().is_none_or(|only| only == timing)
    }

    /// The timing shown first when the results page opens: `Both` starts on AM.
    #[must_use]
    pub fn initial_display(self) -> Timing {
        self.only().unwrap_or(Timing::AM)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AM => "AM",
            Self::PM => "PM",
            Self::Both => "Both",
        }
    }
}

impl fmt::Display for TimingPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Timing> for TimingPreference {
    fn from(timing: Timing) -> Self {
        match timing {
            Timing::AM => Self::AM,
            Timing::PM => Self::PM,
        }
    }
}

impl FromStr for TimingPreference {
    type Err = ParseRoutineEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Self::AM),
            "PM" => Ok(Self::PM),
            "BOTH" | "AM/PM" => Ok(Self::Both),
            _ => Err(ParseRoutineEnumError {
                kind: "timing preference",
                value: s.to_string(),
            }),
        }
    }
}
