//! Customer-facing summary of the quiz answers.

use serde::Serialize;
use skin_routine_core::{Tier, TimingPreference};

use crate::franchise::Franchise;
use crate::profile::UserProfile;

/// Age bracket shown in the skin analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgeBand {
    #[serde(rename = "Under 18")]
    Under18,
    #[serde(rename = "18–24")]
    From18To24,
    #[serde(rename = "25–34")]
    From25To34,
    #[serde(rename = "35–44")]
    From35To44,
    #[serde(rename = "45–54")]
    From45To54,
    #[serde(rename = "55+")]
    Over55,
}

impl AgeBand {
    #[must_use]
    pub const fn for_age(age: u32) -> Self {
        match age {
            0..18 => Self::Under18,
            18..=24 => Self::From18To24,
            25..=34 => Self::From25To34,
            35..=44 => Self::From35To44,
            45..=54 => Self::From45To54,
            _ => Self::Over55,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under18 => "Under 18",
            Self::From18To24 => "18–24",
            Self::From25To34 => "25–34",
            Self::From35To44 => "35–44",
            Self::From45To54 => "45–54",
            Self::Over55 => "55+",
        }
    }
}

/// The "your skin analysis" panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkinAnalysis {
    pub age: AgeBand,
    pub concern: String,
    pub timing: &'static str,
    pub preference: &'static str,
    pub sensitivity: &'static str,
    pub franchise: &'static str,
    pub goal: &'static str,
}

impl SkinAnalysis {
    #[must_use]
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            age: AgeBand::for_age(profile.age),
            concern: profile.concern.to_string(),
            timing: timing_description(profile.timing),
            preference: tier_description(profile.tier),
            sensitivity: sensitivity_description(profile.sensitive),
            franchise: Franchise::select(&profile.concern, profile.age).display_name(),
            goal: profile.concern.goal(),
        }
    }

    /// Label/value rows in display order.
    #[must_use]
    pub fn rows(&self) -> [(&'static str, &str); 7] {
        [
            ("Age", self.age.label()),
            ("Top Skin Concern", &self.concern),
            ("Routine Timing", self.timing),
            ("Routine Preference", self.preference),
            ("Skin Sensitivity", self.sensitivity),
            ("Recommended Collection", self.franchise),
            ("Your Goal", self.goal),
        ]
    }
}

const fn timing_description(timing: TimingPreference) -> &'static str {
    match timing {
        TimingPreference::AM => "Mostly in the morning",
        TimingPreference::PM => "Mostly at night",
        TimingPreference::Both => "Morning and night",
    }
}

const fn tier_description(tier: Tier) -> &'static str {
    match tier {
        Tier::Essential => "I want a simple routine that's easy to stick to",
        Tier::Enhanced => "I'm comfortable with a few extra steps if they make a difference",
        Tier::Comprehensive => "I enjoy a full routine and want the most advanced results",
    }
}

const fn sensitivity_description(sensitive: bool) -> &'static str {
    if sensitive {
        "Very sensitive / easily irritated"
    } else {
        "Rarely sensitive"
    }
}
