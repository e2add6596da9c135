//! Franchise selection.
//!
//! Every concern maps to exactly one product line. Acne splits on age, and
//! anything unrecognised falls back to Daily Skin Health, so selection is
//! total.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::profile::Concern;

/// Customers younger than this with acne get Clear Start; older get Active Clearing.
pub const CLEAR_START_MAX_AGE_EXCLUSIVE: u32 = 24;

/// A named product line tied to a skin concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Franchise {
    #[serde(rename = "Daily Skin Health")]
    DailySkinHealth,
    #[serde(rename = "Clear Start")]
    ClearStart,
    #[serde(rename = "Active Clearing")]
    ActiveClearing,
    #[serde(rename = "UltraCalming")]
    UltraCalming,
    #[serde(rename = "BioLumin-C")]
    BioLuminC,
    #[serde(rename = "PowerBright")]
    PowerBright,
    #[serde(rename = "Dynamic Skin")]
    DynamicSkin,
    #[serde(rename = "Phyto-Nature", alias = "Phyto Nature")]
    PhytoNature,
    #[serde(rename = "MultiVitamin Power")]
    MultiVitaminPower,
}

impl Franchise {
    /// The fallback for concerns without a dedicated line.
    pub const DEFAULT: Self = Self::DailySkinHealth;

    pub const ALL: [Self; 9] = [
        Self::DailySkinHealth,
        Self::ClearStart,
        Self::ActiveClearing,
        Self::UltraCalming,
        Self::BioLuminC,
        Self::PowerBright,
        Self::DynamicSkin,
        Self::PhytoNature,
        Self::MultiVitaminPower,
    ];

    /// Pick the franchise for a concern. Age only matters for acne.
    #[must_use]
    pub const fn select(concern: &Concern, age: u32) -> Self {
        match concern {
            Concern::BreakoutsAcne if age < CLEAR_START_MAX_AGE_EXCLUSIVE => Self::ClearStart,
            Concern::BreakoutsAcne => Self::ActiveClearing,
            Concern::SensitivityRedness => Self::UltraCalming,
            Concern::DullnessUnevenTone => Self::BioLuminC,
            Concern::DarkSpotsHyperpigmentation => Self::PowerBright,
            Concern::FineLinesWrinkles => Self::DynamicSkin,
            Concern::LossOfFirmness => Self::PhytoNature,
            Concern::StressedSkin => Self::MultiVitaminPower,
            Concern::DrynessDehydration
            | Concern::OilinessCloggedPores
            | Concern::MaintainHealthySkin
            | Concern::Other(_) => Self::DEFAULT,
        }
    }

    /// Name as keyed in the routine matrix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DailySkinHealth => "Daily Skin Health",
            Self::ClearStart => "Clear Start",
            Self::ActiveClearing => "Active Clearing",
            Self::UltraCalming => "UltraCalming",
            Self::BioLuminC => "BioLumin-C",
            Self::PowerBright => "PowerBright",
            Self::DynamicSkin => "Dynamic Skin",
            Self::PhytoNature => "Phyto-Nature",
            Self::MultiVitaminPower => "MultiVitamin Power",
        }
    }

    /// Customer-facing name. Differs from [`Franchise::as_str`] only for Phyto Nature.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::PhytoNature => "Phyto Nature",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Franchise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_acne_splits_on_age() {
        assert_eq!(Franchise::select(&Concern::BreakoutsAcne, 17), Franchise::ClearStart);
        assert_eq!(Franchise::select(&Concern::BreakoutsAcne, 23), Franchise::ClearStart);
        assert_eq!(Franchise::select(&Concern::BreakoutsAcne, 24), Franchise::ActiveClearing);
        assert_eq!(Franchise::select(&Concern::BreakoutsAcne, 50), Franchise::ActiveClearing);
    }

    #[test]
    fn test_dedicated_franchises() {
        let cases = [
            (Concern::SensitivityRedness, Franchise::UltraCalming),
            (Concern::DullnessUnevenTone, Franchise::BioLuminC),
            (Concern::DarkSpotsHyperpigmentation, Franchise::PowerBright),
            (Concern::FineLinesWrinkles, Franchise::DynamicSkin),
            (Concern::LossOfFirmness, Franchise::PhytoNature),
            (Concern::StressedSkin, Franchise::MultiVitaminPower),
        ];
        for (concern, expected) in cases {
            assert_eq!(Franchise::select(&concern, 30), expected, "{concern}");
        }
    }

    #[test]
    fn test_fallback_is_total() {
        for concern in [
            Concern::DrynessDehydration,
            Concern::OilinessCloggedPores,
            Concern::MaintainHealthySkin,
            Concern::parse("unknown"),
            Concern::parse(""),
        ] {
            assert_eq!(Franchise::select(&concern, 30), Franchise::DailySkinHealth);
        }
    }

    #[test]
    fn test_serde_matches_matrix_names() {
        for franchise in Franchise::ALL {
            let json = serde_json::to_string(&franchise).unwrap();
            assert_eq!(json, format!("\"{}\"", franchise.as_str()));
        }
        let alias: Franchise = serde_json::from_str("\"Phyto Nature\"").unwrap();
        assert_eq!(alias, Franchise::PhytoNature);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Franchise::PhytoNature.to_string(), "Phyto Nature");
        assert_eq!(Franchise::BioLuminC.to_string(), "BioLumin-C");
    }
}
