//! Quiz profile input.
//!
//! A [`UserProfile`] is supplied once per session by the upstream quiz. It is
//! not validated beyond what its types enforce: an unrecognised concern is
//! kept as [`Concern::Other`] and resolves to the default franchise.

use core::fmt;

use serde::{Deserialize, Serialize};
use skin_routine_core::{Tier, TimingPreference};

use crate::franchise::Franchise;

/// The customer's top skin concern, as answered in the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Concern {
    BreakoutsAcne,
    SensitivityRedness,
    DullnessUnevenTone,
    DarkSpotsHyperpigmentation,
    FineLinesWrinkles,
    LossOfFirmness,
    StressedSkin,
    DrynessDehydration,
    OilinessCloggedPores,
    MaintainHealthySkin,
    /// Any answer the quiz may add later. Kept verbatim.
    Other(String),
}

impl Concern {
    /// Every known concern, in quiz order.
    pub const KNOWN: [Self; 10] = [
        Self::BreakoutsAcne,
        Self::SensitivityRedness,
        Self::DullnessUnevenTone,
        Self::DarkSpotsHyperpigmentation,
        Self::FineLinesWrinkles,
        Self::LossOfFirmness,
        Self::StressedSkin,
        Self::DrynessDehydration,
        Self::OilinessCloggedPores,
        Self::MaintainHealthySkin,
    ];

    /// Parse a quiz answer. Never fails: unknown text becomes [`Concern::Other`].
    #[must_use]
    pub fn parse(answer: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|known| known.as_str() == answer)
            .unwrap_or_else(|| Self::Other(answer.to_string()))
    }

    /// The quiz answer text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::BreakoutsAcne => "Breakouts / acne",
            Self::SensitivityRedness => "Sensitivity / redness",
            Self::DullnessUnevenTone => "Dullness / uneven tone",
            Self::DarkSpotsHyperpigmentation => "Dark spots / hyperpigmentation",
            Self::FineLinesWrinkles => "Fine lines / wrinkles",
            Self::LossOfFirmness => "Loss of firmness / elasticity",
            Self::StressedSkin => "Stressed skin / environmental damage",
            Self::DrynessDehydration => "Dryness / dehydration",
            Self::OilinessCloggedPores => "Oiliness & clogged pores",
            Self::MaintainHealthySkin => "Just want to maintain healthy skin",
            Self::Other(answer) => answer,
        }
    }

    /// Goal statement shown in the skin analysis summary.
    #[must_use]
    pub const fn goal(&self) -> &'static str {
        match self {
            Self::BreakoutsAcne => "Control breakouts and prevent future blemishes",
            Self::SensitivityRedness => "Calm and soothe sensitive, reactive skin",
            Self::DullnessUnevenTone => "Brighten and even skin tone",
            Self::DarkSpotsHyperpigmentation => "Fade dark spots and even skin tone",
            Self::FineLinesWrinkles => "Reduce fine lines and wrinkles",
            Self::LossOfFirmness => "Restore firmness and elasticity",
            Self::StressedSkin => "Protect and repair from environmental damage",
            Self::DrynessDehydration => "Boost hydration levels",
            Self::OilinessCloggedPores => "Control excess oil and minimize pores",
            Self::MaintainHealthySkin => "Maintain healthy, balanced skin",
            Self::Other(_) => "Address your skin concerns",
        }
    }
}

impl From<String> for Concern {
    fn from(answer: String) -> Self {
        Self::parse(&answer)
    }
}

impl From<Concern> for String {
    fn from(concern: Concern) -> Self {
        concern.as_str().to_string()
    }
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quiz results for one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age in years.
    pub age: u32,
    /// Top skin concern.
    pub concern: Concern,
    /// Preferred routine tier.
    pub tier: Tier,
    /// When the customer wants to run the routine.
    pub timing: TimingPreference,
    /// Swap in sensitive-skin alternatives where the matrix defines one.
    #[serde(default)]
    pub sensitive: bool,
}

impl UserProfile {
    /// The franchise this profile's routine is built from.
    #[must_use]
    pub fn franchise(&self) -> Franchise {
        Franchise::select(&self.concern, self.age)
    }

    /// The same profile with a different tier.
    #[must_use]
    pub fn with_tier(&self, tier: Tier) -> Self {
        Self {
            tier,
            ..self.clone()
        }
    }

    /// The same profile with a different timing preference.
    #[must_use]
    pub fn with_timing(&self, timing: TimingPreference) -> Self {
        Self {
            timing,
            ..self.clone()
        }
    }
}
