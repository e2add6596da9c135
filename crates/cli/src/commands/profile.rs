//! Quiz profile arguments shared by every routine command.
//!
//! A profile can come from a YAML or JSON file (`--profile`), from flags, or
//! both; flags override file values.
//!
//! ```yaml
//! age: 31
//! concern: Dullness / uneven tone
//! tier: Essential
//! timing: AM/PM
//! sensitive: false
//! ```

use std::path::PathBuf;

use clap::Args;
use serde::Deserialize;
use skin_routine_core::{Tier, TimingPreference};
use skin_routine_engine::{Concern, UserProfile};

use super::{CliError, read_file};

#[derive(Debug, Default, Args)]
pub struct ProfileArgs {
    /// Profile file (YAML or JSON)
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Age in years
    #[arg(long)]
    pub age: Option<u32>,

    /// Top skin concern, as the quiz phrases it
    #[arg(long)]
    pub concern: Option<String>,

    /// Routine tier [default: Essential]
    #[arg(long)]
    pub tier: Option<Tier>,

    /// AM, PM or Both [default: Both]
    #[arg(long)]
    pub timing: Option<TimingPreference>,

    /// Use sensitive-skin alternatives
    #[arg(long)]
    pub sensitive: bool,
}

/// Profile file contents. Every field is optional so flags can fill gaps.
#[derive(Debug, Default, Deserialize)]
pub struct PartialProfile {
    pub age: Option<u32>,
    pub concern: Option<Concern>,
    pub tier: Option<Tier>,
    pub timing: Option<TimingPreference>,
    #[serde(default)]
    pub sensitive: Option<bool>,
}

impl PartialProfile {
    /// Parse YAML (JSON is accepted too, being a YAML subset).
    pub fn parse(content: &str) -> Result<Self, CliError> {
        serde_yaml::from_str(content).map_err(|e| CliError::Invalid {
            what: "profile",
            message: e.to_string(),
        })
    }
}

impl ProfileArgs {
    /// Build the profile from the file (if any) and flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if age or
    /// concern is missing from both.
    pub fn load(&self) -> Result<UserProfile, CliError> {
        let file = match &self.profile {
            Some(path) => PartialProfile::parse(&read_file(path)?)?,
            None => PartialProfile::default(),
        };
        self.merge(file)
    }

    /// Overlay flags on a file profile.
    ///
    /// # Errors
    ///
    /// Returns `MissingProfileField` if age or concern is absent.
    pub fn merge(&self, file: PartialProfile) -> Result<UserProfile, CliError> {
        let age = self
            .age
            .or(file.age)
            .ok_or(CliError::MissingProfileField("age"))?;
        let concern = self
            .concern
            .as_deref()
            .map(Concern::parse)
            .or(file.concern)
            .ok_or(CliError::MissingProfileField("concern"))?;

        Ok(UserProfile {
            age,
            concern,
            tier: self.tier.or(file.tier).unwrap_or(Tier::Essential),
            timing: self
                .timing
                .or(file.timing)
                .unwrap_or(TimingPreference::Both),
            sensitive: self.sensitive || file.sensitive.unwrap_or(false),
        })
    }
}
