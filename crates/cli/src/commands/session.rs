//! Session commands: replay a cart script, save results, check out.
//!
//! A session script is YAML:
//!
//! ```yaml
//! profile:            # optional when profile flags are given
//!   age: 28
//!   concern: Dullness / uneven tone
//!   tier: Essential
//!   timing: AM/PM
//! events:
//!   - action: add
//!     product: precleanse-cleansing-oil
//!   - action: select_size
//!     product: daily-glycolic-cleanser
//!     size: 1.7 oz
//!   - action: add
//!     product: daily-glycolic-cleanser
//!   - action: timing
//!     timing: PM
//!   - action: add_all
//!   - action: add_kit
//!     kit: discover-healthy-skin-kit
//!   - action: remove
//!     product: precleanse-cleansing-oil
//!     size: 5.1 oz
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use skin_routine_core::{Email, ProductSlug, Tier, Timing};
use skin_routine_engine::{
    EngineConfig, RoutineDataset, RoutineSession, StorefrontCartClient, TierAdvance,
};
use tracing::{info, warn};

use super::profile::{PartialProfile, ProfileArgs};
use super::routine::{print_heading, print_line, print_steps, print_total};
use super::{CliError, load_dataset, read_file};

/// A scripted results-page visit.
#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub profile: Option<PartialProfile>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

/// One customer interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Add one unit, at `size` or the product's selected size.
    Add {
        product: ProductSlug,
        #[serde(default)]
        size: Option<String>,
    },
    /// Remove one unit, at `size` or the product's selected size.
    Remove {
        product: ProductSlug,
        #[serde(default)]
        size: Option<String>,
    },
    SelectSize { product: ProductSlug, size: String },
    Timing { timing: Timing },
    Tier { tier: Tier },
    /// Add the whole displayed routine of `tier` (default: the active tier).
    AddAll {
        #[serde(default)]
        tier: Option<Tier>,
    },
    AddKit { kit: ProductSlug },
}

impl Script {
    /// Parse a script.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Invalid` for malformed YAML.
    pub fn parse(content: &str) -> Result<Self, CliError> {
        serde_yaml::from_str(content).map_err(|e| CliError::Invalid {
            what: "session script",
            message: e.to_string(),
        })
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let script = Self::parse(&read_file(path)?)?;
        info!(path = %path.display(), events = script.events.len(), "Loaded session script");
        Ok(script)
    }

    /// The profile to start from: flags layered over the script's profile.
    /// A `--profile` file replaces the script's profile entirely.
    ///
    /// # Errors
    ///
    /// Returns `MissingProfileField` when neither supplies age or concern.
    pub fn profile(&mut self, args: &ProfileArgs) -> Result<skin_routine_engine::UserProfile, CliError> {
        let from_script = self.profile.take().unwrap_or_default();
        if args.profile.is_some() {
            return args.load();
        }
        args.merge(from_script)
    }
}

/// Apply one event. Returns any tier advance it caused.
///
/// # Errors
///
/// Returns an error for an unknown kit.
pub fn apply(
    session: &mut RoutineSession<'_>,
    event: &ScriptEvent,
) -> Result<Vec<TierAdvance>, skin_routine_engine::EngineError> {
    let advances: Vec<TierAdvance> = match event {
        ScriptEvent::Add { product, size } => {
            session.add_product(product, size.as_deref()).into_iter().collect()
        }
        ScriptEvent::Remove { product, size } => {
            let size = size
                .clone()
                .unwrap_or_else(|| session.selected_size(product).size);
            session.remove_from_cart(product, &size);
            Vec::new()
        }
        ScriptEvent::SelectSize { product, size } => {
            if session.select_size(product, size).is_none() {
                warn!(product = %product, size, "Unknown size, selection unchanged");
            }
            Vec::new()
        }
        ScriptEvent::Timing { timing } => {
            session.switch_timing(*timing);
            Vec::new()
        }
        ScriptEvent::Tier { tier } => {
            session.switch_tier(*tier);
            Vec::new()
        }
        ScriptEvent::AddAll { tier } => {
            let tier = tier.unwrap_or_else(|| session.active_tier());
            session.add_all(tier).advances
        }
        ScriptEvent::AddKit { kit } => session.add_kit(kit)?.into_iter().collect(),
    };
    Ok(advances)
}

/// Replay every event against a fresh session.
///
/// # Errors
///
/// Stops at the first event that fails.
pub fn replay<'d>(
    dataset: &'d RoutineDataset,
    profile: skin_routine_engine::UserProfile,
    events: &[ScriptEvent],
) -> Result<(RoutineSession<'d>, Vec<TierAdvance>), skin_routine_engine::EngineError> {
    let mut session = RoutineSession::new(dataset, profile);
    let mut advances = Vec::new();
    for event in events {
        advances.extend(apply(&mut session, event)?);
    }
    Ok((session, advances))
}

/// Replay a script and print the results page state.
///
/// # Errors
///
/// Returns an error if the script, profile or dataset cannot be loaded, or
/// an event fails.
pub fn simulate(
    config: &EngineConfig,
    args: &ProfileArgs,
    script_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut script = Script::load(script_path)?;
    let profile = script.profile(args)?;
    let dataset = load_dataset(config)?;

    let (session, advances) = replay(&dataset, profile, &script.events)?;
    print_session(&session, &advances);
    Ok(())
}

/// Write a results snapshot for `email`.
///
/// # Errors
///
/// Returns an error for an invalid email or profile, or if the output file
/// cannot be written.
pub fn save(
    config: &EngineConfig,
    args: &ProfileArgs,
    email: &str,
    tier: Option<Tier>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let email = Email::parse(email)?;
    let profile = args.load()?;
    let dataset = load_dataset(config)?;

    let mut session = RoutineSession::new(&dataset, profile);
    if let Some(tier) = tier {
        session.switch_tier(tier);
    }
    let snapshot = session.snapshot(email);
    let json = snapshot.to_json()?;

    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(
                id = %snapshot.id,
                path = %path.display(),
                products = snapshot.products.len(),
                "Saved routine"
            );
        }
        None => print_line(&json),
    }
    Ok(())
}

/// Replay a script, then create a Shopify cart from the result.
///
/// # Errors
///
/// Returns an error if checkout is not configured, the cart is empty, or
/// the backend rejects the cart.
pub async fn checkout(
    config: &EngineConfig,
    args: &ProfileArgs,
    script_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let commerce = config
        .commerce
        .as_ref()
        .ok_or(CliError::CommerceNotConfigured)?;

    let mut script = Script::load(script_path)?;
    let profile = script.profile(args)?;
    let dataset = load_dataset(config)?;
    let (session, advances) = replay(&dataset, profile, &script.events)?;
    print_session(&session, &advances);

    let client = StorefrontCartClient::new(commerce);
    info!(endpoint = %client.endpoint(), "Submitting cart");
    let receipt = session.submit_cart(&client).await?;

    print_heading("Checkout");
    print_line(&format!("Cart: {}", receipt.cart_id));
    print_line(&format!("Items: {}", receipt.total_quantity));
    match receipt.checkout_url {
        Some(url) => print_line(&format!("Checkout URL: {url}")),
        None => return Err(CliError::CheckoutFailed.into()),
    }
    Ok(())
}

fn print_session(session: &RoutineSession<'_>, advances: &[TierAdvance]) {
    for advance in advances {
        print_line(&format!("Upgraded {} -> {}", advance.from, advance.to));
    }

    let tier = session.active_tier();
    let summary = session.routine_summary(tier);
    print_heading(&format!(
        "{tier} routine ({}, {} products, {})",
        summary.timing,
        summary.product_count,
        summary.total.display()
    ));
    print_steps("", &session.displayed_routine(tier));

    print_heading("Cart");
    if session.cart().is_empty() {
        print_line("  empty");
        return;
    }
    for item in session.cart().items() {
        print_line(&format!(
            "  {:>2} x {:<45} {:<10} {:>9}",
            item.quantity,
            item.name,
            item.size,
            item.line_price().display()
        ));
    }
    print_line(&format!("Items: {}", session.cart().item_count()));
    print_total(session.cart().total_price());
}
