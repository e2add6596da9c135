//! Read-only routine commands: resolve, analysis, upgrades, sizes, validate.

use serde::Serialize;
use skin_routine_core::{Price, ProductSlug, Timing};
use skin_routine_engine::resolver::{self, ResolvedStep};
use skin_routine_engine::{EngineConfig, RoutineSession, SizeOption, SkinAnalysis, UserProfile};
use tracing::{error, info, warn};

use super::profile::ProfileArgs;
use super::{CliError, load_dataset};

#[derive(Serialize)]
struct ResolveOutput<'a> {
    profile: &'a UserProfile,
    franchise: &'static str,
    expected_count: usize,
    steps: &'a [ResolvedStep],
    total: Price,
}

/// Print the routine for a profile.
///
/// # Errors
///
/// Returns an error if the profile or dataset cannot be loaded.
pub fn resolve(
    config: &EngineConfig,
    args: &ProfileArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = args.load()?;
    let dataset = load_dataset(config)?;

    let steps = resolver::resolve(&dataset, &profile);
    let expected = resolver::expected_count(profile.tier, profile.timing);
    resolver::check_expected_count(profile.tier, profile.timing, steps.len());

    if json {
        let output = ResolveOutput {
            profile: &profile,
            franchise: profile.franchise().display_name(),
            expected_count: expected,
            steps: &steps,
            total: resolver::total_price(&steps),
        };
        print_json(&output)?;
        return Ok(());
    }

    print_heading(&format!(
        "{} {} routine ({})",
        profile.franchise().display_name(),
        profile.tier,
        profile.timing
    ));
    for timing in [Timing::AM, Timing::PM] {
        let shown = resolver::display_order(&steps, Some(timing));
        if shown.is_empty() {
            continue;
        }
        print_steps(timing.as_str(), &shown);
    }
    print_total(resolver::total_price(&steps));
    Ok(())
}

/// Print the skin analysis panel.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded.
pub fn analysis(args: &ProfileArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let profile = args.load()?;
    let analysis = SkinAnalysis::from_profile(&profile);

    if json {
        print_json(&analysis)?;
    } else {
        print_rows(&analysis.rows());
    }
    Ok(())
}

/// Print the upgrade section of every tier.
///
/// # Errors
///
/// Returns an error if the profile or dataset cannot be loaded.
pub fn upgrades(
    config: &EngineConfig,
    args: &ProfileArgs,
    show: Option<Timing>,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = args.load()?;
    let dataset = load_dataset(config)?;
    let mut session = RoutineSession::new(&dataset, profile);

    if let Some(timing) = show {
        if !session.switch_timing(timing) {
            warn!(%timing, "Profile has no steps at this timing, showing default");
        }
    }

    for tier in skin_routine_core::Tier::ALL {
        let Some(next) = tier.next() else {
            continue;
        };
        let entries = session.upgrade_entries(tier);
        print_heading(&format!(
            "{tier} -> {next} ({})",
            session.selected_timing()
        ));
        if entries.is_empty() {
            print_line("  nothing new");
        } else {
            print_steps("", &entries);
        }
    }
    Ok(())
}

/// Print a product's sizes and which one is selected by default.
///
/// # Errors
///
/// Returns `UnknownProduct` if the catalog has no product with this name or slug.
pub fn sizes(config: &EngineConfig, product: &str) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load_dataset(config)?;
    let catalog = &dataset.catalog;

    let name = catalog
        .get(product)
        .or_else(|| catalog.find_by_slug(&ProductSlug::new(product)))
        .map(|p| p.name.clone())
        .ok_or_else(|| CliError::UnknownProduct(product.to_string()))?;

    let default = catalog.default_size(&name);
    print_heading(&name);
    print_sizes(&catalog.sizes_for(&name), &default);
    Ok(())
}

/// Report dataset problems; fails if there are any.
///
/// # Errors
///
/// Returns `DatasetProblems` when validation finds anything.
pub fn validate(config: &EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load_dataset(config)?;
    let problems = dataset.validate();

    if problems.is_empty() {
        info!(
            products = dataset.catalog.len(),
            rows = dataset.matrix.len(),
            "Dataset is valid"
        );
        return Ok(());
    }

    error!("Dataset validation failed:");
    for problem in &problems {
        error!("  - {problem}");
    }
    Err(CliError::DatasetProblems(problems.len()).into())
}

// =============================================================================
// Output
// =============================================================================

pub(super) fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    print_line(&serde_json::to_string_pretty(value)?);
    Ok(())
}

#[allow(clippy::print_stdout)]
pub(super) fn print_line(line: &str) {
    println!("{line}");
}

pub(super) fn print_heading(title: &str) {
    print_line("");
    print_line(title);
    print_line(&"=".repeat(title.chars().count()));
}

pub(super) fn print_steps(label: &str, steps: &[&ResolvedStep]) {
    if !label.is_empty() {
        print_line(&format!("{label}:"));
    }
    for step in steps {
        print_line(&format!(
            "  {:>2}. {:<45} {:>9}  {}",
            step.step(),
            step.product_name(),
            step.price().display(),
            step.details.category.as_deref().unwrap_or("-"),
        ));
    }
}

pub(super) fn print_total(total: Price) {
    print_line(&format!("Total: {}", total.display()));
}

fn print_rows(rows: &[(&str, &str)]) {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in rows {
        print_line(&format!("{label:<width$}  {value}"));
    }
}

fn print_sizes(sizes: &[SizeOption], default: &SizeOption) {
    for option in sizes {
        let marker = if option.size == default.size { "*" } else { " " };
        print_line(&format!(
            "{marker} {:<10} {:>9}  {}",
            option.size,
            option.price.display(),
            option.variant_id.as_deref().unwrap_or("")
        ));
    }
}
