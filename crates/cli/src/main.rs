//! Skin routine CLI - resolve routines, replay cart sessions and check out.
//!
//! # Usage
//!
//! ```bash
//! # Show the routine for a quiz profile
//! routine-cli resolve --age 28 --concern "Dullness / uneven tone" --timing AM
//!
//! # Same, from a profile file (YAML or JSON)
//! routine-cli resolve --profile quiz.yaml --json
//!
//! # Replay a cart session script
//! routine-cli simulate --profile quiz.yaml --script session.yaml
//!
//! # Save results for an email address
//! routine-cli save --profile quiz.yaml --email jane@example.com -o results.json
//!
//! # Replay a script, then create a Shopify cart from it
//! routine-cli checkout --script session.yaml
//! ```
//!
//! # Commands
//!
//! - `resolve` - Print the recommended routine
//! - `analysis` - Print the skin analysis summary
//! - `upgrades` - Print upgrade suggestions per tier
//! - `sizes` - Print a product's sizes and default size
//! - `validate` - Check the dataset for structural problems
//! - `simulate` - Replay a YAML script of cart and display events
//! - `save` - Write a results snapshot as JSON
//! - `checkout` - Replay a script and submit the cart to Shopify

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use skin_routine_core::{Tier, Timing};
use skin_routine_engine::{EngineConfig, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::profile::ProfileArgs;

#[derive(Parser)]
#[command(name = "routine-cli")]
#[command(author, version, about = "Skin routine finder CLI tools")]
struct Cli {
    /// Dataset JSON file (overrides `ROUTINE_DATA_PATH`)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the recommended routine for a profile
    Resolve {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the skin analysis summary
    Analysis {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print upgrade suggestions for each tier
    Upgrades {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Timing to compute upgrades for (default: the initially displayed timing)
        #[arg(long = "show")]
        show: Option<Timing>,
    },
    /// Print a product's sizes
    Sizes {
        /// Product name as it appears in the catalog
        product: String,
    },
    /// Check the dataset for structural problems
    Validate,
    /// Replay a YAML session script and print the resulting cart
    Simulate {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Session script (YAML)
        #[arg(short, long)]
        script: PathBuf,
    },
    /// Write a results snapshot as JSON
    Save {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Email address to save the results for
        #[arg(short, long)]
        email: String,

        /// Tier to save (default: the profile's tier)
        #[arg(long = "save-tier")]
        save_tier: Option<Tier>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replay a session script and submit the cart to Shopify
    Checkout {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Session script (YAML)
        #[arg(short, long)]
        script: PathBuf,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &EngineConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Logs go to stderr; stdout carries command output.
fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "skin_routine_engine=info,skin_routine_cli=info".into());

    let (pretty, json) = match format {
        LogFormat::Pretty => (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(pretty)
        .with(json)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let sentry_guard = init_sentry(&config);
    init_tracing(config.log_format);
    if sentry_guard.is_some() {
        tracing::info!("Sentry initialized");
    }

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, mut config: EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    if cli.data.is_some() {
        config.data_path = cli.data;
    }

    match cli.command {
        Commands::Resolve { profile, json } => commands::routine::resolve(&config, &profile, json)?,
        Commands::Analysis { profile, json } => {
            commands::routine::analysis(&profile, json)?;
        }
        Commands::Upgrades { profile, show } => {
            commands::routine::upgrades(&config, &profile, show)?;
        }
        Commands::Sizes { product } => commands::routine::sizes(&config, &product)?,
        Commands::Validate => commands::routine::validate(&config)?,
        Commands::Simulate { profile, script } => {
            commands::session::simulate(&config, &profile, &script)?;
        }
        Commands::Save {
            profile,
            email,
            save_tier,
            output,
        } => commands::session::save(&config, &profile, &email, save_tier, output.as_deref())?,
        Commands::Checkout { profile, script } => {
            commands::session::checkout(&config, &profile, &script).await?;
        }
    }
    Ok(())
}
