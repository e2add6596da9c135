//! CLI command implementations.

pub mod profile;
pub mod routine;
pub mod session;

use std::path::Path;

use skin_routine_engine::{EngineConfig, RoutineDataset};
use thiserror::Error;
use tracing::info;

/// Errors raised by CLI commands themselves (engine errors pass through).
#[derive(Debug, Error)]
pub enum CliError {
    #[error("missing profile field: --{0} (or set it in --profile)")]
    MissingProfileField(&'static str),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {what}: {message}")]
    Invalid { what: &'static str, message: String },

    #[error("unknown product: {0}")]
    UnknownProduct(String),

    #[error("dataset has {0} problem(s)")]
    DatasetProblems(usize),

    #[error("commerce backend not configured (set SHOPIFY_STORE and SHOPIFY_STOREFRONT_PRIVATE_TOKEN)")]
    CommerceNotConfigured,

    #[error("checkout failed")]
    CheckoutFailed,
}

/// Read a file to a string, naming the path on failure.
pub fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Load the dataset named by the config, or the embedded one.
pub fn load_dataset(config: &EngineConfig) -> Result<RoutineDataset, Box<dyn std::error::Error>> {
    let dataset = RoutineDataset::load(config.data_path.as_deref())?;
    info!(
        products = dataset.catalog.len(),
        rows = dataset.matrix.len(),
        kits = dataset.kits.len(),
        "Loaded dataset"
    );
    Ok(dataset)
}
