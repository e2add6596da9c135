//! Loading and validating the routine dataset.
//!
//! The dataset is a single JSON document:
//!
//! ```json
//! {
//!   "products": [{"name": "...", "price": "46.00", "sizes": [...]}],
//!   "routine_matrix": [{"franchise": "BioLumin-C", "tier": "Essential", ...}],
//!   "kits": [{"slug": "...", "price": "49.50", "retail_price": "76.00"}]
//! }
//! ```
//!
//! A copy ships inside the binary; `ROUTINE_DATA_PATH` points at a
//! replacement file.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use skin_routine_core::ProductSlug;
use tracing::{info, instrument};

use crate::catalog::{Catalog, Product};
use crate::error::{EngineError, Result};
use crate::kits::Kit;
use crate::matrix::RoutineMatrix;

/// The dataset compiled into the crate.
pub const EMBEDDED_DATASET: &str = include_str!("../data/routine.json");

#[derive(Deserialize)]
struct RawDataset {
    products: Vec<Product>,
    routine_matrix: RoutineMatrix,
    #[serde(default)]
    kits: Vec<Kit>,
}

/// Static reference data: catalog, routine matrix and kits.
#[derive(Debug, Clone)]
pub struct RoutineDataset {
    pub catalog: Catalog,
    pub matrix: RoutineMatrix,
    pub kits: Vec<Kit>,
}

impl RoutineDataset {
    /// Parse the dataset compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Parse`] if the embedded JSON is malformed.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_DATASET)
    }

    /// Parse a dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Parse`] if the JSON does not match the schema.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawDataset = serde_json::from_str(json)?;
        Ok(Self {
            catalog: Catalog::new(raw.products),
            matrix: raw.routine_matrix,
            kits: raw.kits,
        })
    }

    /// Read and parse a dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Io`] if the file cannot be read, or
    /// [`EngineError::Parse`] if it is not a valid dataset.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_json(&json)?;
        info!(
            products = dataset.catalog.len(),
            rows = dataset.matrix.len(),
            kits = dataset.kits.len(),
            "Loaded routine dataset"
        );
        Ok(dataset)
    }

    /// Load from `path` when given, otherwise the embedded dataset.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`RoutineDataset::from_path`] and
    /// [`RoutineDataset::embedded`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(Self::embedded, Self::from_path)
    }

    /// Every structural problem in the dataset.
    ///
    /// The resolver tolerates all of these (missing products join to empty
    /// details), so they are reported rather than enforced at load time.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut problems = self.matrix.step_problems();

        let mut seen = HashSet::new();
        for product in self.catalog.iter() {
            if !seen.insert(product.name.as_str()) {
                problems.push(format!("duplicate product name: {}", product.name));
            }
            if product.price.amount.is_sign_negative() {
                problems.push(format!("negative price for {}", product.name));
            }
            for option in &product.sizes {
                if option.size.trim().is_empty() {
                    problems.push(format!("empty size label for {}", product.name));
                }
                if option.price.amount.is_sign_negative() {
                    problems.push(format!(
                        "negative price for {} {}",
                        product.name, option.size
                    ));
                }
            }
        }

        let mut missing = HashSet::new();
        for entry in self.matrix.iter() {
            for name in std::iter::once(entry.product.as_str()).chain(entry.swap()) {
                if !self.catalog.contains(name) && missing.insert(name) {
                    problems.push(format!("routine matrix references unknown product: {name}"));
                }
            }
        }

        let mut kit_slugs = HashSet::new();
        for kit in &self.kits {
            if !kit_slugs.insert(&kit.slug) {
                problems.push(format!("duplicate kit slug: {}", kit.slug));
            }
        }

        problems
    }

    /// Consume the dataset, failing if [`RoutineDataset::validate`] finds anything.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] listing every problem.
    pub fn validated(self) -> Result<Self> {
        let problems = self.validate();
        if problems.is_empty() {
            Ok(self)
        } else {
            Err(EngineError::Validation(problems))
        }
    }

    #[must_use]
    pub fn kit(&self, slug: &ProductSlug) -> Option<&Kit> {
        self.kits.iter().find(|kit| &kit.slug == slug)
    }
}
