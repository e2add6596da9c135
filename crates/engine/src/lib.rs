//! Skin routine recommendation engine.
//!
//! Turns a quiz profile into a tiered AM/PM skincare routine, suggests upgrade
//! products for the next tier, and keeps the session cart that the results
//! page adds into.
//!
//! # Architecture
//!
//! - [`dataset`] loads the static product catalog, routine matrix and kits
//!   (embedded JSON by default, or a file from `ROUTINE_DATA_PATH`)
//! - [`resolver`] and [`upgrade`] are pure functions over that dataset
//! - [`session::RoutineSession`] owns the mutable per-visit state: selected
//!   timing, active tier and the [`cart::Cart`]
//! - [`commerce`] hands the finished cart to the Shopify Storefront API
//!
//! Lookups are fail-open: unknown products, concerns or sizes degrade to
//! defaults so a routine can always be displayed.
//!
//! # Example
//!
//! ```rust,ignore
//! use skin_routine_engine::{RoutineDataset, RoutineSession, UserProfile};
//!
//! let dataset = RoutineDataset::embedded()?;
//! let mut session = RoutineSession::new(&dataset, profile);
//! for step in session.displayed_routine(Tier::Essential) {
//!     println!("{} {}", step.entry.step, step.entry.product);
//! }
//! if let Some(advance) = session.add_product(&slug, None) {
//!     println!("moved to {}", advance.to);
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analysis;
pub mod cart;
pub mod catalog;
pub mod commerce;
pub mod config;
pub mod dataset;
pub mod error;
pub mod franchise;
pub mod kits;
pub mod matrix;
pub mod profile;
pub mod resolver;
pub mod session;
pub mod snapshot;
pub mod upgrade;

pub use analysis::{AgeBand, SkinAnalysis};
pub use cart::{Cart, CartItem};
pub use catalog::{Catalog, Product, ProductDetails, STANDARD_SIZE, SizeOption};
pub use commerce::{
    CartLineSubmission, CartReceipt, CommerceBackend, CommerceError, StorefrontCartClient,
};
pub use config::{CommerceConfig, ConfigError, EngineConfig, LogFormat};
pub use dataset::RoutineDataset;
pub use error::EngineError;
pub use franchise::Franchise;
pub use kits::Kit;
pub use matrix::{RoutineMatrix, RoutineMatrixEntry};
pub use profile::{Concern, UserProfile};
pub use resolver::{ResolvedStep, resolve};
pub use session::{AddAllOutcome, RoutineSession, RoutineSummary, TierAdvance};
pub use snapshot::{RoutineSnapshot, SnapshotProduct};
