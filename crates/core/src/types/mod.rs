//! Core types for the skin routine finder.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod price;
pub mod routine;
pub mod slug;

pub use email::{Email, EmailError};
pub use price::{CurrencyCode, Price};
pub use routine::*;
pub use slug::ProductSlug;
