//! Skin Routine Core - Shared types library.
//!
//! This crate provides common types used across all skin routine components:
//! - `engine` - Dataset loading, recommendation resolver, cart and session state
//! - `cli` - Command-line tools for resolving routines and replaying sessions
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no dataset
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Prices, product slugs, emails, and routine tier/timing enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
