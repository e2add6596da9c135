//! Integration tests for the skin routine engine.
//!
//! Everything runs against the embedded dataset; no network access is needed.
//! Commerce submissions go to in-memory backends defined here.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p skin-routine-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `dataset` - Shape of the embedded catalog, routine matrix and kits
//! - `routine_resolution` - Profile to routine, across every concern/tier/timing
//! - `cart_session` - Cart reconciliation, tier advancement and checkout

use std::sync::Mutex;

use async_trait::async_trait;
use skin_routine_core::{Tier, TimingPreference};
use skin_routine_engine::{
    CartLineSubmission, CartReceipt, CommerceBackend, CommerceError, Concern, UserProfile,
};

/// Build a profile.
#[must_use]
pub fn profile(age: u32, concern: Concern, tier: Tier, timing: TimingPreference) -> UserProfile {
    UserProfile {
        age,
        concern,
        tier,
        timing,
        sensitive: false,
    }
}

/// The 28-year-old dullness profile used throughout these tests.
#[must_use]
pub fn biolumin_profile(timing: TimingPreference) -> UserProfile {
    profile(28, Concern::DullnessUnevenTone, Tier::Essential, timing)
}

/// Records every submission and answers with a fixed receipt.
#[derive(Default)]
pub struct RecordingBackend {
    submissions: Mutex<Vec<Vec<CartLineSubmission>>>,
}

impl RecordingBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every batch of lines submitted so far.
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn submissions(&self) -> Vec<Vec<CartLineSubmission>> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommerceBackend for RecordingBackend {
    #[allow(clippy::unwrap_used)]
    async fn submit(&self, lines: &[CartLineSubmission]) -> Result<CartReceipt, CommerceError> {
        let mut submissions = self.submissions.lock().unwrap();
        submissions.push(lines.to_vec());
        Ok(CartReceipt {
            cart_id: format!("gid://shopify/Cart/test-{}", submissions.len()),
            checkout_url: Some("https://skin.myshopify.com/cart/c/test".to_string()),
            total_quantity: lines.iter().map(|line| line.quantity).sum(),
        })
    }
}

/// Rejects every submission with a user error.
pub struct RejectingBackend;

#[async_trait]
impl CommerceBackend for RejectingBackend {
    async fn submit(&self, _lines: &[CartLineSubmission]) -> Result<CartReceipt, CommerceError> {
        Err(CommerceError::UserError(
            "input.lines.0.merchandiseId: The merchandise does not exist.".to_string(),
        ))
    }
}
