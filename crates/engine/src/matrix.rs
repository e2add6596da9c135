//! The routine matrix: one row per step of each franchise/tier/timing routine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use skin_routine_core::{Tier, Timing};

use crate::franchise::Franchise;

/// One step of one franchise/tier/timing routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineMatrixEntry {
    pub franchise: Franchise,
    pub tier: Tier,
    pub timing: Timing,
    /// 1-based position within the (franchise, tier, timing) routine.
    pub step: u32,
    /// Product name, keyed into the catalog.
    pub product: String,
    /// Informational age range the row was authored for.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub age_range: String,
    /// Alternate product for sensitive skin. Empty means no swap.
    #[serde(default)]
    pub sensitive_swap: String,
}

impl RoutineMatrixEntry {
    /// The sensitive-skin alternate, if the row defines one.
    #[must_use]
    pub fn swap(&self) -> Option<&str> {
        (!self.sensitive_swap.is_empty()).then_some(self.sensitive_swap.as_str())
    }

    /// This row with its product replaced by the sensitive swap, when one exists.
    #[must_use]
    pub fn with_sensitive_swap(&self) -> Self {
        let mut entry = self.clone();
        if let Some(swap) = self.swap() {
            entry.product = swap.to_string();
        }
        entry
    }
}

/// Grouping key for the step-density invariant.
pub type RoutineKey = (Franchise, Tier, Timing);

/// Ordered routine matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutineMatrix {
    entries: Vec<RoutineMatrixEntry>,
}

impl RoutineMatrix {
    #[must_use]
    pub const fn new(entries: Vec<RoutineMatrixEntry>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoutineMatrixEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows for a franchise and tier, both timings, in matrix order.
    pub fn rows_for(
        &self,
        franchise: Franchise,
        tier: Tier,
    ) -> impl Iterator<Item = &RoutineMatrixEntry> {
        self.entries
            .iter()
            .filter(move |e| e.franchise == franchise && e.tier == tier)
    }

    /// Step numbers per (franchise, tier, timing), in matrix order.
    #[must_use]
    pub fn steps_by_routine(&self) -> BTreeMap<RoutineKey, Vec<u32>> {
        let mut groups: BTreeMap<RoutineKey, Vec<u32>> = BTreeMap::new();
        for entry in &self.entries {
            groups
                .entry((entry.franchise, entry.tier, entry.timing))
                .or_default()
                .push(entry.step);
        }
        groups
    }

    /// Check that every routine's steps are unique and dense from 1.
    ///
    /// Returns one message per offending routine.
    #[must_use]
    pub fn step_problems(&self) -> Vec<String> {
        self.steps_by_routine()
            .into_iter()
            .filter_map(|((franchise, tier, timing), mut steps)| {
                steps.sort_unstable();
                let dense = steps
                    .iter()
                    .zip(1u32..)
                    .all(|(&step, expected)| step == expected);
                (!dense).then(|| {
                    format!(
                        "{franchise} {tier} {timing}: steps {steps:?} are not unique and dense from 1"
                    )
                })
            })
            .collect()
    }
}
