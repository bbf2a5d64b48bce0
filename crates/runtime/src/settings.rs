//! Debug settings store.
//!
//! A small key-value store of boolean toggles, read by the session before
//! every resolver call. Keys use the same camelCase names the UI layer sends.

use std::collections::BTreeMap;

use fable_core::ResolveOptions;

/// Skips every resource check and deduction while keeping effects.
pub const DISABLE_COSTS: &str = "disableCosts";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DebugSettings {
    values: BTreeMap<String, bool>,
}

impl DebugSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: bool) {
        self.values.insert(key.into(), value);
    }

    /// Unset keys read as false.
    pub fn get(&self, key: &str) -> bool {
        self.values.get(key).copied().unwrap_or(false)
    }

    pub fn disable_costs(&self) -> bool {
        self.get(DISABLE_COSTS)
    }

    /// The per-call switches derived from the current toggles.
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            disable_costs: self.disable_costs(),
        }
    }
}
