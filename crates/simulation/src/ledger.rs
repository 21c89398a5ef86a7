//! Running totals of every resource the player has collected.

use std::collections::BTreeMap;

use bevy::prelude::*;

/// Collected amount per resource name.
///
/// Only [`ResourceLedger::add_collected`] mutates it during play; loading a
/// save swaps the whole map with [`ResourceLedger::replace_all`].
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLedger {
    collected: BTreeMap<String, u32>,
}

impl ResourceLedger {
    pub fn add_collected(&mut self, resource: &str, amount: u32) {
        let entry = self.collected.entry(resource.to_string()).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// 0 for resources never collected.
    pub fn get_collected(&self, resource: &str) -> u32 {
        self.collected.get(resource).copied().unwrap_or(0)
    }

    pub fn total_collected(&self) -> u32 {
        self.collected
            .values()
            .fold(0u32, |acc, v| acc.saturating_add(*v))
    }

    pub fn is_empty(&self) -> bool {
        self.collected.is_empty()
    }

    /// Independent copy of the totals.
    pub fn snapshot_all(&self) -> BTreeMap<String, u32> {
        self.collected.clone()
    }

    pub fn replace_all(&mut self, collected: BTreeMap<String, u32>) {
        self.collected = collected;
    }

    /// Entries ordered by name, ties broken by descending amount.
    pub fn sorted_entries(&self) -> Vec<(String, u32)> {
        sorted_entries(self.collected.iter().map(|(k, v)| (k.clone(), *v)))
    }
}

/// Orders `(name, amount)` pairs by name, then by descending amount.
pub fn sorted_entries(entries: impl IntoIterator<Item = (String, u32)>) -> Vec<(String, u32)> {
    let mut list: Vec<(String, u32)> = entries.into_iter().collect();
    list.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
    list
}

pub struct LedgerPlugin;

impl Plugin for LedgerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ResourceLedger>();
    }
}
