//! Collected-summary popup.
//!
//! A completed collection sends [`ShowCollectedSummary`]. This module turns
//! it into a [`CollectedSummaryPopup`] whose text lists everything collected
//! so far and what is still sitting in buildings, grouped by resource. The UI
//! crate draws the popup and counts down its display time.

use std::collections::BTreeMap;
use std::fmt::Write;

use bevy::prelude::*;

use crate::buildings::Building;
use crate::ledger::{sorted_entries, ResourceLedger};

/// Seconds the popup stays on screen.
pub const POPUP_DISPLAY_SECS: f32 = 1.2;

const UNKNOWN_RESOURCE: &str = "Unknown";

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowCollectedSummary {
    /// Ledger total after the collection.
    pub total: u32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct CollectedSummaryPopup {
    pub text: String,
    pub total: u32,
    pub remaining_secs: f32,
}

impl CollectedSummaryPopup {
    pub fn is_visible(&self) -> bool {
        self.remaining_secs > 0.0
    }

    /// Counts the display timer down by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.remaining_secs = (self.remaining_secs - dt).max(0.0);
    }
}

/// Stored amounts summed per resource name across `buildings`.
pub fn stored_by_resource<'a>(
    buildings: impl IntoIterator<Item = &'a Building>,
) -> BTreeMap<String, u32> {
    let mut produced = BTreeMap::new();
    for b in buildings {
        let name = if b.resource_name.is_empty() {
            UNKNOWN_RESOURCE.to_string()
        } else {
            b.resource_name.clone()
        };
        let entry = produced.entry(name).or_insert(0u32);
        *entry = entry.saturating_add(b.stored_amount());
    }
    produced
}

/// Builds the popup body: a "collected" section then a "stored in buildings"
/// section, each sorted by name, with a placeholder line when empty.
pub fn build_summary_text(
    collected: &[(String, u32)],
    produced: &BTreeMap<String, u32>,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Собрано:");
    if collected.is_empty() {
        let _ = writeln!(out, "  - ничего не собрано");
    } else {
        for (name, amount) in collected {
            let _ = writeln!(out, "  • {name}: {amount}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Произведено (в зданиях):");
    if produced.is_empty() {
        let _ = writeln!(out, "  - производство отсутствует");
    } else {
        for (name, amount) in sorted_entries(produced.iter().map(|(k, v)| (k.clone(), *v))) {
            let _ = writeln!(out, "  • {name}: {amount}");
        }
    }

    out.trim_end().to_string()
}

/// Opens (or restarts) the popup for the latest summary request.
pub fn open_summary_popup(
    mut events: EventReader<ShowCollectedSummary>,
    ledger: Res<ResourceLedger>,
    buildings: Query<&Building>,
    mut popup: ResMut<CollectedSummaryPopup>,
) {
    let Some(latest) = events.read().last() else {
        return;
    };
    popup.text = build_summary_text(&ledger.sorted_entries(), &stored_by_resource(&buildings));
    popup.total = latest.total;
    popup.remaining_secs = POPUP_DISPLAY_SECS;
}

pub struct NotificationsPlugin;

impl Plugin for NotificationsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ShowCollectedSummary>()
            .init_resource::<CollectedSummaryPopup>()
            .add_systems(
                FixedUpdate,
                open_summary_popup.in_set(crate::SimulationSet::PostSim),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_placeholders_when_empty() {
        let text = build_summary_text(&[], &BTreeMap::new());
        assert_eq!(
            text,
            "Собрано:\n  - ничего не собрано\n\nПроизведено (в зданиях):\n  - производство отсутствует"
        );
    }

    #[test]
    fn test_summary_lists_sorted_sections() {
        let collected = vec![("Дерево".to_string(), 3), ("Железо".to_string(), 10)];
        let mut produced = BTreeMap::new();
        produced.insert("Камень".to_string(), 4);
        produced.insert("Глина".to_string(), 0);
        let text = build_summary_text(&collected, &produced);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Собрано:");
        assert_eq!(lines[1], "  • Дерево: 3");
        assert_eq!(lines[2], "  • Железо: 10");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Произведено (в зданиях):");
        assert_eq!(lines[5], "  • Глина: 0");
        assert_eq!(lines[6], "  • Камень: 4");
    }

    #[test]
    fn test_stored_by_resource_groups_and_names_unknown() {
        let a = Building::new("a", "Железо").with_stored(5);
        let b = Building::new("b", "Железо").with_stored(7);
        let c = Building::new("c", "").with_stored(2);
        let grouped = stored_by_resource([&a, &b, &c]);
        assert_eq!(grouped.get("Железо"), Some(&12));
        assert_eq!(grouped.get("Unknown"), Some(&2));
    }

    #[test]
    fn test_popup_tick_hides_after_display_time() {
        let mut popup = CollectedSummaryPopup {
            remaining_secs: POPUP_DISPLAY_SECS,
            ..Default::default()
        };
        assert!(popup.is_visible());
        popup.tick(1.0);
        assert!(popup.is_visible());
        popup.tick(0.5);
        assert!(!popup.is_visible());
    }
}
