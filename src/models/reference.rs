use super::time_slot::TimeSlot;
use std::collections::HashMap;

/// Baseline temperature (°C) per time-of-day label.
///
/// Keys are kept as the raw `H:MM` / `HH:MM` text from the source so that
/// rows which do not name one of the eight slots are still retained.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    temps: HashMap<String, f64>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later rows for the same label overwrite earlier ones.
    pub fn insert(&mut self, label: impl Into<String>, temp_c: f64) {
        self.temps.insert(label.into(), temp_c);
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.temps.get(label).copied()
    }

    pub fn for_slot(&self, slot: TimeSlot) -> Option<f64> {
        self.get(slot.as_str())
    }

    pub fn len(&self) -> usize {
        self.temps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temps.is_empty()
    }

    /// Slots with no entry; these fall back to the default reference temperature.
    pub fn missing_slots(&self) -> Vec<TimeSlot> {
        TimeSlot::ALL
            .iter()
            .copied()
            .filter(|slot| self.for_slot(*slot).is_none())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ReferenceTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut table = ReferenceTable::new();
        for (label, temp) in iter {
            table.insert(label, temp);
        }
        table
    }
}
