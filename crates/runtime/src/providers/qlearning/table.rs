//! Tabular action values with JSON persistence.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::encoder::{ActionCategory, StateKey};
use crate::api::{Result, RuntimeError};

/// `state -> category -> value`. Missing entries read as 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QTable {
    values: HashMap<StateKey, HashMap<ActionCategory, f64>>,
}

/// One persisted row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct QEntry {
    state: StateKey,
    action: ActionCategory,
    value: f64,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of states seen.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, state: &StateKey, action: &ActionCategory) -> f64 {
        self.values
            .get(state)
            .and_then(|row| row.get(action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Highest stored value for `state`, 0 when nothing is stored.
    ///
    /// Only categories already in the table count; legal actions that were
    /// never tried do not.
    pub fn best_value(&self, state: &StateKey) -> f64 {
        self.values
            .get(state)
            .and_then(|row| row.values().copied().reduce(f64::max))
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, state: StateKey, action: ActionCategory, value: f64) {
        self.values.entry(state).or_default().insert(action, value);
    }

    /// Writes the table as a JSON array sorted by state then category.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries()).map_err(|source| {
            RuntimeError::QTableFormat {
                path: path.to_path_buf(),
                source,
            }
        })?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| RuntimeError::QTableIo {
                path: path.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, json).map_err(|source| RuntimeError::QTableIo {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| RuntimeError::QTableIo {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<QEntry> =
            serde_json::from_str(&json).map_err(|source| RuntimeError::QTableFormat {
                path: path.to_path_buf(),
                source,
            })?;

        let mut table = Self::new();
        for entry in entries {
            table.set(entry.state, entry.action, entry.value);
        }
        Ok(table)
    }

    fn entries(&self) -> Vec<QEntry> {
        let mut entries: Vec<QEntry> = self
            .values
            .iter()
            .flat_map(|(state, row)| {
                row.iter().map(move |(action, value)| QEntry {
                    state: *state,
                    action: action.clone(),
                    value: *value,
                })
            })
            .collect();
        entries.sort_by(|a, b| (a.state, &a.action).cmp(&(b.state, &b.action)));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(floor: usize) -> StateKey {
        StateKey {
            floor,
            hp_bucket: 3,
            mp_ok: true,
            living_enemies: 2,
            boss_alive: false,
        }
    }

    #[test]
    fn missing_entries_read_as_zero() {
        let mut table = QTable::new();
        assert_eq!(table.value(&state(0), &ActionCategory::Attack), 0.0);
        assert_eq!(table.best_value(&state(0)), 0.0);

        table.set(state(0), ActionCategory::Attack, -4.0);
        table.set(state(0), ActionCategory::Defend, -1.5);
        assert_eq!(table.best_value(&state(0)), -1.5);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn survives_a_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("qtable.json");

        let mut table = QTable::new();
        table.set(state(0), ActionCategory::Attack, 1.25);
        table.set(state(2), ActionCategory::Skill("Kiwi Slash".into()), 7.5);
        table.save(&path).unwrap();

        assert_eq!(QTable::load(&path).unwrap(), table);
    }

    #[test]
    fn malformed_file_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qtable.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(QTable::load(&path), Err(RuntimeError::QTableFormat { .. })));
        assert!(matches!(
            QTable::load(&dir.path().join("missing.json")),
            Err(RuntimeError::QTableIo { .. })
        ));
    }
}
