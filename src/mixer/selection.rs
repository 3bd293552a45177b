use std::collections::{BTreeSet, HashMap};

/// Clamp an arbitrary integer into the 0-100 volume range.
pub fn clamp_volume(level: i32) -> u8 {
    level.clamp(0, 100) as u8
}

/// Which tracks are active and how loud each one should be.
///
/// Volumes live apart from the selected set, so deselecting a track keeps
/// its level and toggling twice restores the exact prior state. Callers are
/// responsible for only passing catalog ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    selected: BTreeSet<String>,
    volumes: HashMap<String, u8>,
    default_volume: u8,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(100)
    }
}

impl SelectionState {
    pub fn new(default_volume: u8) -> Self {
        Self {
            selected: BTreeSet::new(),
            volumes: HashMap::new(),
            default_volume: default_volume.min(100),
        }
    }

    /// Flip the selected flag of `id` and return the new value.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Store a clamped volume for `id` and return the stored value.
    pub fn set_volume(&mut self, id: &str, level: i32) -> u8 {
        let level = clamp_volume(level);
        self.volumes.insert(id.to_string(), level);
        level
    }

    /// Stored volume for `id`, or the default when none was set.
    pub fn volume(&self, id: &str) -> u8 {
        self.volumes
            .get(id)
            .copied()
            .unwrap_or(self.default_volume)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }
}
