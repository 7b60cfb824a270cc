//! Contact-start detection

use carapace_physics::BodyId;
use std::collections::BTreeSet;

/// Remembers last tick's contacts and reports the new ones
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    touching: BTreeSet<BodyId>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contact set; returns bodies that were not touching last time
    pub fn update(&mut self, current: impl IntoIterator<Item = BodyId>) -> Vec<BodyId> {
        let current: BTreeSet<BodyId> = current.into_iter().collect();
        let entered = current.difference(&self.touching).copied().collect();
        self.touching = current;
        entered
    }

    pub fn is_touching(&self, body: BodyId) -> bool {
        self.touching.contains(&body)
    }

    pub fn clear(&mut self) {
        self.touching.clear();
    }
}
