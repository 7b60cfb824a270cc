//! Post-hit invulnerability window

use serde::{Deserialize, Serialize};

/// Timed window during which incoming damage is rejected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invulnerability {
    /// Length of a window in seconds
    pub duration: f32,
    #[serde(skip)]
    remaining: f32,
}

impl Default for Invulnerability {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Invulnerability {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            remaining: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Open a window. Returns `false` if one is already open or the duration is zero.
    pub fn start(&mut self) -> bool {
        if self.is_active() || self.duration <= 0.0 {
            return false;
        }
        self.remaining = self.duration;
        true
    }

    /// Advance the timer; returns `true` on the tick the window closes
    pub fn update(&mut self, delta_time: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining -= delta_time;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_lifecycle() {
        let mut inv = Invulnerability::new(1.0);
        assert!(!inv.is_active());

        assert!(inv.start());
        assert!(inv.is_active());
        assert!(!inv.start());

        assert!(!inv.update(0.6));
        assert!(inv.update(0.6));
        assert!(!inv.is_active());
        assert!(!inv.update(0.1));
    }

    #[test]
    fn test_zero_duration_never_opens() {
        let mut inv = Invulnerability::new(0.0);
        assert!(!inv.start());
        assert!(!inv.is_active());
    }
}
