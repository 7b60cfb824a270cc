//! The player's single shell slot

use crate::shell::ShellStats;
use serde::{Deserialize, Serialize};

/// Holds at most one shell. Ownership moves in on equip and out on drop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShellSlot {
    current: Option<ShellStats>,
}

impl ShellSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&ShellStats> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Name of the worn shell, if any
    pub fn name(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.name.as_str())
    }

    /// Take the worn shell out, leaving `remaining_armor` on it
    pub fn drop_shell(&mut self, remaining_armor: i32) -> Option<ShellStats> {
        self.current.take().map(|mut shell| {
            shell.armor = remaining_armor.max(0);
            shell
        })
    }

    /// Wear `shell`; the slot is emptied first and the previous shell is returned
    pub fn equip(&mut self, shell: ShellStats, remaining_armor: i32) -> Option<ShellStats> {
        let previous = self.drop_shell(remaining_armor);
        log::debug!("Equipped shell {}", shell.name);
        self.current = Some(shell);
        previous
    }

    /// Destroy the worn shell
    pub fn break_shell(&mut self) -> Option<ShellStats> {
        let broken = self.current.take();
        if let Some(shell) = &broken {
            log::debug!("Shell {} broke", shell.name);
        }
        broken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{CONCH_SHELL, SNAIL_SHELL};

    #[test]
    fn test_equip_returns_previous() {
        let mut slot = ShellSlot::new();
        assert!(slot.is_empty());

        assert_eq!(slot.equip(ShellStats::new(SNAIL_SHELL).with_armor(2), 0), None);
        assert_eq!(slot.name(), Some(SNAIL_SHELL));

        let dropped = slot.equip(ShellStats::new(CONCH_SHELL), 1).unwrap();
        assert_eq!(dropped.name, SNAIL_SHELL);
        assert_eq!(dropped.armor, 1);
        assert_eq!(slot.name(), Some(CONCH_SHELL));
    }

    #[test]
    fn test_drop_and_break_empty_slot() {
        let mut slot = ShellSlot::new();
        slot.equip(ShellStats::new(SNAIL_SHELL), 0);

        assert!(slot.break_shell().is_some());
        assert!(slot.is_empty());
        assert_eq!(slot.drop_shell(3), None);
        assert_eq!(slot.break_shell(), None);
    }
}
