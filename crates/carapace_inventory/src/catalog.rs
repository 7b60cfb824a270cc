//! Named shell catalog

use crate::error::{InventoryError, Result};
use crate::shell::{ShellStats, NO_SHELL};
use std::collections::BTreeMap;

/// Every shell the game knows by name, plus the one handed out on coin redemption
#[derive(Debug, Clone, Default)]
pub struct ShellCatalog {
    shells: BTreeMap<String, ShellStats>,
    redeem: Option<String>,
}

impl ShellCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of shells; names must be unique
    pub fn from_shells(shells: impl IntoIterator<Item = ShellStats>) -> Result<Self> {
        let mut catalog = Self::new();
        for shell in shells {
            catalog.insert(shell)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, shell: ShellStats) -> Result<()> {
        if self.shells.contains_key(&shell.name) {
            return Err(InventoryError::DuplicateShell(shell.name));
        }
        self.shells.insert(shell.name.clone(), shell);
        Ok(())
    }

    /// Shell given for coin redemption
    pub fn with_redeem_shell(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !self.shells.contains_key(&name) {
            return Err(InventoryError::UnknownShell(name));
        }
        self.redeem = Some(name);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&ShellStats> {
        self.shells.get(name)
    }

    /// Fresh copy of a shell; `NoShell` and unknown names yield `None`
    pub fn spawn(&self, name: &str) -> Option<ShellStats> {
        if name == NO_SHELL {
            return None;
        }
        let shell = self.shells.get(name).cloned();
        if shell.is_none() {
            log::warn!("Unknown shell {name:?} requested");
        }
        shell
    }

    pub fn redeem_shell(&self) -> Option<ShellStats> {
        self.redeem.as_deref().and_then(|name| self.spawn(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.shells.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.shells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{CONCH_SHELL, SNAIL_SHELL, SPIKY_SHELL};

    fn catalog() -> ShellCatalog {
        ShellCatalog::from_shells([
            ShellStats::new(SNAIL_SHELL).with_armor(2),
            ShellStats::new(SPIKY_SHELL).with_armor(1),
            ShellStats::new(CONCH_SHELL).with_armor(1),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(SNAIL_SHELL).unwrap().armor, 2);
        assert!(catalog.spawn(NO_SHELL).is_none());
        assert!(catalog.spawn("Pebble").is_none());
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec![CONCH_SHELL, SNAIL_SHELL, SPIKY_SHELL]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut catalog = catalog();
        assert_eq!(
            catalog.insert(ShellStats::new(SNAIL_SHELL)),
            Err(InventoryError::DuplicateShell(SNAIL_SHELL.into()))
        );
    }

    #[test]
    fn test_redeem_shell() {
        assert!(catalog().redeem_shell().is_none());

        let catalog = catalog().with_redeem_shell(SNAIL_SHELL).unwrap();
        assert_eq!(catalog.redeem_shell().unwrap().name, SNAIL_SHELL);

        assert!(ShellCatalog::new().with_redeem_shell("Pebble").is_err());
    }
}
