//! Player -- location and inventory of the one adventurer in a session
use crate::Id;

/// The player's position and belongings.
///
/// There is exactly one inventory per session. It is kept in pickup order and
/// written back to the map's `inventory` array on every persist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    pub location: Id,
    pub inventory: Vec<Id>,
}

impl Player {
    pub fn new(location: impl Into<Id>, inventory: Vec<Id>) -> Player {
        Player {
            location: location.into(),
            inventory,
        }
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    pub fn add_item(&mut self, item: impl Into<Id>) {
        self.inventory.push(item.into());
    }

    /// Remove one copy of `item`. Returns false if it wasn't carried.
    pub fn remove_item(&mut self, item: &str) -> bool {
        if let Some(pos) = self.inventory.iter().position(|i| i == item) {
            self.inventory.remove(pos);
            true
        } else {
            false
        }
    }
}
