//! Room definitions and the room graph.
//!
//! Any location the player can stand in is a `Room`. Rooms are linked by
//! directional exits into a (possibly cyclic) directed graph keyed by room id.

use std::collections::BTreeMap;
use std::fmt::Display;

use dungeon_data::{Exits, RoomDef};
use serde_json::Value;

use crate::{Id, View, ViewItem};

/// The four compass directions a room may have exits in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// All directions in the order exits are reported.
    pub const ALL: [Direction; 4] = [Direction::North, Direction::South, Direction::West, Direction::East];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::West => "west",
            Direction::East => "east",
        }
    }

    /// Parse a full direction word (already lowercased).
    pub fn from_word(word: &str) -> Option<Direction> {
        match word {
            "north" => Some(Direction::North),
            "south" => Some(Direction::South),
            "west" => Some(Direction::West),
            "east" => Some(Direction::East),
            _ => None,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A location in the dungeon.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: Id,
    pub name: Option<String>,
    pub description: String,
    pub items: Vec<Id>,
    pub exits: BTreeMap<Direction, Id>,
    pub required_item: Option<Id>,
    pub npc_id: Option<Id>,
    pub npc_label: Option<String>,
    pub fail_to_enter: String,
    pub extra: BTreeMap<String, Value>,
}

impl Room {
    /// Build a runtime room from its map definition.
    pub fn from_def(id: &str, def: &RoomDef) -> Room {
        let exits = def
            .exits
            .iter()
            .filter_map(|(dir, target)| Direction::from_word(dir).map(|d| (d, target.clone())))
            .collect();
        Room {
            id: id.to_string(),
            name: def.name.clone(),
            description: def.description.clone(),
            items: def.items.clone(),
            exits,
            required_item: def.required_item.clone(),
            npc_id: def.npc_type.clone(),
            npc_label: def.npc.clone(),
            fail_to_enter: def.fail_to_enter.clone(),
            extra: def.extra.clone(),
        }
    }

    /// Convert back into the on-disk representation.
    pub fn to_def(&self) -> RoomDef {
        let target = |dir: Direction| self.exits.get(&dir).cloned();
        RoomDef {
            name: self.name.clone(),
            description: self.description.clone(),
            items: self.items.clone(),
            exits: Exits {
                north: target(Direction::North),
                south: target(Direction::South),
                west: target(Direction::West),
                east: target(Direction::East),
            },
            required_item: self.required_item.clone(),
            npc_type: self.npc_id.clone(),
            npc: self.npc_label.clone(),
            fail_to_enter: self.fail_to_enter.clone(),
            extra: self.extra.clone(),
        }
    }

    /// Room reached by leaving in `direction`, if such an exit is declared.
    pub fn exit_target(&self, direction: Direction) -> Option<&Id> {
        self.exits.get(&direction)
    }

    /// True if the room is the terminal ("exit") room of the map.
    pub fn is_terminal(&self) -> bool {
        self.name.as_deref() == Some(dungeon_data::EXIT_ROOM_NAME)
    }

    /// Remove one copy of `item` from the room. Returns false if it was not here.
    pub fn remove_item(&mut self, item: &str) -> bool {
        if let Some(pos) = self.items.iter().position(|i| i == item) {
            self.items.remove(pos);
            true
        } else {
            false
        }
    }

    /// Forget the NPC stationed here (used once an enemy has been beaten).
    pub fn clear_npc(&mut self) {
        self.npc_id = None;
        self.npc_label = None;
    }

    /// Push the room description and, if anything is lying around, the item list.
    pub fn describe(&self, view: &mut View) {
        view.push(ViewItem::RoomDescription(self.description.clone()));
        if !self.items.is_empty() {
            view.push(ViewItem::RoomItems(self.items.clone()));
        }
    }

    /// Push one line per declared exit, naming the raw id of the room beyond.
    pub fn show_surroundings(&self, view: &mut View) {
        for direction in Direction::ALL {
            if let Some(target) = self.exit_target(direction) {
                view.push(ViewItem::ExitView {
                    direction,
                    target: target.clone(),
                });
            }
        }
    }
}
