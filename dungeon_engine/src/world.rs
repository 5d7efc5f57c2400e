//! Data structures representing the game world.
//!
//! This module defines [`DungeonWorld`], the live and mutable state of a
//! session, and [`MessageTag`], the author-supplied generic messages.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow};
use dungeon_data::MapDef;
use log::info;
use serde_json::Value;

use crate::npc::Npc;
use crate::{Id, Player, Room};

/// Generic messages looked up in the map's `genericMsgs` table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MessageTag {
    MissingCmd,
    InvalidCmd,
    Deadend,
    NoItemHere,
    EmptyInventory,
    HelpCmd,
    MissingItem,
    Victory,
}

impl MessageTag {
    /// Key of this message in the map document.
    pub fn key(self) -> &'static str {
        match self {
            MessageTag::MissingCmd => "missingCmd",
            MessageTag::InvalidCmd => "invalidCmd",
            MessageTag::Deadend => "deadend",
            MessageTag::NoItemHere => "noItemHere",
            MessageTag::EmptyInventory => "emptyInventory",
            MessageTag::HelpCmd => "helpCmd",
            MessageTag::MissingItem => "missingItem",
            MessageTag::Victory => "victory",
        }
    }

    /// Text used when the map doesn't supply one.
    pub fn fallback(self) -> &'static str {
        match self {
            MessageTag::MissingCmd => "Please enter a command.",
            MessageTag::InvalidCmd => "I don't know how to do that.",
            MessageTag::Deadend => "You can't go that way.",
            MessageTag::NoItemHere => "There is no such item here.",
            MessageTag::EmptyInventory => "Your inventory is empty!",
            MessageTag::HelpCmd => "Commands: north, south, east, west, take <item>, use <item>, look, inventory, help, restart, quit",
            MessageTag::MissingItem => "Command should be followed by specific item. E.g. Sword",
            MessageTag::Victory => "You have escaped!",
        }
    }
}

/// Complete state of the running game.
///
/// `DungeonWorld` is built from a [`MapDef`] when a session starts and is then
/// mutated in place by every command. [`DungeonWorld::to_def`] turns it back
/// into a document for the working copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DungeonWorld {
    pub opening: String,
    pub messages: BTreeMap<String, String>,
    pub rooms: BTreeMap<Id, Room>,
    pub npcs: BTreeMap<Id, Npc>,
    pub player: Player,
    /// Top-level map keys with no meaning to the engine.
    pub extra: BTreeMap<String, Value>,
}

impl DungeonWorld {
    /// Create a new empty world with the player standing nowhere.
    pub fn new_empty() -> DungeonWorld {
        let world = DungeonWorld::default();
        info!("new, empty 'DungeonWorld' created");
        world
    }

    /// Look up a generic message, falling back to the built-in text.
    pub fn message(&self, tag: MessageTag) -> String {
        self.messages
            .get(tag.key())
            .cloned()
            .unwrap_or_else(|| tag.fallback().to_string())
    }

    /// Obtain a reference to the room the player occupies.
    /// # Errors
    /// - if the player's room id is not found
    pub fn player_room_ref(&self) -> Result<&Room> {
        self.rooms
            .get(&self.player.location)
            .ok_or_else(|| anyhow!("player's room ({}) not found in world", self.player.location))
    }

    /// Obtain a mutable reference to the room the player occupies.
    /// # Errors
    /// - if the player's room id is not found
    pub fn player_room_mut(&mut self) -> Result<&mut Room> {
        self.rooms
            .get_mut(&self.player.location)
            .ok_or_else(|| anyhow!("player's room ({}) not found in world", self.player.location))
    }

    /// The NPC stationed in a room, if any.
    pub fn npc_in(&self, room: &Room) -> Option<&Npc> {
        room.npc_id.as_ref().and_then(|id| self.npcs.get(id))
    }

    /// Serialize the live state into a full map document.
    pub fn to_def(&self) -> MapDef {
        MapDef {
            opening: self.opening.clone(),
            generic_msgs: self.messages.clone(),
            rooms: self.rooms.iter().map(|(id, room)| (id.clone(), room.to_def())).collect(),
            npcs: self.npcs.iter().map(|(id, npc)| (id.clone(), npc.to_def())).collect(),
            inventory: self.player.inventory.clone(),
            extra: self.extra.clone(),
        }
    }
}
