use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Stable identifier used for rooms, items and NPCs.
pub type Id = String;

/// Literal used by map authors to mean "nothing here".
pub const NONE_SENTINEL: &str = "none";
/// Room `name` marking the terminal (winning) room.
pub const EXIT_ROOM_NAME: &str = "exit";
/// Id of the room every session starts in.
pub const START_ROOM: &str = "start";

/// Generic message tags every map must provide.
pub const REQUIRED_MESSAGE_TAGS: [&str; 6] = [
    "missingCmd",
    "invalidCmd",
    "deadend",
    "noItemHere",
    "emptyInventory",
    "helpCmd",
];

/// Top-level map document, as stored on disk.
///
/// Top-level keys the engine does not use are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapDef {
    #[serde(alias = "openning", default)]
    pub opening: String,
    #[serde(rename = "genericMsgs", default)]
    pub generic_msgs: BTreeMap<String, String>,
    #[serde(default)]
    pub rooms: BTreeMap<Id, RoomDef>,
    #[serde(default)]
    pub npcs: BTreeMap<Id, NpcDef>,
    #[serde(default)]
    pub inventory: Vec<Id>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A single room definition.
///
/// Exits live directly on the room object (`"north": "hall"`), and any keys
/// the engine does not understand are carried along in `extra` so that a
/// persisted working copy keeps them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<Id>,
    #[serde(flatten)]
    pub exits: Exits,
    #[serde(default, with = "sentinel")]
    pub required_item: Option<Id>,
    #[serde(default, with = "sentinel")]
    pub npc_type: Option<Id>,
    #[serde(default, with = "sentinel")]
    pub npc: Option<String>,
    #[serde(default)]
    pub fail_to_enter: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Directional exits of a room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub north: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub south: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub west: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub east: Option<Id>,
}

impl Exits {
    /// Declared exits as `(direction, target)` pairs, in north/south/west/east order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Id)> {
        [
            ("north", self.north.as_ref()),
            ("south", self.south.as_ref()),
            ("west", self.west.as_ref()),
            ("east", self.east.as_ref()),
        ]
        .into_iter()
        .filter_map(|(dir, target)| target.map(|t| (dir, t)))
    }
}

/// Behavior family of an NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NpcKind {
    Enemies,
    Thieves,
    Traders,
}

impl NpcKind {
    /// Map an npc id to a kind, for maps that name their NPCs after the kind.
    pub fn from_id(id: &str) -> Option<NpcKind> {
        match id.trim().to_lowercase().as_str() {
            "enemies" | "enemy" => Some(NpcKind::Enemies),
            "thieves" | "thief" => Some(NpcKind::Thieves),
            "traders" | "trader" => Some(NpcKind::Traders),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NpcKind::Enemies => "enemies",
            NpcKind::Thieves => "thieves",
            NpcKind::Traders => "traders",
        }
    }
}

/// Raw NPC definition. Which fields are meaningful depends on the kind;
/// anything else the author wrote (greetings, portraits) lands in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpcDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NpcKind>,
    #[serde(default, deserialize_with = "sentinel::deserialize", skip_serializing_if = "Option::is_none")]
    pub to_defeat: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub you_win: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub you_lose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub you_cannot_lose: Option<String>,
    #[serde(default, deserialize_with = "sentinel::deserialize", skip_serializing_if = "Option::is_none")]
    pub desires: Option<Id>,
    #[serde(default, deserialize_with = "sentinel::deserialize", skip_serializing_if = "Option::is_none")]
    pub sells: Option<Id>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl NpcDef {
    /// Explicit kind if present, otherwise inferred from the npc's id.
    pub fn resolved_kind(&self, id: &str) -> Option<NpcKind> {
        self.kind.or_else(|| NpcKind::from_id(id))
    }
}

/// (De)serialization of optional ids written as `"none"` when absent.
mod sentinel {
    use super::NONE_SENTINEL;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(NONE_SENTINEL))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.filter(|value| {
            let trimmed = value.trim();
            !trimmed.is_empty() && trimmed != NONE_SENTINEL
        }))
    }
}
