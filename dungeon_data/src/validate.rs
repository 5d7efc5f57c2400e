use std::fmt;

use crate::*;

/// Validation error for malformed or missing references in a `MapDef`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingReference { kind: &'static str, id: String, context: String },
    MissingField { kind: &'static str, id: String, field: &'static str },
    MissingMessage { tag: &'static str },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
            ValidationError::MissingField { kind, id, field } => {
                write!(f, "{kind} '{id}' is missing required field '{field}'")
            },
            ValidationError::MissingMessage { tag } => {
                write!(f, "genericMsgs is missing required tag '{tag}'")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate cross-references and basic invariants in a `MapDef`.
///
/// Every problem found is reported; an empty result means the map is usable.
///
/// ```
/// use dungeon_data::{MapDef, RoomDef, validate_map};
///
/// let mut map = MapDef::default();
/// for tag in dungeon_data::REQUIRED_MESSAGE_TAGS {
///     map.generic_msgs.insert(tag.into(), "...".into());
/// }
/// map.rooms.insert("start".into(), RoomDef::default());
/// assert!(validate_map(&map).is_empty());
/// ```
pub fn validate_map(map: &MapDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !map.rooms.contains_key(START_ROOM) {
        errors.push(ValidationError::MissingReference {
            kind: "room",
            id: START_ROOM.to_string(),
            context: "every map needs a start room".to_string(),
        });
    }

    for tag in REQUIRED_MESSAGE_TAGS {
        if !map.generic_msgs.contains_key(tag) {
            errors.push(ValidationError::MissingMessage { tag });
        }
    }

    for (room_id, room) in &map.rooms {
        for (direction, target) in room.exits.iter() {
            if !map.rooms.contains_key(target) {
                errors.push(ValidationError::MissingReference {
                    kind: "room",
                    id: target.clone(),
                    context: format!("{direction} exit of room '{room_id}'"),
                });
            }
        }
        if let Some(npc_id) = &room.npc_type
            && !map.npcs.contains_key(npc_id)
        {
            errors.push(ValidationError::MissingReference {
                kind: "npc",
                id: npc_id.clone(),
                context: format!("npcType of room '{room_id}'"),
            });
        }
    }

    for (npc_id, npc) in &map.npcs {
        check_npc(npc_id, npc, &mut errors);
    }

    errors
}

fn check_npc(npc_id: &str, npc: &NpcDef, errors: &mut Vec<ValidationError>) {
    let Some(kind) = npc.resolved_kind(npc_id) else {
        errors.push(ValidationError::InvalidValue {
            context: format!("npc '{npc_id}' has no kind and its id is not enemies, thieves or traders"),
        });
        return;
    };

    let mut require = |present: bool, field: &'static str| {
        if !present {
            errors.push(ValidationError::MissingField {
                kind: "npc",
                id: npc_id.to_string(),
                field,
            });
        }
    };

    match kind {
        NpcKind::Enemies => {
            require(npc.to_defeat.is_some(), "toDefeat");
            require(npc.you_win.is_some(), "youWin");
            require(npc.you_lose.is_some(), "youLose");
        },
        NpcKind::Thieves => {
            require(npc.desires.is_some(), "desires");
            require(npc.you_lose.is_some(), "youLose");
            require(npc.you_cannot_lose.is_some(), "youCannotLose");
        },
        NpcKind::Traders => {
            require(npc.desires.is_some(), "desires");
            require(npc.sells.is_some(), "sells");
        },
    }

    if npc.to_defeat.is_some() && npc.you_win.is_none() && kind != NpcKind::Enemies {
        require(false, "youWin");
    }
}
