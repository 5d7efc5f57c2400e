//! NPC Module
//!
//! NPCs are stationed in rooms and resolved once each time the player enters.

use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow};
use dungeon_data::{NpcDef, NpcKind};
use serde_json::Value;

use crate::Id;

/// Item that beats an NPC, plus the text shown when the player carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defeat {
    pub item: Id,
    pub message: String,
}

/// What an NPC does to a player who cannot beat it.
#[derive(Debug, Clone, PartialEq, Eq, variantly::Variantly)]
pub enum NpcRole {
    /// Fatal to the run unless beaten.
    Enemy { you_lose: String },
    /// Steals `desires` from the inventory on every entry.
    Thief {
        desires: Id,
        you_lose: String,
        you_cannot_lose: String,
    },
    /// Swaps `desires` for `sells` when the player uses it in the room.
    Trader { desires: Id, sells: Id },
}

/// A non-playable character.
#[derive(Debug, Clone, PartialEq)]
pub struct Npc {
    pub id: Id,
    pub defeated_by: Option<Defeat>,
    pub role: NpcRole,
    /// Author fields the engine never reads, written back untouched.
    pub extra: BTreeMap<String, Value>,
}

impl Npc {
    /// Build a runtime NPC from its map definition.
    ///
    /// # Errors
    /// - if the kind cannot be determined or a field the kind needs is absent
    pub fn from_def(id: &str, def: &NpcDef) -> Result<Npc> {
        let kind = def
            .resolved_kind(id)
            .ok_or_else(|| anyhow!("npc '{id}' has no recognizable kind"))?;
        let field = |value: &Option<String>, name: &str| {
            value
                .clone()
                .with_context(|| format!("npc '{id}' ({}) is missing '{name}'", kind.as_str()))
        };

        let defeated_by = match &def.to_defeat {
            Some(item) => Some(Defeat {
                item: item.clone(),
                message: field(&def.you_win, "youWin")?,
            }),
            None => None,
        };

        let role = match kind {
            NpcKind::Enemies => {
                if defeated_by.is_none() {
                    return Err(anyhow!("enemy '{id}' cannot be defeated: 'toDefeat' missing"));
                }
                NpcRole::Enemy {
                    you_lose: field(&def.you_lose, "youLose")?,
                }
            },
            NpcKind::Thieves => NpcRole::Thief {
                desires: field(&def.desires, "desires")?,
                you_lose: field(&def.you_lose, "youLose")?,
                you_cannot_lose: field(&def.you_cannot_lose, "youCannotLose")?,
            },
            NpcKind::Traders => NpcRole::Trader {
                desires: field(&def.desires, "desires")?,
                sells: field(&def.sells, "sells")?,
            },
        };

        Ok(Npc {
            id: id.to_string(),
            defeated_by,
            role,
            extra: def.extra.clone(),
        })
    }

    pub fn kind(&self) -> NpcKind {
        match self.role {
            NpcRole::Enemy { .. } => NpcKind::Enemies,
            NpcRole::Thief { .. } => NpcKind::Thieves,
            NpcRole::Trader { .. } => NpcKind::Traders,
        }
    }

    /// Convert back into the on-disk representation.
    pub fn to_def(&self) -> NpcDef {
        let mut def = NpcDef {
            to_defeat: self.defeated_by.as_ref().map(|d| d.item.clone()),
            you_win: self.defeated_by.as_ref().map(|d| d.message.clone()),
            extra: self.extra.clone(),
            ..NpcDef::default()
        };
        // ids named after their kind keep the compact form they were authored in
        if NpcKind::from_id(&self.id) != Some(self.kind()) {
            def.kind = Some(self.kind());
        }
        match &self.role {
            NpcRole::Enemy { you_lose } => def.you_lose = Some(you_lose.clone()),
            NpcRole::Thief {
                desires,
                you_lose,
                you_cannot_lose,
            } => {
                def.desires = Some(desires.clone());
                def.you_lose = Some(you_lose.clone());
                def.you_cannot_lose = Some(you_cannot_lose.clone());
            },
            NpcRole::Trader { desires, sells } => {
                def.desires = Some(desires.clone());
                def.sells = Some(sells.clone());
            },
        }
        def
    }
}
