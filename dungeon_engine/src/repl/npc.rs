//! `repl::npc` module
//!
//! Encounter resolution, run once every time the player enters a room with an NPC.

use anyhow::Result;
use log::info;

use crate::npc::NpcRole;
use crate::repl::persist_world;
use crate::store::WorldStore;
use crate::{DungeonWorld, View, ViewItem};

/// How an encounter ended for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encounter {
    Survived,
    PlayerDefeated,
}

/// Resolve the NPC stationed in `room_id` against the player's inventory.
///
/// Carrying the NPC's defeating item always wins; a beaten enemy is removed
/// from the room for good. Otherwise enemies defeat the player, thieves take
/// what they desire (or grumble if it isn't carried) and traders do nothing.
///
/// # Errors
/// - if the working copy cannot be written
pub fn resolve_encounter(
    world: &mut DungeonWorld,
    view: &mut View,
    store: &WorldStore,
    room_id: &str,
) -> Result<Encounter> {
    let Some(npc) = world.rooms.get(room_id).and_then(|room| world.npc_in(room)).cloned() else {
        return Ok(Encounter::Survived);
    };

    if let Some(defeat) = &npc.defeated_by
        && world.player.has_item(&defeat.item)
    {
        view.push(ViewItem::NpcEncounter(defeat.message.clone()));
        info!("player beat npc '{}' in '{room_id}' with '{}'", npc.id, defeat.item);
        if npc.role.is_enemy() {
            if let Some(room) = world.rooms.get_mut(room_id) {
                room.clear_npc();
            }
            persist_world(world, store)?;
        }
        return Ok(Encounter::Survived);
    }

    match &npc.role {
        NpcRole::Enemy { you_lose } => {
            view.push(ViewItem::NpcEncounter(you_lose.clone()));
            info!("player was defeated by npc '{}' in '{room_id}'", npc.id);
            Ok(Encounter::PlayerDefeated)
        },
        NpcRole::Thief {
            desires,
            you_lose,
            you_cannot_lose,
        } => {
            // the working copy is rewritten whether or not anything was taken
            let stolen = world.player.remove_item(desires);
            persist_world(world, store)?;
            if stolen {
                view.push(ViewItem::NpcEncounter(you_lose.clone()));
                info!("npc '{}' stole '{desires}' from the player", npc.id);
            } else {
                view.push(ViewItem::NpcEncounter(you_cannot_lose.clone()));
                info!("npc '{}' found nothing to steal", npc.id);
            }
            Ok(Encounter::Survived)
        },
        NpcRole::Trader { .. } => Ok(Encounter::Survived),
    }
}
