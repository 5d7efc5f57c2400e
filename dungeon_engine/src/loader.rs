//! Loader utilities for building a `DungeonWorld` from a map document.

use anyhow::{Context, Result};
use dungeon_data::{MapDef, START_ROOM};
use log::info;

use crate::npc::Npc;
use crate::store::WorldStore;
use crate::{DungeonWorld, Player, Room};

/// Load the map through `store` and return both the untouched document and the live world.
///
/// The document is kept by the session so that restarting never depends on
/// the (mutated) working copy.
///
/// # Errors
/// Errors bubble up from the store (missing or corrupt map) or from building the world.
pub fn load_world(store: &WorldStore) -> Result<(MapDef, DungeonWorld)> {
    let map = store
        .load()
        .with_context(|| format!("while loading map from '{}'", store.source().display()))?;
    let world = build_world_from_def(&map).context("while building world from map")?;
    Ok((map, world))
}

/// Convert a `MapDef` into a populated `DungeonWorld`, with the player at the start room.
///
/// # Errors
/// - if an NPC definition is incomplete
pub fn build_world_from_def(def: &MapDef) -> Result<DungeonWorld> {
    let mut world = DungeonWorld::new_empty();
    world.opening = def.opening.clone();
    world.messages = def.generic_msgs.clone();
    world.extra = def.extra.clone();

    for (room_id, room_def) in &def.rooms {
        world.rooms.insert(room_id.clone(), Room::from_def(room_id, room_def));
    }
    for (npc_id, npc_def) in &def.npcs {
        let npc = Npc::from_def(npc_id, npc_def)?;
        world.npcs.insert(npc_id.clone(), npc);
    }
    world.player = Player::new(START_ROOM, def.inventory.clone());

    info!("{} rooms added to DungeonWorld", world.rooms.len());
    info!("{} NPCs added to DungeonWorld", world.npcs.len());
    info!("player starts in '{START_ROOM}' carrying {:?}", world.player.inventory);
    Ok(world)
}
