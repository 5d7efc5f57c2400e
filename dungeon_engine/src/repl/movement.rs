//! `repl::movement` module
//!
//! Contains repl loop handlers for commands that change player location

use anyhow::{Result, anyhow};
use log::info;

use crate::repl::npc::{Encounter, resolve_encounter};
use crate::room::Direction;
use crate::store::WorldStore;
use crate::world::MessageTag;
use crate::{DungeonWorld, View, ViewItem};

/// Result of a move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No exit that way, or the entry requirement wasn't met.
    Stayed,
    /// The player now stands in the destination room.
    Moved,
    /// An enemy in the destination ended the run; the caller must restart.
    Defeated,
}

/// Move the player to a neighboring room, if an exit exists and its entry requirement is met.
///
/// Encounters in the destination are resolved before the player's location
/// changes. The destination is not described here; the turn ends with a
/// description of wherever the player stands.
///
/// # Errors
/// - if the player's room or the exit's destination is missing from the world
/// - if the working copy cannot be written after an encounter changed state
pub fn move_to_handler(
    world: &mut DungeonWorld,
    view: &mut View,
    store: &WorldStore,
    direction: Direction,
) -> Result<MoveOutcome> {
    let leaving_id = world.player.location.clone();
    let Some(destination_id) = world.player_room_ref()?.exit_target(direction).cloned() else {
        view.push(ViewItem::ActionFailure(world.message(MessageTag::Deadend)));
        info!("player tried to go {direction} from '{leaving_id}': no exit");
        return Ok(MoveOutcome::Stayed);
    };

    let destination = world
        .rooms
        .get(&destination_id)
        .ok_or_else(|| anyhow!("invalid move destination ({destination_id})"))?;
    if let Some(required) = &destination.required_item
        && !world.player.has_item(required)
    {
        view.push(ViewItem::ActionFailure(destination.fail_to_enter.clone()));
        info!("player denied access to '{destination_id}': missing item '{required}'");
        return Ok(MoveOutcome::Stayed);
    }

    if resolve_encounter(world, view, store, &destination_id)? == Encounter::PlayerDefeated {
        return Ok(MoveOutcome::Defeated);
    }

    world.player.location.clone_from(&destination_id);
    info!("player moved {direction} from '{leaving_id}' to '{destination_id}'");
    Ok(MoveOutcome::Moved)
}
