//! `repl::look` module
//!
//! Handlers that show the player's surroundings without changing anything.

use anyhow::Result;

use crate::{DungeonWorld, View};

/// Describe the room the player is standing in.
///
/// # Errors
/// - if the player's room is missing from the world
pub fn describe_handler(world: &DungeonWorld, view: &mut View) -> Result<()> {
    world.player_room_ref()?.describe(view);
    Ok(())
}

/// List what lies in each direction from the current room.
///
/// # Errors
/// - if the player's room is missing from the world
pub fn look_handler(world: &DungeonWorld, view: &mut View) -> Result<()> {
    world.player_room_ref()?.show_surroundings(view);
    Ok(())
}
