//! `repl::system` module
//!
//! Contains repl loop handlers for commands that are for system utilities.

use anyhow::{Context, Result};
use log::info;

use crate::repl::ReplControl;
use crate::store::WorldStore;
use crate::world::MessageTag;
use crate::{DungeonWorld, View, ViewItem};

pub const RESTARTED_MSG: &str = "Game has successfully been restarted";
pub const QUITTING_MSG: &str = "Quitting the game...";

/// Show available commands.
pub fn help_handler(world: &DungeonWorld, view: &mut View) {
    view.push(ViewItem::Help(world.message(MessageTag::HelpCmd)));
}

/// Quit the game, removing the working copy.
///
/// # Errors
/// - if the working copy exists but cannot be removed
pub fn quit_handler(world: &DungeonWorld, view: &mut View, store: &WorldStore) -> Result<ReplControl> {
    info!("player quit in '{}'", world.player.location);
    info!("ending inventory: {:?}", world.player.inventory);
    store.discard().context("while discarding working copy")?;
    view.push(ViewItem::EngineMessage(QUITTING_MSG.to_string()));
    Ok(ReplControl::Quit)
}
