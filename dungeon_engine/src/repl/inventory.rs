//! `repl::inventory` module
//!
//! Contains repl loop handlers for commands that affect player inventory

use anyhow::Result;
use log::info;

use crate::npc::NpcRole;
use crate::repl::persist_world;
use crate::store::WorldStore;
use crate::world::MessageTag;
use crate::{DungeonWorld, View, ViewItem};

/// Removes an item from the current room and adds it to inventory.
///
/// # Errors
/// - if the player's room is missing or the working copy cannot be written
pub fn take_handler(world: &mut DungeonWorld, view: &mut View, store: &WorldStore, item: &str) -> Result<()> {
    if item.is_empty() {
        view.push(ViewItem::Error(world.message(MessageTag::MissingItem)));
        return Ok(());
    }

    let taken = world.player_room_mut()?.remove_item(item);
    if taken {
        world.player.add_item(item);
        persist_world(world, store)?;
        view.push(ViewItem::ActionSuccess(format!("You now have the {item}.")));
        info!("player took '{item}' from '{}'", world.player.location);
    } else {
        view.push(ViewItem::ActionFailure(world.message(MessageTag::NoItemHere)));
    }
    Ok(())
}

/// Use a carried item. The only effect an item can have is being traded to
/// a trader in the current room who desires it.
///
/// # Errors
/// - if the player's room is missing or the working copy cannot be written
pub fn use_handler(world: &mut DungeonWorld, view: &mut View, store: &WorldStore, item: &str) -> Result<()> {
    if item.is_empty() {
        view.push(ViewItem::Error(world.message(MessageTag::MissingItem)));
        return Ok(());
    }
    if !world.player.has_item(item) {
        view.push(ViewItem::ActionFailure(
            "You do not have such item in your inventory.".to_string(),
        ));
        return Ok(());
    }

    let room = world.player_room_ref()?;
    let offer = world.npc_in(room).and_then(|npc| match &npc.role {
        NpcRole::Trader { desires, sells } if desires == item => Some((npc.id.clone(), sells.clone())),
        _ => None,
    });

    if let Some((trader, sells)) = offer {
        world.player.remove_item(item);
        world.player.add_item(sells.clone());
        persist_world(world, store)?;
        view.push(ViewItem::ActionSuccess(format!(
            "You successfully traded your {item} with the {sells}!"
        )));
        info!("player traded '{item}' to '{trader}' for '{sells}'");
    } else {
        view.push(ViewItem::ActionFailure(format!(
            "You can't use your {item} here, try in a different room!"
        )));
    }
    Ok(())
}

/// Show the player's inventory, in the order items were acquired.
pub fn inv_handler(world: &DungeonWorld, view: &mut View) {
    if world.player.inventory.is_empty() {
        view.push(ViewItem::ActionFailure(world.message(MessageTag::EmptyInventory)));
    } else {
        view.push(ViewItem::InventoryList(world.player.inventory.clone()));
    }
}
