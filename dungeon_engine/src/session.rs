//! Game session: one player, one map, one command at a time.
//!
//! A [`Session`] owns the live [`DungeonWorld`], the store that keeps the
//! working copy in sync, and the untouched map document used for restarts.
//! Presentation layers feed it input with [`Session::submit_line`] and read
//! the turn's output from the [`View`] they pass in.

use anyhow::Result;
use dungeon_data::MapDef;
use log::{error, info, warn};

use crate::command::{Command, parse_command};
use crate::loader::{build_world_from_def, load_world};
use crate::repl::{
    MoveOutcome, RESTARTED_MSG, ReplControl, describe_handler, help_handler, inv_handler, look_handler,
    move_to_handler, persist_world, quit_handler, take_handler, use_handler,
};
use crate::store::WorldStore;
use crate::world::MessageTag;
use crate::{DungeonWorld, View, ViewItem};

pub struct Session {
    store: WorldStore,
    pristine: MapDef,
    world: DungeonWorld,
    turn_count: usize,
    ended: bool,
}

impl Session {
    /// Load the map behind `store` and start a fresh session in the start room.
    ///
    /// # Errors
    /// - if the map is missing, corrupt or fails validation
    pub fn open(store: WorldStore) -> Result<Session> {
        let (pristine, world) = load_world(&store)?;
        info!("session opened on '{}'", store.source().display());
        Ok(Session {
            store,
            pristine,
            world,
            turn_count: 0,
            ended: false,
        })
    }

    pub fn world(&self) -> &DungeonWorld {
        &self.world
    }

    pub fn store(&self) -> &WorldStore {
        &self.store
    }

    /// True once the player has quit or a fatal error stopped the session.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Show the opening text and the start room.
    ///
    /// # Errors
    /// - if the player's room is missing from the world
    pub fn start(&self, view: &mut View) -> Result<()> {
        if !self.world.opening.is_empty() {
            view.push(ViewItem::Opening(self.world.opening.clone()));
        }
        describe_handler(&self.world, view)
    }

    /// Rebuild the world from the map as originally loaded and rewrite the working copy.
    ///
    /// # Errors
    /// - if the working copy cannot be written
    pub fn reload(&mut self) -> Result<()> {
        self.world = build_world_from_def(&self.pristine)?;
        persist_world(&self.world, &self.store)?;
        info!("session reloaded from '{}'", self.store.source().display());
        Ok(())
    }

    /// Process one line of player input, pushing everything the player should see to `view`.
    ///
    /// Returns `ReplControl::Quit` once the session is over. After a fatal error
    /// the session is ended and later input is ignored.
    ///
    /// # Errors
    /// - if the working copy cannot be written or removed
    pub fn submit_line(&mut self, line: &str, view: &mut View) -> Result<ReplControl> {
        if self.ended {
            warn!("input '{line}' ignored: session has ended");
            return Ok(ReplControl::Quit);
        }
        self.turn_count += 1;
        info!("================> BEGIN TURN {} <================", self.turn_count);

        let result = self.run_turn(line, view);
        match &result {
            Ok(ReplControl::Quit) => self.ended = true,
            Ok(ReplControl::Continue) => {},
            Err(e) => {
                error!("session stopped: {e:#}");
                self.ended = true;
            },
        }
        result
    }

    /// Same as [`Session::submit_line`], handing each output line to `on_output` in order.
    ///
    /// # Errors
    /// - see [`Session::submit_line`]; lines produced before the failure are still delivered
    pub fn submit_line_with(&mut self, line: &str, mut on_output: impl FnMut(&str)) -> Result<ReplControl> {
        let mut view = View::new();
        let control = self.submit_line(line, &mut view);
        for text in view.drain_lines() {
            on_output(&text);
        }
        control
    }

    fn run_turn(&mut self, line: &str, view: &mut View) -> Result<ReplControl> {
        #[allow(clippy::enum_glob_use)]
        use Command::*;

        let command = parse_command(line);
        match &command {
            Missing => {
                view.push(ViewItem::Error(self.world.message(MessageTag::MissingCmd)));
                return Ok(ReplControl::Continue);
            },
            Move(direction) => {
                if move_to_handler(&mut self.world, view, &self.store, *direction)? == MoveOutcome::Defeated {
                    self.restart(view)?;
                }
            },
            Look => look_handler(&self.world, view)?,
            Take(item) => take_handler(&mut self.world, view, &self.store, item)?,
            Use(item) => use_handler(&mut self.world, view, &self.store, item)?,
            Inventory => inv_handler(&self.world, view),
            Help => help_handler(&self.world, view),
            Restart => self.restart(view)?,
            Quit => return quit_handler(&self.world, view, &self.store),
            Unknown(word) => {
                info!("unrecognized command '{word}'");
                view.push(ViewItem::Error(self.world.message(MessageTag::InvalidCmd)));
            },
        }

        if self.world.player_room_ref()?.is_terminal() {
            describe_handler(&self.world, view)?;
            view.push(ViewItem::Victory(self.world.message(MessageTag::Victory)));
            info!("player reached the exit after {} turns", self.turn_count);
            self.restart(view)?;
        }

        describe_handler(&self.world, view)?;
        Ok(ReplControl::Continue)
    }

    fn restart(&mut self, view: &mut View) -> Result<()> {
        view.push(ViewItem::EngineMessage(RESTARTED_MSG.to_string()));
        self.reload()
    }
}
