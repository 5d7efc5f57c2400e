//! REPL and command handling utilities.
//!
//! The game runs in a read-eval-print loop. This module and its submodules
//! implement the command handlers that manipulate the [`DungeonWorld`]; the
//! [`Session`](crate::Session) decides which of them a line of input reaches.

mod input;
pub mod inventory;
pub mod look;
pub mod movement;
pub mod npc;
pub mod system;

pub use inventory::*;
pub use look::*;
pub use movement::*;
pub use npc::*;
pub use system::*;

use anyhow::{Context, Result};

use crate::store::WorldStore;
use crate::style::GameStyle;
use crate::{DungeonWorld, Session, View, ViewItem};

use input::{InputEvent, LineReader};

/// Control flow signal used by handlers to exit the REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplControl {
    Continue,
    Quit,
}

/// Write the live world to the working copy.
///
/// # Errors
/// - if the document cannot be serialized or written
pub fn persist_world(world: &DungeonWorld, store: &WorldStore) -> Result<()> {
    store
        .persist(&world.to_def())
        .with_context(|| format!("while persisting to '{}'", store.working_copy().display()))
}

/// Run the main read–eval–print loop until the player quits.
///
/// Output of every turn is flushed before the next prompt. End of input is
/// treated as `quit`. Line history is saved when the loop ends.
///
/// # Errors
/// - Propagates fatal session failures, such as a working copy that cannot be written.
pub fn run_repl(session: &mut Session, view: &mut View) -> Result<()> {
    let mut input = LineReader::open();
    let outcome = turn_loop(session, view, &mut input);
    input.save_history();
    outcome
}

fn turn_loop(session: &mut Session, view: &mut View, input: &mut LineReader) -> Result<()> {
    loop {
        let prompt = "\n> ".prompt_style().to_string();

        let input_event = if let Ok(event) = input.read(&prompt) {
            event
        } else {
            view.push(ViewItem::Error("Failed to read input. Try again.".to_string()));
            view.flush();
            continue;
        };

        let line = match input_event {
            InputEvent::Line(line) => line,
            InputEvent::Eof => "quit".to_string(),
            InputEvent::Interrupted => {
                view.push(ViewItem::EngineMessage("Command canceled.".to_string()));
                view.flush();
                continue;
            },
        };

        let control = session.submit_line(&line, view);
        view.flush();
        if control? == ReplControl::Quit {
            break;
        }
    }
    Ok(())
}
