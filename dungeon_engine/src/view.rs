//! View module.
//! This contains the view to the game world / messages.
//! Handlers never print directly: they push [`ViewItem`]s, and the presentation
//! layer either drains them as plain lines or flushes them, styled, to the terminal.
//! Items are always rendered in the order they were pushed.

use colored::ColoredString;
use textwrap::{Options, fill, termwidth};
use variantly::Variantly;

use crate::Id;
use crate::room::Direction;
use crate::style::GameStyle;

/// View aggregates the output of a turn until it is drained or flushed.
#[derive(Debug, Clone)]
pub struct View {
    pub width: usize,
    pub items: Vec<ViewItem>,
}

impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

impl View {
    /// Create a new empty view sized to the terminal.
    pub fn new() -> Self {
        Self {
            width: termwidth(),
            items: Vec::new(),
        }
    }

    /// Create a view that wraps at a fixed width.
    pub fn with_width(width: usize) -> Self {
        Self {
            width,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: ViewItem) {
        self.items.push(item);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Take everything queued so far as plain, unstyled lines.
    pub fn drain_lines(&mut self) -> Vec<String> {
        self.items.drain(..).map(|item| item.text()).collect()
    }

    /// Print everything queued so far to stdout, styled and wrapped.
    pub fn flush(&mut self) {
        let options = Options::new(self.width.max(20));
        for item in self.items.drain(..) {
            let wrapped = fill(&item.text(), &options);
            println!("{}", item.styled(wrapped));
        }
        println!();
    }
}

/// A single piece of player-visible output.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum ViewItem {
    Opening(String),
    RoomDescription(String),
    RoomItems(Vec<Id>),
    ExitView { direction: Direction, target: Id },
    ActionSuccess(String),
    ActionFailure(String),
    InventoryList(Vec<Id>),
    NpcEncounter(String),
    Help(String),
    Error(String),
    EngineMessage(String),
    Victory(String),
}

impl ViewItem {
    /// Plain text of this item, exactly as the player should read it.
    pub fn text(&self) -> String {
        match self {
            ViewItem::RoomItems(items) => format!("You see: {}", items.join(", ")),
            ViewItem::InventoryList(items) => format!("You have: {}", items.join(", ")),
            ViewItem::ExitView { direction, target } => format!("To the {direction} you see a {target}"),
            ViewItem::Opening(text)
            | ViewItem::RoomDescription(text)
            | ViewItem::ActionSuccess(text)
            | ViewItem::ActionFailure(text)
            | ViewItem::NpcEncounter(text)
            | ViewItem::Help(text)
            | ViewItem::Error(text)
            | ViewItem::EngineMessage(text)
            | ViewItem::Victory(text) => text.clone(),
        }
    }

    fn styled(&self, text: String) -> ColoredString {
        match self {
            ViewItem::Opening(_) | ViewItem::Victory(_) => text.triumph_style(),
            ViewItem::RoomDescription(_) => text.description_style(),
            ViewItem::RoomItems(_) | ViewItem::InventoryList(_) => text.item_style(),
            ViewItem::ExitView { .. } => text.exit_style(),
            ViewItem::ActionSuccess(_) => text.success_style(),
            ViewItem::ActionFailure(_) => text.denied_style(),
            ViewItem::NpcEncounter(_) => text.npc_style(),
            ViewItem::Help(_) => text.room_style(),
            ViewItem::Error(_) => text.error_style(),
            ViewItem::EngineMessage(_) => text.engine_style(),
        }
    }
}
