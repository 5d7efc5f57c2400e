#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const DUNGEON_VERSION: &str = env!("CARGO_PKG_VERSION");

pub use dungeon_data::Id;

// Core modules
pub mod command;
pub mod config;
pub mod data_paths;
pub mod loader;
pub mod npc;
pub mod player;
pub mod repl;
pub mod room;
pub mod session;
pub mod store;
pub mod style;
pub mod view;
pub mod world;

// Re-exports for convenience
pub use loader::load_world;
pub use player::Player;
pub use repl::run_repl;
pub use room::{Direction, Room};
pub use session::Session;
pub use store::{StoreError, WorldStore};
pub use view::{View, ViewItem};
pub use world::DungeonWorld;
