#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** TextDungeon **
//! Single-player text adventure engine

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use dungeon_engine::config::{CONFIG_FILE, load_config};
use dungeon_engine::data_paths::data_path;
use dungeon_engine::{DUNGEON_VERSION, Session, View, WorldStore, run_repl};

#[derive(Parser)]
#[command(author, version, about = "Explore a text dungeon described by a JSON map.")]
struct Cli {
    /// Map document to play. Defaults to the configured map.
    map: Option<PathBuf>,
    /// Where to keep the working copy of the map while playing.
    #[arg(long)]
    working_copy: Option<PathBuf>,
    /// Engine configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    info!("Start: TextDungeon v{DUNGEON_VERSION}");

    let config_path = cli.config.unwrap_or_else(|| data_path(CONFIG_FILE));
    let config = load_config(&config_path);
    let map_path = cli.map.unwrap_or(config.map_path);
    let working_copy = cli.working_copy.unwrap_or(config.working_copy);

    let store = WorldStore::new(map_path, working_copy);
    let mut session = Session::open(store).context("while starting the session")?;
    info!("map loaded successfully, starting the game");

    let mut view = config.wrap_width.map_or_else(View::new, View::with_width);
    session.start(&mut view)?;
    view.flush();

    run_repl(&mut session, &mut view)
}
