use std::fs;
use std::path::Path;

use dungeon_data::MapDef;
use dungeon_engine::command::{Command, parse_command};
use dungeon_engine::repl::ReplControl;
use dungeon_engine::{Direction, Session, StoreError, View, WorldStore};
use tempfile::{TempDir, tempdir};

const MAP: &str = r#"{
    "opening": "Welcome to the test dungeon.",
    "genericMsgs": {
        "missingCmd": "Say something.",
        "invalidCmd": "Huh?",
        "deadend": "Dead end.",
        "noItemHere": "Nothing like that here.",
        "emptyInventory": "You carry nothing.",
        "helpCmd": "Help text."
    },
    "rooms": {
        "start": {
            "description": "Start room.",
            "items": ["sword"],
            "north": "hall", "east": "vault", "west": "lair", "south": "den",
            "requiredItem": "none", "npcType": "none", "failToEnter": ""
        },
        "hall": {
            "description": "Hall.",
            "items": [],
            "south": "start", "north": "market",
            "requiredItem": "none", "npcType": "none", "failToEnter": ""
        },
        "vault": {
            "description": "Vault.",
            "items": [],
            "west": "start",
            "requiredItem": "key", "npcType": "none", "failToEnter": "The vault is locked."
        },
        "lair": {
            "description": "Lair.",
            "items": [],
            "east": "start",
            "requiredItem": "none", "npcType": "enemies", "npc": "troll", "failToEnter": ""
        },
        "den": {
            "description": "Den.",
            "items": ["gold"],
            "north": "start",
            "requiredItem": "none", "npcType": "thieves", "failToEnter": ""
        },
        "market": {
            "description": "Market.",
            "items": ["gem"],
            "south": "hall", "north": "gate",
            "requiredItem": "none", "npcType": "traders", "failToEnter": ""
        },
        "gate": {
            "name": "exit",
            "description": "The way out.",
            "items": [],
            "south": "market",
            "requiredItem": "map", "npcType": "none", "failToEnter": "You need a map."
        }
    },
    "npcs": {
        "enemies": {"toDefeat": "sword", "youWin": "The troll flees.", "youLose": "The troll crushes you."},
        "thieves": {"desires": "gold", "youLose": "Your gold is stolen!", "youCannotLose": "The thief finds nothing."},
        "traders": {"desires": "gem", "sells": "map"}
    },
    "inventory": []
}"#;

fn write_map(dir: &Path, map: &str) -> WorldStore {
    let source = dir.join("orig_map.json");
    fs::write(&source, map).unwrap();
    WorldStore::new(source, dir.join("map_copy.json"))
}

fn open_session() -> (TempDir, Session) {
    open_session_with(MAP)
}

fn open_session_with(map: &str) -> (TempDir, Session) {
    let dir = tempdir().unwrap();
    let session = Session::open(write_map(dir.path(), map)).unwrap();
    (dir, session)
}

fn play(session: &mut Session, line: &str) -> Vec<String> {
    let mut view = View::with_width(80);
    session.submit_line(line, &mut view).unwrap();
    view.drain_lines()
}

fn working_copy(session: &Session) -> MapDef {
    serde_json::from_str(&fs::read_to_string(session.store().working_copy()).unwrap()).unwrap()
}

#[test]
fn test_command_parse() {
    assert_eq!(parse_command("n"), Command::Move(Direction::North));
    assert!(parse_command("look").is_look());
}

#[test]
fn test_start_shows_opening_and_room() {
    let (_dir, session) = open_session();
    let mut view = View::with_width(80);
    session.start(&mut view).unwrap();
    assert_eq!(
        view.drain_lines(),
        vec!["Welcome to the test dungeon.", "Start room.", "You see: sword"]
    );
}

#[test]
fn test_move_then_look_lists_exits() {
    let (_dir, mut session) = open_session();
    assert_eq!(play(&mut session, "north"), vec!["Hall."]);
    assert_eq!(
        play(&mut session, "look"),
        vec!["To the north you see a market", "To the south you see a start", "Hall."]
    );
    assert_eq!(session.world().player.location, "hall");
}

#[test]
fn test_take_then_inventory() {
    let (_dir, mut session) = open_session();
    assert_eq!(play(&mut session, "take sword"), vec!["You now have the sword.", "Start room."]);
    assert_eq!(play(&mut session, "inventory"), vec!["You have: sword", "Start room."]);
}

#[test]
fn test_required_item_blocks_entry() {
    let (_dir, mut session) = open_session();
    assert_eq!(
        play(&mut session, "east"),
        vec!["The vault is locked.", "Start room.", "You see: sword"]
    );
    assert_eq!(session.world().player.location, "start");
}

#[test]
fn test_losing_to_an_enemy_restarts() {
    let (dir, mut session) = open_session();
    play(&mut session, "south");
    play(&mut session, "take gold");
    play(&mut session, "north");
    assert_eq!(session.world().player.inventory, vec!["gold"]);

    assert_eq!(
        play(&mut session, "west"),
        vec![
            "The troll crushes you.",
            "Game has successfully been restarted",
            "Start room.",
            "You see: sword",
        ]
    );

    let fresh = Session::open(WorldStore::new(
        dir.path().join("orig_map.json"),
        dir.path().join("other_copy.json"),
    ))
    .unwrap();
    assert_eq!(session.world(), fresh.world());
}

#[test]
fn test_trade_with_trader() {
    let (_dir, mut session) = open_session();
    play(&mut session, "n");
    play(&mut session, "n");
    play(&mut session, "take gem");
    assert_eq!(
        play(&mut session, "use gem"),
        vec!["You successfully traded your gem with the map!", "Market."]
    );
    assert_eq!(session.world().player.inventory, vec!["map"]);
    assert_eq!(working_copy(&session).inventory, vec!["map"]);
}

#[test]
fn test_beaten_enemy_never_returns() {
    let (_dir, mut session) = open_session();
    play(&mut session, "take sword");
    assert_eq!(play(&mut session, "west"), vec!["The troll flees.", "Lair."]);
    assert!(session.world().rooms["lair"].npc_id.is_none());
    assert_eq!(working_copy(&session).rooms["lair"].npc_type, None);

    play(&mut session, "east");
    assert_eq!(play(&mut session, "west"), vec!["Lair."]);
}

#[test]
fn test_thief_strikes_on_every_entry() {
    let (_dir, mut session) = open_session();
    assert_eq!(
        play(&mut session, "south"),
        vec!["The thief finds nothing.", "Den.", "You see: gold"]
    );
    play(&mut session, "take gold");
    play(&mut session, "north");
    assert_eq!(play(&mut session, "south"), vec!["Your gold is stolen!", "Den."]);
    assert!(session.world().player.inventory.is_empty());
    assert!(working_copy(&session).inventory.is_empty());
}

#[test]
fn test_beaten_thief_keeps_its_post() {
    let map = MAP
        .replace(
            r#""desires": "gold", "youLose""#,
            r#""toDefeat": "amulet", "youWin": "The thief cowers.", "desires": "gold", "youLose""#,
        )
        .replace(r#""inventory": []"#, r#""inventory": ["amulet"]"#);
    let (_dir, mut session) = open_session_with(&map);

    assert_eq!(
        play(&mut session, "south"),
        vec!["The thief cowers.", "Den.", "You see: gold"]
    );
    play(&mut session, "take gold");
    play(&mut session, "north");
    assert_eq!(play(&mut session, "south"), vec!["The thief cowers.", "Den."]);

    assert_eq!(session.world().rooms["den"].npc_id.as_deref(), Some("thieves"));
    assert_eq!(working_copy(&session).rooms["den"].npc_type.as_deref(), Some("thieves"));
    assert_eq!(session.world().player.inventory, vec!["amulet", "gold"]);
}

#[test]
fn test_trader_ignores_items_it_does_not_want() {
    let (_dir, mut session) = open_session();
    play(&mut session, "take sword");
    play(&mut session, "n");
    play(&mut session, "n");
    assert_eq!(
        play(&mut session, "use sword"),
        vec![
            "You can't use your sword here, try in a different room!",
            "Market.",
            "You see: gem",
        ]
    );
    assert_eq!(session.world().player.inventory, vec!["sword"]);
    assert_eq!(session.world().rooms["market"].items, vec!["gem"]);
}

#[test]
fn test_unknown_keys_reach_the_working_copy() {
    let map = MAP
        .replace(
            r#""opening": "Welcome to the test dungeon.","#,
            r#""opening": "Welcome to the test dungeon.", "title": "Test Keep","#,
        )
        .replace(
            r#""desires": "gem", "sells": "map""#,
            r#""desires": "gem", "sells": "map", "greeting": "Well met.""#,
        );
    let (_dir, mut session) = open_session_with(&map);
    play(&mut session, "take sword");

    let copy: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(session.store().working_copy()).unwrap()).unwrap();
    assert_eq!(copy["title"], "Test Keep");
    assert_eq!(copy["npcs"]["traders"]["greeting"], "Well met.");
    assert_eq!(copy["inventory"][0], "sword");
}

#[test]
fn test_reaching_the_exit_wins_and_restarts() {
    let (_dir, mut session) = open_session();
    play(&mut session, "north");
    assert_eq!(play(&mut session, "north"), vec!["Market.", "You see: gem"]);
    assert_eq!(play(&mut session, "north"), vec!["You need a map.", "Market.", "You see: gem"]);
    play(&mut session, "take gem");
    play(&mut session, "use gem");

    assert_eq!(
        play(&mut session, "north"),
        vec![
            "The way out.",
            "You have escaped!",
            "Game has successfully been restarted",
            "Start room.",
            "You see: sword",
        ]
    );
    assert_eq!(session.world().player.location, "start");
    assert!(session.world().player.inventory.is_empty());
}

#[test]
fn test_dead_end_keeps_player_in_place() {
    let (_dir, mut session) = open_session();
    play(&mut session, "north");
    assert_eq!(play(&mut session, "east"), vec!["Dead end.", "Hall."]);
    assert_eq!(session.world().player.location, "hall");
}

#[test]
fn test_empty_input_does_not_redescribe() {
    let (_dir, mut session) = open_session();
    assert_eq!(play(&mut session, "   "), vec!["Say something."]);
}

#[test]
fn test_unknown_and_help_commands() {
    let (_dir, mut session) = open_session();
    assert_eq!(play(&mut session, "dance"), vec!["Huh?", "Start room.", "You see: sword"]);
    assert_eq!(play(&mut session, "H"), vec!["Help text.", "Start room.", "You see: sword"]);
}

#[test]
fn test_take_failures() {
    let (_dir, mut session) = open_session();
    assert_eq!(
        play(&mut session, "take"),
        vec![
            "Command should be followed by specific item. E.g. Sword",
            "Start room.",
            "You see: sword",
        ]
    );
    assert_eq!(
        play(&mut session, "take Sword"),
        vec!["Nothing like that here.", "Start room.", "You see: sword"]
    );
    assert!(session.world().player.inventory.is_empty());
}

#[test]
fn test_use_failures() {
    let (_dir, mut session) = open_session();
    assert_eq!(
        play(&mut session, "use sword"),
        vec!["You do not have such item in your inventory.", "Start room.", "You see: sword"]
    );
    play(&mut session, "take sword");
    assert_eq!(
        play(&mut session, "use sword"),
        vec!["You can't use your sword here, try in a different room!", "Start room."]
    );
    assert_eq!(session.world().player.inventory, vec!["sword"]);
}

#[test]
fn test_empty_inventory_message() {
    let (_dir, mut session) = open_session();
    assert_eq!(play(&mut session, "i"), vec!["You carry nothing.", "Start room.", "You see: sword"]);
}

#[test]
fn test_look_is_idempotent() {
    let (_dir, mut session) = open_session();
    let first = play(&mut session, "look");
    let second = play(&mut session, "l");
    assert_eq!(first, second);
    assert_eq!(first.len(), 6);
}

#[test]
fn test_pickup_moves_item_exactly_once() {
    let (_dir, mut session) = open_session();
    play(&mut session, "take sword");
    assert_eq!(play(&mut session, "take sword")[0], "Nothing like that here.");
    assert_eq!(session.world().player.inventory, vec!["sword"]);
    assert!(session.world().rooms["start"].items.is_empty());

    let copy = working_copy(&session);
    assert_eq!(copy.inventory, vec!["sword"]);
    assert!(copy.rooms["start"].items.is_empty());
    let source: MapDef =
        serde_json::from_str(&fs::read_to_string(session.store().source()).unwrap()).unwrap();
    assert_eq!(source.rooms["start"].items, vec!["sword"]);
}

#[test]
fn test_restart_replays_identically() {
    let (_dir, mut session) = open_session();
    let script = ["take sword", "west", "east", "south", "north", "n", "n", "take gem", "use gem", "i"];

    let first: Vec<Vec<String>> = script.iter().map(|line| play(&mut session, line)).collect();
    assert_eq!(
        play(&mut session, "restart"),
        vec!["Game has successfully been restarted", "Start room.", "You see: sword"]
    );
    assert_eq!(working_copy(&session).inventory, Vec::<String>::new());

    let second: Vec<Vec<String>> = script.iter().map(|line| play(&mut session, line)).collect();
    assert_eq!(first, second);
}

#[test]
fn test_quit_removes_working_copy_and_ends_session() {
    let (_dir, mut session) = open_session();
    play(&mut session, "take sword");
    assert!(session.store().working_copy().exists());

    let mut view = View::with_width(80);
    assert_eq!(session.submit_line("quit", &mut view).unwrap(), ReplControl::Quit);
    assert_eq!(view.drain_lines(), vec!["Quitting the game..."]);
    assert!(!session.store().working_copy().exists());
    assert!(session.is_ended());

    assert_eq!(session.submit_line("look", &mut view).unwrap(), ReplControl::Quit);
    assert!(view.is_empty());
}

#[test]
fn test_callback_receives_lines_in_order() {
    let (_dir, mut session) = open_session();
    let mut lines = Vec::new();
    let control = session
        .submit_line_with("take sword", |line| lines.push(line.to_string()))
        .unwrap();
    assert_eq!(control, ReplControl::Continue);
    assert_eq!(lines, vec!["You now have the sword.", "Start room."]);
}

#[test]
fn test_failed_persist_is_fatal() {
    let (_dir, mut session) = open_session();
    let copy = session.store().working_copy().to_path_buf();
    fs::remove_file(&copy).unwrap();
    fs::create_dir(&copy).unwrap();

    let mut view = View::with_width(80);
    assert!(session.submit_line("take sword", &mut view).is_err());
    assert!(session.is_ended());
    assert!(view.drain_lines().is_empty());
}

#[test]
fn test_missing_map_fails_to_open() {
    let dir = tempdir().unwrap();
    let store = WorldStore::new(dir.path().join("absent.json"), dir.path().join("map_copy.json"));
    let err = Session::open(store).err().unwrap();
    assert!(
        err.chain()
            .any(|cause| matches!(cause.downcast_ref::<StoreError>(), Some(StoreError::MapNotFound { .. })))
    );
}

#[test]
fn test_dangling_exit_fails_to_open() {
    let dir = tempdir().unwrap();
    let store = write_map(dir.path(), &MAP.replace(r#""south": "market""#, r#""south": "nowhere""#));
    let err = Session::open(store).err().unwrap();
    assert!(format!("{err:#}").contains("missing room 'nowhere'"));
}
