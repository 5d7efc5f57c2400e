//! Line input for the dungeon REPL.
//!
//! A terminal gets a rustyline editor that completes action words and keeps
//! history between games. Piped input is read line by line from stdin.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use log::{info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

/// One read from the player.
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

const COMMAND_TERMS: &[&str] = &[
    "east",
    "help",
    "inventory",
    "look",
    "north",
    "quit",
    "restart",
    "south",
    "take",
    "use",
    "west",
];

/// Rustyline helper that completes the first word of a command.
#[derive(Default)]
pub struct CommandCompleter;

impl Helper for CommandCompleter {}
impl Hinter for CommandCompleter {
    type Hint = String;
}
impl Highlighter for CommandCompleter {}
impl Validator for CommandCompleter {}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let typed = &line[..pos];
        let word = typed.trim_start();
        Ok((pos - word.len(), command_completions(word)))
    }
}

/// Only the action word is completed; item names are free text.
fn command_completions(word: &str) -> Vec<Pair> {
    if word.is_empty() || word.contains(char::is_whitespace) {
        return Vec::new();
    }
    let lower = word.to_lowercase();
    COMMAND_TERMS
        .iter()
        .filter(|term| term.starts_with(&lower))
        .map(|term| Pair {
            display: (*term).to_string(),
            replacement: (*term).to_string(),
        })
        .collect()
}

/// Where player input comes from for the lifetime of the REPL.
pub enum LineReader {
    Terminal {
        editor: Box<Editor<CommandCompleter, DefaultHistory>>,
        history: Option<PathBuf>,
    },
    Piped,
}

impl LineReader {
    /// Use an editor when stdin is a terminal and one can be created.
    pub fn open() -> LineReader {
        if !io::stdin().is_terminal() {
            info!("stdin is not a terminal, reading plain lines");
            return LineReader::Piped;
        }
        match Editor::<CommandCompleter, DefaultHistory>::new() {
            Ok(mut editor) => {
                editor.set_helper(Some(CommandCompleter));
                let history = history_file();
                if let Some(path) = &history
                    && path.exists()
                    && let Err(err) = editor.load_history(path)
                {
                    warn!("could not load history from '{}': {err}", path.display());
                }
                LineReader::Terminal {
                    editor: Box::new(editor),
                    history,
                }
            },
            Err(err) => {
                warn!("line editor unavailable ({err}), reading plain lines");
                LineReader::Piped
            },
        }
    }

    /// Prompt for and read the next line.
    ///
    /// # Errors
    /// - if the terminal or stdin cannot be read
    pub fn read(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self {
            LineReader::Terminal { editor, .. } => match editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty()
                        && let Err(err) = editor.add_history_entry(line.as_str())
                    {
                        warn!("could not record history entry: {err}");
                    }
                    Ok(InputEvent::Line(line))
                },
                Err(err) => readline_event(err),
            },
            LineReader::Piped => {
                print!("{prompt}");
                io::stdout().flush()?;
                let mut line = String::new();
                if io::stdin().lock().read_line(&mut line)? == 0 {
                    return Ok(InputEvent::Eof);
                }
                Ok(InputEvent::Line(line.trim_end_matches(['\r', '\n']).to_string()))
            },
        }
    }

    /// Write the session's history out, once the REPL is done.
    pub fn save_history(&mut self) {
        if let LineReader::Terminal {
            editor,
            history: Some(path),
        } = self
        {
            if let Some(dir) = path.parent()
                && let Err(err) = std::fs::create_dir_all(dir)
            {
                warn!("could not create history directory '{}': {err}", dir.display());
                return;
            }
            if let Err(err) = editor.save_history(path) {
                warn!("could not save history to '{}': {err}", path.display());
            }
        }
    }
}

fn readline_event(err: ReadlineError) -> io::Result<InputEvent> {
    match err {
        ReadlineError::Interrupted => Ok(InputEvent::Interrupted),
        ReadlineError::Eof => Ok(InputEvent::Eof),
        ReadlineError::Io(io_err) => Err(io_err),
        other => Err(io::Error::other(other)),
    }
}

fn history_file() -> Option<PathBuf> {
    dirs::data_local_dir().map(|base| base.join("dungeon_engine").join("history.txt"))
}
