//! Commands understood by the interactive front end.
//!
//! Input is validated here so the engine only ever sees well-formed keys.

use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// Key type used by the front end.
pub type Key = i64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Insert(Key),
    Delete(Key),
    Search(Key),
    /// Empty the tree and the activity log.
    Reset,
    /// Print the current tree.
    Show,
    /// Print the activity log.
    Log,
    /// Print rotation counters.
    Stats,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{verb}` needs a key")]
    MissingKey { verb: String },
    #[error("`{input}` is not an integer key")]
    InvalidKey {
        input: String,
        #[source]
        source: ParseIntError,
    },
    #[error("unexpected argument `{0}`")]
    Trailing(String),
}

pub const HELP: &str = "\
commands:
  insert <key>   (i, +)  add a key
  delete <key>   (d, -)  remove a key
  search <key>   (s, ?)  walk from the root towards a key
  show                   print the tree
  log                    print the activity log
  stats                  print rotation counters
  reset                  empty the tree
  help                   print this message
  quit                   exit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Command, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "insert" | "i" | "+" => Command::Insert(parse_key(verb, words.next())?),
            "delete" | "d" | "-" => Command::Delete(parse_key(verb, words.next())?),
            "search" | "s" | "?" => Command::Search(parse_key(verb, words.next())?),
            "reset" | "clear" => Command::Reset,
            "show" | "tree" => Command::Show,
            "log" => Command::Log,
            "stats" => Command::Stats,
            "help" | "h" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(verb.to_string())),
        };

        if let Some(extra) = words.next() {
            return Err(CommandError::Trailing(extra.to_string()));
        }
        return Ok(command);
    }
}

fn parse_key(verb: &str, word: Option<&str>) -> Result<Key, CommandError> {
    let Some(word) = word else {
        return Err(CommandError::MissingKey { verb: verb.to_string() });
    };
    return word.parse().map_err(|source| CommandError::InvalidKey {
        input: word.to_string(),
        source,
    });
}
