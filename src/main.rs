//! Interactive AVL tree walkthrough.
//!
//! Reads one command per line (from stdin or a script), runs it against a
//! tree of integer keys, and prints the narration for each step followed by
//! the tree itself.
//!
//! Usage: cargo run -- [--history 10] [--log-level debug] [--script ops.txt]

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;

use arbor::command::{Command, Key, HELP};
use arbor::narration::Narrator;
use arbor::{AvlTree, RotationStats};
use color_eyre::eyre::{Result, WrapErr};
use log::{info, warn, LevelFilter};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "arbor", about = "Step through AVL tree insertions, deletions and searches")]
struct Options {
    /// Number of lines kept in the activity log
    #[structopt(long, default_value = "10")]
    history: usize,
    /// Terminal log level (off, error, warn, info, debug, trace)
    #[structopt(long, default_value = "warn")]
    log_level: LevelFilter,
    /// Also write a full trace-level log to this file
    #[structopt(long, parse(from_os_str))]
    log_file: Option<PathBuf>,
    /// Read commands from this file instead of stdin
    #[structopt(short, long, parse(from_os_str))]
    script: Option<PathBuf>,
    /// Do not print the tree after every command
    #[structopt(short, long)]
    quiet: bool,
}

fn initialize_logging(options: &Options) -> Result<()> {
    use simplelog::*;

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        options.log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = &options.log_file {
        let file = File::create(path)
            .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
        loggers.push(WriteLogger::new(LevelFilter::Trace, Config::default(), file));
    }
    CombinedLogger::init(loggers).wrap_err("failed to install logger")?;
    return Ok(());
}

struct Session {
    tree: AvlTree<Key>,
    narrator: Narrator,
    stats: RotationStats,
    quiet: bool,
}

impl Session {
    fn new(options: &Options) -> Session {
        return Session {
            tree: AvlTree::new(),
            narrator: Narrator::new(options.history),
            stats: RotationStats::new(),
            quiet: options.quiet,
        };
    }

    /// Run one command. Returns `false` when the session should end.
    fn run(&mut self, command: Command, out: &mut impl Write) -> io::Result<bool> {
        let mut observer = (&mut self.narrator, &mut self.stats);
        let changed = match command {
            Command::Insert(key) => {
                observer.0.announce("Insert", format!("Insert {key}"));
                self.tree.insert_observed(key, &mut observer)
            }
            Command::Delete(key) => {
                observer.0.announce("Delete", format!("Delete {key}"));
                self.tree.delete_observed(&key, &mut observer)
            }
            Command::Search(key) => {
                observer.0.announce("Search", format!("Search {key}"));
                let search = self.tree.search_observed(&key, &mut observer);
                if let Some(last) = search.last_visited() {
                    writeln!(out, "  stopped at {last}")?;
                }
                false
            }
            Command::Reset => {
                self.tree.clear();
                self.narrator.reset();
                self.stats.reset();
                true
            }
            Command::Show => {
                write!(out, "{}", self.tree.snapshot())?;
                return Ok(true);
            }
            Command::Log => {
                for line in self.narrator.log().iter() {
                    writeln!(out, "  {line}")?;
                }
                return Ok(true);
            }
            Command::Stats => {
                writeln!(out, "  {}", self.stats)?;
                return Ok(true);
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(true);
            }
            Command::Quit => return Ok(false),
        };

        for line in self.narrator.take_transcript() {
            writeln!(out, "  {line}")?;
        }
        writeln!(out, "Operation: {}", self.narrator.operation())?;
        if changed && !self.quiet {
            write!(out, "{}", self.tree.snapshot())?;
        }
        return Ok(true);
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let options = Options::from_args();
    initialize_logging(&options)?;

    let (input, interactive): (Box<dyn BufRead>, bool) = match &options.script {
        Some(path) => {
            let file = File::open(path)
                .wrap_err_with(|| format!("failed to open script {}", path.display()))?;
            (Box::new(BufReader::new(file)), false)
        }
        None => (Box::new(io::stdin().lock()), io::stdin().is_terminal()),
    };

    let mut session = Session::new(&options);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if interactive {
        writeln!(out, "{HELP}")?;
    }

    let mut lines = input.lines();
    loop {
        if interactive {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.wrap_err("failed to read command")?;
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                info!("running {command:?}");
                if !session.run(command, &mut out)? {
                    break;
                }
            }
            Err(err) => {
                warn!("rejected input {line:?}: {err}");
                writeln!(out, "error: {err}")?;
            }
        }
    }

    out.flush()?;
    return Ok(());
}
