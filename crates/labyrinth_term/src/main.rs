//! Terminal maze runner.
//!
//! Examples:
//!   labyrinth
//!   labyrinth play --size 21 --best-moves
//!   labyrinth --seed 0x1234 play --difficulty hard
//!   labyrinth paths
//!   labyrinth reset
//!
//! Progress is kept in the OS data dir; override with `--data-dir DIR`.
//!
//! Storage locations:
//! - Linux: ~/.local/share/labyrinth/
//! - Windows: %APPDATA%\labyrinth\
//! - MacOS: ~/Library/Application Support/labyrinth/

use std::fs;
use std::io::{self, BufRead, ErrorKind, Write};
use std::path::PathBuf;
use std::process;

use labyrinth::generator::MazeDifficulty;
use labyrinth::grid::Direction;
use labyrinth::ledger::LedgerPolicy;
use labyrinth::session::{Input, SessionController, SessionEvent};
use labyrinth::store::KeyValueStore;
use labyrinth::traversal::RejectReason;
use tracing::{error, info};

mod config;
mod error;
mod paths;
mod render;
mod store;

use config::Overrides;
use error::AppError;
use paths::AppPaths;
use store::JsonFileStore;

fn usage() -> ! {
    eprintln!("labyrinth: walk from @ to E through a freshly carved maze");
    eprintln!("Usage: labyrinth [--data-dir DIR] [--seed N] [command] [flags]\n");
    eprintln!("Commands:");
    eprintln!("  play (default)              Play until quit or end of input");
    eprintln!("  paths                       Show data directory and file paths");
    eprintln!("  reset                       Forget saved progress");
    eprintln!("Flags:");
    eprintln!("  --size N                    Fixed N x N grid (rounded down to odd, >= 5)");
    eprintln!("  --difficulty <easy|medium|hard>  Preset grid size");
    eprintln!("  --best-moves                Track fewest moves instead of level");
    eprintln!("  --no-advance                Wait for `new` after solving");
    eprintln!("In game:");
    eprintln!("  up|down|left|right, or runs of w/a/s/d (e.g. `ddss`)");
    eprintln!("  new | restart | help | quit");
    process::exit(1);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Paths,
    Reset,
}

#[derive(Debug, Default)]
struct Args {
    data_dir: Option<PathBuf>,
    command: Option<Command>,
    overrides: Overrides,
}

fn parse_args(raw: &[String]) -> Result<Args, AppError> {
    let mut args = Args::default();
    let mut it = raw.iter();

    let value = |flag: &str, v: Option<&String>| -> Result<String, AppError> {
        v.cloned()
            .ok_or_else(|| AppError::Usage(format!("{flag} needs a value")))
    };

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--data-dir" => args.data_dir = Some(PathBuf::from(value(arg, it.next())?)),
            "--seed" => {
                let v = value(arg, it.next())?;
                let seed = config::parse_seed(&v)
                    .ok_or_else(|| AppError::Usage(format!("--seed: not a number: {v}")))?;
                args.overrides.seed = Some(seed);
            }
            "--size" => {
                let v = value(arg, it.next())?;
                let n: u32 = v
                    .parse()
                    .map_err(|_| AppError::Usage(format!("--size: not a number: {v}")))?;
                args.overrides.size = Some(n);
            }
            "--difficulty" => {
                let v = value(arg, it.next())?;
                let d = MazeDifficulty::from_name(&v).ok_or_else(|| {
                    AppError::Usage("--difficulty must be easy|medium|hard".to_string())
                })?;
                args.overrides.difficulty = Some(d);
            }
            "--best-moves" => args.overrides.best_moves = true,
            "--no-advance" => args.overrides.no_advance = true,
            "-h" | "--help" | "help" => usage(),
            cmd if args.command.is_none() && !cmd.starts_with('-') => {
                args.command = Some(match cmd {
                    "play" => Command::Play,
                    "paths" => Command::Paths,
                    "reset" => Command::Reset,
                    other => return Err(AppError::Usage(format!("unknown command: {other}"))),
                });
            }
            other => return Err(AppError::Usage(format!("unexpected argument: {other}"))),
        }
    }
    Ok(args)
}

/// One line of in-game input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Inputs(Vec<Input>),
    Restart,
    Help,
    Quit,
    Unknown(String),
}

fn parse_line(line: &str) -> Line {
    let mut inputs = Vec::new();
    for token in line.split_whitespace() {
        match token.to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => return Line::Quit,
            "?" | "help" => return Line::Help,
            "restart" => return Line::Restart,
            "n" | "new" => inputs.push(Input::NewMaze),
            t => {
                if let Ok(d) = t.parse::<Direction>() {
                    inputs.push(Input::Move(d));
                } else if t.chars().all(|c| matches!(c, 'w' | 'a' | 's' | 'd')) {
                    // `parse` accepts each single wasd letter.
                    for c in t.chars() {
                        if let Ok(d) = c.to_string().parse::<Direction>() {
                            inputs.push(Input::Move(d));
                        }
                    }
                } else {
                    return Line::Unknown(token.to_string());
                }
            }
        }
    }
    Line::Inputs(inputs)
}

fn describe(event: &SessionEvent, policy: LedgerPolicy) -> Option<String> {
    match event {
        SessionEvent::Moved { .. } => None,
        SessionEvent::Bumped(RejectReason::Completed) => {
            Some("Solved already. Type `new` for the next maze.".to_string())
        }
        SessionEvent::Bumped(_) => Some("Bump.".to_string()),
        SessionEvent::NewMaze { width, height, .. } => {
            Some(format!("New {width}x{height} maze."))
        }
        SessionEvent::Completed(done) => {
            let tail = match policy {
                LedgerPolicy::Level => format!("Level {}.", done.progress.value),
                LedgerPolicy::BestMoves if done.progress.improved => "New best!".to_string(),
                LedgerPolicy::BestMoves => format!("Best is {}.", done.progress.value),
            };
            Some(format!("Solved in {} moves. {tail}", done.moves))
        }
    }
}

fn play<S, R, W>(
    session: &mut SessionController<S>,
    input: R,
    mut out: W,
) -> Result<(), AppError>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    let io_err = |source: io::Error| AppError::Io {
        path: PathBuf::from("<terminal>"),
        source,
    };

    let mut lines = input.lines();
    loop {
        write!(
            out,
            "\n{}{}\n> ",
            render::board(session.traversal()),
            render::status_line(session)
        )
        .map_err(io_err)?;
        out.flush().map_err(io_err)?;

        let Some(line) = lines.next() else {
            writeln!(out).map_err(io_err)?;
            return Ok(());
        };
        let line = line.map_err(io_err)?;

        let inputs = match parse_line(&line) {
            Line::Quit => return Ok(()),
            Line::Help => {
                writeln!(
                    out,
                    "Move: up/down/left/right or w/a/s/d runs. Also: new, restart, quit.",
                )
                .map_err(io_err)?;
                continue;
            }
            Line::Restart => {
                session.restart_maze();
                continue;
            }
            Line::Unknown(tok) => {
                writeln!(out, "Unknown input: {tok} (try `help`)").map_err(io_err)?;
                continue;
            }
            Line::Inputs(inputs) => inputs,
        };

        let policy = session.ledger().policy();
        for input in inputs {
            let event = session.handle(input)?;
            if let Some(msg) = describe(&event, policy) {
                writeln!(out, "{msg}").map_err(io_err)?;
            }
            if matches!(event, SessionEvent::Completed(_)) {
                // Drop the rest of the line; it was aimed at the old maze.
                break;
            }
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let paths = AppPaths::new(args.data_dir)?;

    match args.command.unwrap_or(Command::Play) {
        Command::Paths => {
            println!("data dir:  {}", paths.data_dir().display());
            println!("progress:  {}", paths.progress_file().display());
            println!("config:    {}", paths.config_file().display());
            Ok(())
        }
        Command::Reset => {
            let file = paths.progress_file();
            match fs::remove_file(&file) {
                Ok(()) => info!("Progress cleared ({})", file.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => info!("No saved progress"),
                Err(source) => return Err(AppError::Io { path: file, source }),
            }
            Ok(())
        }
        Command::Play => {
            let file_cfg = config::load_file(&paths.config_file())?;
            let env_seed = std::env::var(config::SEED_ENV).ok();
            let cfg = config::apply_overrides(file_cfg, env_seed.as_deref(), &args.overrides)?;

            let store = JsonFileStore::open_or_empty(paths.progress_file())?;
            info!("Progress file: {}", store.path().display());

            let mut session = SessionController::new(cfg, store)?;
            let stdin = io::stdin();
            play(&mut session, stdin.lock(), io::stdout())?;

            let stats = session.stats();
            info!(
                "Session over: {} solved, {} moves, {} bumps",
                stats.mazes_completed, stats.accepted_moves, stats.bumps
            );
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}\n");
            usage();
        }
    };

    if let Err(e) = run(args) {
        error!("{}", e);
        process::exit(1);
    }
}
