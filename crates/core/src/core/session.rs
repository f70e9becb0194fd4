//! Session controller: owns the live maze and routes input through traversal,
//! progression and persistence.
//!
//! A session is one maze from start to exit. [`SessionController::new_session`]
//! is the only place a maze, player, exit and move counter are created, and it
//! replaces all four in a single assignment.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::error::MazeError;
use crate::generator::{Maze, MazeDifficulty};
use crate::grid::{round_down_to_odd, Direction, Grid, Pos};
use crate::ledger::{LedgerPolicy, Progress, ProgressionLedger};
use crate::prng::Prng;
use crate::stats::RunStats;
use crate::store::KeyValueStore;
use crate::traversal::{MoveResult, RejectReason, TraversalState};

/// Added to the seed between sessions so every maze differs but the whole run
/// replays from the configured seed.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// "MAZE"
pub const DEFAULT_SEED: u64 = 0x4D41_5A45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SizePolicy {
    Fixed { width: u32, height: u32 },
    Preset { difficulty: MazeDifficulty },
    /// Square grid of `base + 2 * (level - 1)`, capped at `max` (rounded down
    /// to odd).
    ByLevel { base: u32, max: u32 },
}

impl Default for SizePolicy {
    fn default() -> Self {
        SizePolicy::ByLevel { base: 9, max: 41 }
    }
}

impl SizePolicy {
    pub fn validate(&self) -> Result<(), MazeError> {
        match *self {
            SizePolicy::Fixed { width, height } => Grid::new(width, height).map(|_| ()),
            SizePolicy::Preset { .. } => Ok(()),
            SizePolicy::ByLevel { base, max } => {
                Grid::new(base, base)?;
                match round_down_to_odd(max) {
                    Some(cap) if cap >= base => Ok(()),
                    _ => Err(MazeError::InvalidDimension {
                        width: max,
                        height: max,
                    }),
                }
            }
        }
    }

    /// Grid dimensions for a player at `level` (1-based).
    pub fn dims(&self, level: u32) -> (u32, u32) {
        match *self {
            SizePolicy::Fixed { width, height } => (width, height),
            SizePolicy::Preset { difficulty } => difficulty.dims(),
            SizePolicy::ByLevel { base, max } => {
                let cap = round_down_to_odd(max).unwrap_or(base).max(base);
                let grown = base.saturating_add(level.saturating_sub(1).saturating_mul(2));
                // `base` is odd and growth is even, so only the cap can break parity.
                let side = grown.min(cap);
                (side, side)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    pub size: SizePolicy,
    pub ledger: LedgerPolicy,
    /// Empty means the policy's default key.
    pub storage_key: String,
    pub seed: u64,
    /// Start the next maze as soon as the exit is reached.
    pub auto_advance: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            size: SizePolicy::default(),
            ledger: LedgerPolicy::default(),
            storage_key: String::new(),
            seed: DEFAULT_SEED,
            auto_advance: true,
        }
    }
}

impl SessionConfig {
    #[cfg(feature = "serde")]
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn storage_key(&self) -> &str {
        if self.storage_key.trim().is_empty() {
            self.ledger.default_key()
        } else {
            &self.storage_key
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Move(Direction),
    NewMaze,
}

impl From<Direction> for Input {
    fn from(d: Direction) -> Self {
        Input::Move(d)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub moves: u32,
    pub progress: Progress,
    /// A fresh maze is already in place.
    pub advanced: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Moved { to: Pos, moves: u32 },
    Bumped(RejectReason),
    Completed(Completion),
    NewMaze { width: u32, height: u32, seed: u64 },
}

#[derive(Debug)]
pub struct SessionController<S: KeyValueStore> {
    config: SessionConfig,
    store: S,
    ledger: ProgressionLedger,
    stats: RunStats,
    traversal: TraversalState,
    maze_seed: u64,
    next_seed: u64,
    sessions_started: u64,
}

fn build_traversal(
    config: &SessionConfig,
    ledger: &ProgressionLedger,
    seed: u64,
) -> Result<TraversalState, MazeError> {
    let (w, h) = config.size.dims(ledger.level().unwrap_or(1));
    let maze = Maze::generate(w, h, &mut Prng::new(seed))?;
    debug!(
        "Generated {}x{} maze (seed {:#x}, {} open cells)",
        w,
        h,
        seed,
        maze.grid().open_count()
    );
    Ok(TraversalState::new(maze))
}

impl<S: KeyValueStore> SessionController<S> {
    /// Validate the config, seed the ledger from `store` and start the first
    /// maze. A store read failure is logged and play starts from defaults.
    pub fn new(config: SessionConfig, store: S) -> Result<Self, MazeError> {
        config.size.validate()?;

        let mut ledger = ProgressionLedger::new(config.ledger, config.storage_key());
        if let Err(e) = ledger.load(&store) {
            warn!("Could not read progress ({}): {}", ledger.key(), e);
        }

        let seed = config.seed;
        let traversal = build_traversal(&config, &ledger, seed)?;
        Ok(Self {
            next_seed: seed.wrapping_add(SEED_STRIDE),
            config,
            store,
            ledger,
            stats: RunStats::new(),
            traversal,
            maze_seed: seed,
            sessions_started: 1,
        })
    }

    /// Throw away the current maze and start a new one sized for the current
    /// level.
    pub fn new_session(&mut self) -> Result<(), MazeError> {
        let seed = self.next_seed;
        self.traversal = build_traversal(&self.config, &self.ledger, seed)?;
        self.maze_seed = seed;
        self.next_seed = seed.wrapping_add(SEED_STRIDE);
        self.sessions_started = self.sessions_started.saturating_add(1);
        Ok(())
    }

    /// Put the player back at the start of the current maze with a zeroed
    /// counter. The layout is kept.
    pub fn restart_maze(&mut self) {
        self.traversal.reset();
    }

    pub fn handle(&mut self, input: Input) -> Result<SessionEvent, MazeError> {
        let dir = match input {
            Input::NewMaze => {
                self.new_session()?;
                let maze = self.traversal.maze();
                return Ok(SessionEvent::NewMaze {
                    width: maze.width(),
                    height: maze.height(),
                    seed: self.maze_seed,
                });
            }
            Input::Move(dir) => dir,
        };

        match self.traversal.try_move(dir) {
            MoveResult::Accepted => {
                self.stats.record_move();
                Ok(SessionEvent::Moved {
                    to: self.traversal.player(),
                    moves: self.traversal.moves(),
                })
            }
            MoveResult::Rejected(reason) => {
                if reason != RejectReason::Completed {
                    self.stats.record_bump();
                }
                trace!("Move {} rejected: {}", dir, reason.as_str());
                Ok(SessionEvent::Bumped(reason))
            }
            MoveResult::GoalReached => {
                self.stats.record_move();
                let moves = self.traversal.moves();
                Ok(SessionEvent::Completed(self.complete(moves)?))
            }
        }
    }

    fn complete(&mut self, moves: u32) -> Result<Completion, MazeError> {
        let progress = self.ledger.record_success(moves);
        self.stats.record_completion(moves);
        match self.ledger.policy() {
            LedgerPolicy::Level => info!("Maze solved in {} moves; level {}", moves, progress.value),
            LedgerPolicy::BestMoves if progress.improved => {
                info!("Maze solved in {} moves; new best", moves)
            }
            LedgerPolicy::BestMoves => {
                info!("Maze solved in {} moves; best stays {}", moves, progress.value)
            }
        }

        // Only improvements are written; a failed write is logged and play goes on.
        if progress.improved {
            if let Err(e) = self.ledger.persist(&mut self.store) {
                warn!("Could not save progress ({}): {}", self.ledger.key(), e);
            }
        }

        let advanced = self.config.auto_advance;
        if advanced {
            self.new_session()?;
        }
        Ok(Completion {
            moves,
            progress,
            advanced,
        })
    }

    pub fn traversal(&self) -> &TraversalState {
        &self.traversal
    }

    pub fn maze(&self) -> &Maze {
        self.traversal.maze()
    }

    pub fn ledger(&self) -> &ProgressionLedger {
        &self.ledger
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Seed the current maze was carved from.
    pub fn maze_seed(&self) -> u64 {
        self.maze_seed
    }

    pub fn sessions_started(&self) -> u64 {
        self.sessions_started
    }
}
