//! # labyrinth
//!
//! Perfect-maze generation and single-goal traversal.
//!
//! A randomized recursive backtracker carves a spanning-tree maze into an
//! odd-sized wall/open grid. A traversal state machine walks a player through
//! it, rejecting moves into walls. A progression ledger keeps a level (or best
//! move count) across sessions through a pluggable key-value store.
//!
//! ## Quick Start
//!
//! ```
//! use labyrinth::prelude::*;
//!
//! let mut session = SessionController::new(SessionConfig::default(), MemoryStore::new())?;
//!
//! match session.handle(Input::Move(Direction::Right))? {
//!     SessionEvent::Moved { to, moves } => println!("now at {to} after {moves} moves"),
//!     SessionEvent::Bumped(reason) => println!("bumped: {}", reason.as_str()),
//!     SessionEvent::Completed(done) => println!("solved in {}", done.moves),
//!     SessionEvent::NewMaze { .. } => {}
//! }
//! # Ok::<(), labyrinth::error::MazeError>(())
//! ```
//!
//! Lower-level pieces can be used directly:
//!
//! ```
//! use labyrinth::prelude::*;
//!
//! let maze = Maze::generate(21, 15, &mut Prng::new(42))?;
//! let mut walk = TraversalState::new(maze);
//! let _ = walk.try_move(Direction::Down);
//! # Ok::<(), labyrinth::error::MazeError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialization for positions, directions and [`session::SessionConfig`]
//! - `rand` (default): [`prng::RngSource`] adapter for any `rand::RngCore`
//!
//! ## Modules
//!
//! - [`grid`]: cell storage, positions, directions
//! - [`generator`]: recursive-backtracker carving
//! - [`traversal`]: player movement and goal detection
//! - [`ledger`]: level / best-moves progression
//! - [`session`]: the controller tying it all together
//! - [`store`]: key-value persistence seam

#[path = "core/error.rs"]
pub mod error;

#[path = "core/grid.rs"]
pub mod grid;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/generator.rs"]
pub mod generator;

#[path = "core/traversal.rs"]
pub mod traversal;

#[path = "core/store.rs"]
pub mod store;

#[path = "core/ledger.rs"]
pub mod ledger;

#[path = "core/stats.rs"]
pub mod stats;

#[path = "core/session.rs"]
pub mod session;

/// Prelude module for convenient imports.
///
/// ```
/// use labyrinth::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::MazeError;
    pub use crate::generator::{generate, Maze, MazeDifficulty};
    pub use crate::grid::{CellState, Direction, Grid, Pos};
    pub use crate::ledger::{LedgerPolicy, Progress, ProgressionLedger};
    pub use crate::prng::{Prng, RandomSource, ScriptedSource};
    pub use crate::session::{
        Completion, Input, SessionConfig, SessionController, SessionEvent, SizePolicy,
    };
    pub use crate::stats::RunStats;
    pub use crate::store::{KeyValueStore, MemoryStore, StoreError};
    pub use crate::traversal::{MoveResult, RejectReason, TraversalState, TraversalStatus};
}
