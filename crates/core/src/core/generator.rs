//! Randomized recursive-backtracker carving on 2-cell strides.
//!
//! Cells with odd coordinates are rooms; the cell between two rooms is the
//! wall that gets knocked out when they are joined. Only rooms that are still
//! `Wall` are ever entered, so the carved graph is a tree, and the DFS visits
//! every room reachable from the start, so it spans.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MazeError;
use crate::grid::{valid_dimension, CellState, Direction, Grid, Pos};
use crate::prng::RandomSource;

/// Base order fed to the shuffle at each cell.
const CARVE_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MazeDifficulty {
    Easy,
    Medium,
    Hard,
}

impl MazeDifficulty {
    pub fn name(self) -> &'static str {
        match self {
            MazeDifficulty::Easy => "easy",
            MazeDifficulty::Medium => "medium",
            MazeDifficulty::Hard => "hard",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(MazeDifficulty::Easy),
            "medium" => Some(MazeDifficulty::Medium),
            "hard" => Some(MazeDifficulty::Hard),
            _ => None,
        }
    }

    /// Grid dimensions: 7, 11 and 17 rooms per side.
    pub fn dims(self) -> (u32, u32) {
        match self {
            MazeDifficulty::Easy => (15, 15),
            MazeDifficulty::Medium => (23, 23),
            MazeDifficulty::Hard => (35, 35),
        }
    }
}

fn is_room(grid: &Grid, pos: Pos) -> bool {
    grid.is_interior(pos) && pos.x % 2 == 1 && pos.y % 2 == 1
}

/// One explicit-stack entry: the room, its shuffled directions, and how many
/// of them have been tried.
struct Frame {
    pos: Pos,
    dirs: [Direction; 4],
    next: usize,
}

impl Frame {
    fn enter<R: RandomSource>(pos: Pos, rng: &mut R) -> Self {
        let mut dirs = CARVE_ORDER;
        rng.shuffle(&mut dirs);
        Self { pos, dirs, next: 0 }
    }
}

/// Carve a perfect maze into `grid` starting from `start`.
///
/// The grid is reset to all-wall first, so the result depends only on the
/// dimensions, `start` and the draws taken from `rng`. Frames are kept on a
/// heap stack; carving order and draw order match the recursive formulation.
pub fn generate<R: RandomSource>(
    grid: &mut Grid,
    start: Pos,
    rng: &mut R,
) -> Result<(), MazeError> {
    let (w, h) = (grid.width(), grid.height());
    if !valid_dimension(w) || !valid_dimension(h) {
        return Err(MazeError::InvalidDimension {
            width: w,
            height: h,
        });
    }
    if !is_room(grid, start) {
        return Err(MazeError::InvalidStart {
            x: start.x,
            y: start.y,
        });
    }

    grid.fill(CellState::Wall);
    grid.set(start.x, start.y, CellState::Open)?;

    let mut stack = vec![Frame::enter(start, rng)];
    while let Some(top) = stack.last_mut() {
        if top.next >= top.dirs.len() {
            stack.pop();
            continue;
        }
        let dir = top.dirs[top.next];
        top.next += 1;
        let here = top.pos;

        let (dx, dy) = dir.offset();
        let Some(next) = here.offset(dx * 2, dy * 2) else {
            continue;
        };
        if !grid.is_interior(next) || grid.get(next.x, next.y)? != CellState::Wall {
            continue;
        }
        let Some(mid) = here.offset(dx, dy) else {
            continue;
        };
        grid.set(mid.x, mid.y, CellState::Open)?;
        grid.set(next.x, next.y, CellState::Open)?;
        stack.push(Frame::enter(next, rng));
    }

    Ok(())
}

/// A carved grid plus its designated start and exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    start: Pos,
    exit: Pos,
}

impl Maze {
    /// Start at `(1, 1)`, exit at the bottom-right interior room.
    pub fn generate<R: RandomSource>(
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Result<Self, MazeError> {
        let start = Pos::new(1, 1);
        let exit = Pos::new(width.saturating_sub(2), height.saturating_sub(2));
        Self::generate_with(width, height, start, exit, rng)
    }

    pub fn generate_with<R: RandomSource>(
        width: u32,
        height: u32,
        start: Pos,
        exit: Pos,
        rng: &mut R,
    ) -> Result<Self, MazeError> {
        let mut grid = Grid::new(width, height)?;
        if !is_room(&grid, start) {
            return Err(MazeError::InvalidStart {
                x: start.x,
                y: start.y,
            });
        }
        if !is_room(&grid, exit) || exit == start {
            return Err(MazeError::InvalidExit {
                x: exit.x,
                y: exit.y,
            });
        }
        generate(&mut grid, start, rng)?;
        debug_assert!(grid.is_open(exit));
        Ok(Self { grid, start, exit })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn exit(&self) -> Pos {
        self.exit
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }
}
