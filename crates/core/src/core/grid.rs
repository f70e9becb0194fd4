//! Odd-sized wall/open grid and the 4-way geometry shared by generation and
//! traversal.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::MazeError;

/// Smallest legal side length: one interior cell ring plus the border.
pub const MIN_DIMENSION: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum CellState {
    Wall = 0,
    Open = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pos {
    pub x: u32,
    pub y: u32,
}

impl Pos {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`; `None` if either coordinate would go negative or
    /// overflow.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Pos> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Pos { x, y })
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit offset; `y` grows downward.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" | "w" | "arrowup" => Ok(Direction::Up),
            "right" | "r" | "d" | "arrowright" => Ok(Direction::Right),
            "down" | "s" | "arrowdown" => Ok(Direction::Down),
            "left" | "l" | "a" | "arrowleft" => Ok(Direction::Left),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Largest odd value `<= n`, or `None` if that falls below [`MIN_DIMENSION`].
pub fn round_down_to_odd(n: u32) -> Option<u32> {
    let odd = if n % 2 == 0 { n.checked_sub(1)? } else { n };
    (odd >= MIN_DIMENSION).then_some(odd)
}

pub(crate) fn valid_dimension(n: u32) -> bool {
    n >= MIN_DIMENSION && n % 2 == 1
}

/// Only constructible through [`Grid::new`], so the dimensions are always
/// valid and `cells.len() == width * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<CellState>,
}

impl Grid {
    /// All-wall grid. Both sides must be odd and at least [`MIN_DIMENSION`].
    pub fn new(width: u32, height: u32) -> Result<Self, MazeError> {
        if !valid_dimension(width) || !valid_dimension(height) {
            return Err(MazeError::InvalidDimension { width, height });
        }
        let cells = vec![CellState::Wall; (width as usize) * (height as usize)];
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Strictly inside the border ring.
    pub fn is_interior(&self, pos: Pos) -> bool {
        pos.x > 0 && pos.y > 0 && pos.x + 1 < self.width && pos.y + 1 < self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Result<CellState, MazeError> {
        let idx = self.idx(x, y)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, x: u32, y: u32, state: CellState) -> Result<(), MazeError> {
        let idx = self.idx(x, y)?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Non-failing query: out-of-bounds reads as wall.
    pub fn is_open(&self, pos: Pos) -> bool {
        matches!(self.get(pos.x, pos.y), Ok(CellState::Open))
    }

    pub fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == CellState::Open).count()
    }

    /// Row-major cell slice.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    fn idx(&self, x: u32, y: u32) -> Result<usize, MazeError> {
        if x >= self.width || y >= self.height {
            return Err(MazeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y as usize) * (self.width as usize) + (x as usize))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width as usize) {
            for cell in row {
                let ch = match cell {
                    CellState::Wall => '#',
                    CellState::Open => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
