//! Player movement over a carved maze: wall checks, the move counter and
//! goal detection.

use crate::generator::Maze;
use crate::grid::{Direction, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalStatus {
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Candidate cell is a wall.
    Wall,
    /// Candidate cell is outside the grid.
    Edge,
    /// The exit was already reached; the session must be reset first.
    Completed,
}

impl RejectReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectReason::Wall => "wall",
            RejectReason::Edge => "edge",
            RejectReason::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Accepted,
    /// Accepted, and the player now stands on the exit.
    GoalReached,
    /// Nothing changed.
    Rejected(RejectReason),
}

impl MoveResult {
    pub fn is_accepted(self) -> bool {
        matches!(self, MoveResult::Accepted | MoveResult::GoalReached)
    }

    pub fn reached_goal(self) -> bool {
        self == MoveResult::GoalReached
    }
}

/// Player position, move counter and goal detection over one maze.
#[derive(Debug, Clone)]
pub struct TraversalState {
    maze: Maze,
    player: Pos,
    moves: u32,
    status: TraversalStatus,
}

impl TraversalState {
    pub fn new(maze: Maze) -> Self {
        let player = maze.start();
        Self {
            maze,
            player,
            moves: 0,
            status: TraversalStatus::InProgress,
        }
    }

    pub fn try_move(&mut self, dir: Direction) -> MoveResult {
        if self.status == TraversalStatus::Completed {
            return MoveResult::Rejected(RejectReason::Completed);
        }

        let (dx, dy) = dir.offset();
        let grid = self.maze.grid();
        let candidate = match self.player.offset(dx, dy) {
            Some(p) if grid.contains(p) => p,
            _ => return MoveResult::Rejected(RejectReason::Edge),
        };
        if !grid.is_open(candidate) {
            return MoveResult::Rejected(RejectReason::Wall);
        }

        self.player = candidate;
        self.moves = self.moves.saturating_add(1);

        if self.player == self.maze.exit() {
            self.status = TraversalStatus::Completed;
            MoveResult::GoalReached
        } else {
            MoveResult::Accepted
        }
    }

    /// Back to the start of the same maze.
    pub fn reset(&mut self) {
        self.player = self.maze.start();
        self.moves = 0;
        self.status = TraversalStatus::InProgress;
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn start(&self) -> Pos {
        self.maze.start()
    }

    pub fn exit(&self) -> Pos {
        self.maze.exit()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn status(&self) -> TraversalStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == TraversalStatus::Completed
    }

    pub fn manhattan_to_exit(&self) -> u32 {
        self.player.manhattan(self.maze.exit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction::*;
    use crate::prng::ScriptedSource;

    // See `generator::tests::golden_9x9`: the only route from (1,1) to (7,7)
    // runs along the top row and down the right column.
    fn golden_9x9() -> TraversalState {
        let maze = Maze::generate(9, 9, &mut ScriptedSource::new(vec![0, 2, 1])).unwrap();
        TraversalState::new(maze)
    }

    #[test]
    fn starts_in_progress_at_start() {
        let t = golden_9x9();
        assert_eq!(t.player(), Pos::new(1, 1));
        assert_eq!(t.exit(), Pos::new(7, 7));
        assert_eq!(t.moves(), 0);
        assert_eq!(t.status(), TraversalStatus::InProgress);
        assert_eq!(t.manhattan_to_exit(), 12);
    }

    #[test]
    fn wall_bump_changes_nothing() {
        let mut t = golden_9x9();
        let grid_before = t.maze().grid().clone();

        assert_eq!(t.try_move(Down), MoveResult::Rejected(RejectReason::Wall));
        assert_eq!(t.try_move(Up), MoveResult::Rejected(RejectReason::Wall));
        assert_eq!(t.try_move(Left), MoveResult::Rejected(RejectReason::Wall));

        assert_eq!(t.player(), Pos::new(1, 1));
        assert_eq!(t.moves(), 0);
        assert_eq!(t.maze().grid(), &grid_before);
    }

    #[test]
    fn shortest_path_completes_with_exact_count() {
        let mut t = golden_9x9();
        // Leading bump must not count.
        assert!(!t.try_move(Up).is_accepted());
        assert_eq!(t.moves(), 0);

        let path = [
            Right, Right, Right, Right, Right, Right, Down, Down, Down, Down, Down, Down,
        ];
        for (i, d) in path.iter().enumerate() {
            let r = t.try_move(*d);
            if i + 1 == path.len() {
                assert_eq!(r, MoveResult::GoalReached);
            } else {
                assert_eq!(r, MoveResult::Accepted);
            }
            assert_eq!(t.moves(), i as u32 + 1);
        }
        assert!(t.is_completed());
        assert_eq!(t.moves(), path.len() as u32);
        assert_eq!(t.manhattan_to_exit(), 0);
    }

    #[test]
    fn completed_is_terminal_until_reset() {
        let mut t = golden_9x9();
        for d in [Right; 6].into_iter().chain([Down; 6]) {
            t.try_move(d);
        }
        assert!(t.is_completed());

        for d in Direction::ALL {
            assert_eq!(t.try_move(d), MoveResult::Rejected(RejectReason::Completed));
        }
        assert_eq!(t.player(), Pos::new(7, 7));
        assert_eq!(t.moves(), 12);

        t.reset();
        assert_eq!(t.status(), TraversalStatus::InProgress);
        assert_eq!(t.player(), Pos::new(1, 1));
        assert_eq!(t.moves(), 0);
        assert_eq!(t.try_move(Right), MoveResult::Accepted);
    }

    #[test]
    fn backtracking_counts_every_step() {
        let mut t = golden_9x9();
        assert_eq!(t.try_move(Right), MoveResult::Accepted);
        assert_eq!(t.try_move(Left), MoveResult::Accepted);
        assert_eq!(t.player(), Pos::new(1, 1));
        assert_eq!(t.moves(), 2);
    }
}
