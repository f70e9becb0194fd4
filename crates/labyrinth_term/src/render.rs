//! Text rendering of the live maze.

use labyrinth::grid::Pos;
use labyrinth::ledger::LedgerPolicy;
use labyrinth::session::SessionController;
use labyrinth::store::KeyValueStore;
use labyrinth::traversal::TraversalState;

const WALL: char = '#';
const OPEN: char = ' ';
const PLAYER: char = '@';
const EXIT: char = 'E';

pub fn board(t: &TraversalState) -> String {
    let grid = t.maze().grid();
    let mut out = String::with_capacity(((grid.width() + 1) * grid.height()) as usize);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let p = Pos::new(x, y);
            let ch = if p == t.player() {
                PLAYER
            } else if p == t.exit() {
                EXIT
            } else if grid.is_open(p) {
                OPEN
            } else {
                WALL
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

pub fn status_line<S: KeyValueStore>(c: &SessionController<S>) -> String {
    let t = c.traversal();
    let maze = t.maze();
    let progress = match (c.ledger().policy(), c.ledger().value()) {
        (LedgerPolicy::Level, Some(level)) => format!("level {level}"),
        (LedgerPolicy::BestMoves, Some(best)) => format!("best {best}"),
        _ => "no record yet".to_string(),
    };
    format!(
        "{}x{} | moves {} | {} | solved {}",
        maze.width(),
        maze.height(),
        t.moves(),
        progress,
        c.stats().mazes_completed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth::generator::Maze;
    use labyrinth::grid::Direction;
    use labyrinth::prng::ScriptedSource;
    use labyrinth::session::SessionConfig;
    use labyrinth::store::MemoryStore;

    #[test]
    fn marks_player_and_exit() {
        let maze = Maze::generate(5, 5, &mut ScriptedSource::new(vec![0, 2, 1])).unwrap();
        let mut t = TraversalState::new(maze);
        let expected = "\
#####
#@  #
### #
#  E#
#####
";
        assert_eq!(board(&t), expected);

        t.try_move(Direction::Right);
        assert_eq!(board(&t).lines().nth(1), Some("# @ #"));
    }

    #[test]
    fn status_shows_level() {
        let c = SessionController::new(SessionConfig::default(), MemoryStore::new()).unwrap();
        assert_eq!(status_line(&c), "9x9 | moves 0 | level 1 | solved 0");
    }
}
