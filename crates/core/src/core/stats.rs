/// Completion window kept for the recent-average figure.
const RECENT_WINDOW: usize = 100;

/// In-memory counters for one run of the controller. Not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub mazes_completed: u32,
    pub accepted_moves: u64,
    pub bumps: u64,
    /// Move counts of the most recent completions, oldest first.
    pub recent: Vec<u32>,
    pub fewest_moves: Option<u32>,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            mazes_completed: 0,
            accepted_moves: 0,
            bumps: 0,
            recent: Vec::with_capacity(RECENT_WINDOW),
            fewest_moves: None,
        }
    }

    pub fn record_move(&mut self) {
        self.accepted_moves = self.accepted_moves.saturating_add(1);
    }

    pub fn record_bump(&mut self) {
        self.bumps = self.bumps.saturating_add(1);
    }

    pub fn record_completion(&mut self, moves: u32) {
        self.mazes_completed = self.mazes_completed.saturating_add(1);
        self.recent.push(moves);
        if self.recent.len() > RECENT_WINDOW {
            self.recent.remove(0);
        }
        self.fewest_moves = Some(self.fewest_moves.map_or(moves, |f| f.min(moves)));
    }

    pub fn recent_average_moves(&self) -> Option<f32> {
        if self.recent.is_empty() {
            return None;
        }
        let total: u64 = self.recent.iter().map(|&m| m as u64).sum();
        Some(total as f32 / self.recent.len() as f32)
    }

    /// Share of inputs that hit a wall; 0 before any input.
    pub fn bump_rate(&self) -> f32 {
        let total = self.accepted_moves + self.bumps;
        if total == 0 {
            0.0
        } else {
            self.bumps as f32 / total as f32
        }
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}
