//! A candidate move under simulation and its accumulated statistics.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use game_core::Move;

use crate::stats::{LevelList, PositionStatistics};
use crate::value::AveragedValue;

// Process-wide id allocator. First use initializes it; it is never reset,
// so ids stay unique across repositioning and pruning for the life of the
// process.
static NEXT_SIMMED_MOVE_ID: AtomicU64 = AtomicU64::new(0);

fn next_simmed_move_id() -> u64 {
    NEXT_SIMMED_MOVE_ID.fetch_add(1, Ordering::Relaxed)
}

/// One iteration's result for one candidate, keyed by the candidate's id
/// so it folds back to the right accumulator even after the move list has
/// been reordered.
#[derive(Debug, Clone)]
pub struct SimmedMoveMessage {
    pub id: u64,
    /// Snapshot of the level grid after this iteration's rollout.
    pub levels: LevelList,
    pub residual: f64,
    pub game_spread: i32,
    pub wins: f64,
    /// True when the win figure came from the heuristic estimator rather
    /// than an actually finished game.
    pub heuristic_win: bool,
}

/// A candidate move plus everything the simulation has learned about it.
#[derive(Debug, Clone)]
pub struct SimmedMove {
    id: u64,
    pub mv: Move,
    include_in_simulation: bool,
    pub levels: LevelList,
    pub residual: AveragedValue,
    pub game_spread: AveragedValue,
    pub wins: AveragedValue,
}

impl SimmedMove {
    pub fn new(mv: Move) -> Self {
        Self {
            id: next_simmed_move_id(),
            mv,
            include_in_simulation: true,
            levels: LevelList::new(),
            residual: AveragedValue::new(),
            game_spread: AveragedValue::new(),
            wins: AveragedValue::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn include_in_simulation(&self) -> bool {
        self.include_in_simulation
    }

    pub fn set_include_in_simulation(&mut self, include: bool) {
        self.include_in_simulation = include;
    }

    /// Fold one iteration's message into the running accumulators.
    pub fn incorporate(&mut self, message: SimmedMoveMessage) {
        self.levels = message.levels;
        self.residual.incorporate(message.residual);
        self.game_spread.incorporate(message.game_spread as f64);
        self.wins.incorporate(message.wins);
    }

    /// Zero every accumulator.
    pub fn clear(&mut self) {
        self.levels.clear();
        self.residual.clear();
        self.game_spread.clear();
        self.wins.clear();
    }

    /// Simulation-derived valuation of the move.
    ///
    /// Before any rollout has filled the grid this is the move's static
    /// equity. Afterwards, each level contributes its first slot's average
    /// score positively and every other slot's negatively (the first slot
    /// of a level is the side being rolled out, the rest are opponents),
    /// and the averaged residual leave valuation is added on top. The sign
    /// rule is positional by slot, not by player identity; on partial
    /// final levels led by a non-root player this is a known quirk that is
    /// kept for parity with long-standing behavior.
    pub fn calculate_equity(&self) -> f64 {
        if self.levels.is_empty() {
            return self.mv.equity;
        }

        let mut equity = 0.0;
        for level in self.levels.iter() {
            for (slot, statistics) in level.statistics.iter().enumerate() {
                if slot == 0 {
                    equity += statistics.score.average();
                } else {
                    equity -= statistics.score.average();
                }
            }
        }
        equity + self.residual.average()
    }

    /// Win percentage in [0, 100]; falls back to the move's static win
    /// estimate until a rollout has produced one.
    pub fn calculate_win_percentage(&self) -> f64 {
        if self.wins.has_values() {
            self.wins.average() * 100.0
        } else {
            self.mv.win
        }
    }

    pub fn position_statistics(&self, level: usize, player: usize) -> Option<&PositionStatistics> {
        self.levels.level(level)?.statistics.get(player)
    }
}

impl fmt::Display for SimmedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "simmed move {}:", self.mv)?;
        for (number, level) in self.levels.iter().enumerate() {
            write!(f, "level {}: {}", number + 1, level)?;
        }
        writeln!(f, "being simmed: {}", self.include_in_simulation)?;
        writeln!(f, "residual: {}", self.residual)?;
        writeln!(f, "spread: {}", self.game_spread)?;
        write!(f, "wins: {}", self.wins)
    }
}
