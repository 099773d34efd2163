//! Plays and their valuations.

use std::fmt;

use crate::tile::Tile;

/// The action half of a move: what a player actually does on their turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Play {
    /// Place tiles on the board starting at (row, col).
    Place {
        row: u8,
        col: u8,
        across: bool,
        tiles: Vec<Tile>,
    },
    /// Trade tiles back into the bag, forfeiting the turn's score.
    Exchange { tiles: Vec<Tile> },
    /// Forfeit the turn.
    Pass,
}

/// A play together with its valuations.
///
/// Equality compares the play alone. `equity` and `win` are analysis
/// outputs that get recalculated as simulations run, and two `Move` values
/// naming the same play must stay equal across those updates so lookups by
/// equality keep finding their accumulators.
#[derive(Debug, Clone)]
pub struct Move {
    pub play: Play,
    /// Points scored by the play, before any end-of-game bonus.
    pub score: i32,
    /// Static or simulation-derived valuation in points.
    pub equity: f64,
    /// Win probability estimate in [0, 1].
    pub win: f64,
    /// Whether the play used the entire rack capacity in one turn.
    pub is_bingo: bool,
}

impl Move {
    pub fn place(row: u8, col: u8, across: bool, tiles: Vec<Tile>, score: i32) -> Self {
        Self {
            play: Play::Place {
                row,
                col,
                across,
                tiles,
            },
            score,
            equity: score as f64,
            win: 0.0,
            is_bingo: false,
        }
    }

    pub fn exchange(tiles: Vec<Tile>) -> Self {
        Self {
            play: Play::Exchange { tiles },
            score: 0,
            equity: 0.0,
            win: 0.0,
            is_bingo: false,
        }
    }

    pub fn pass() -> Self {
        Self {
            play: Play::Pass,
            score: 0,
            equity: 0.0,
            win: 0.0,
            is_bingo: false,
        }
    }

    pub fn with_equity(mut self, equity: f64) -> Self {
        self.equity = equity;
        self
    }

    pub fn with_win(mut self, win: f64) -> Self {
        self.win = win;
        self
    }

    pub fn as_bingo(mut self) -> Self {
        self.is_bingo = true;
        self
    }

    pub fn is_pass(&self) -> bool {
        matches!(self.play, Play::Pass)
    }

    /// The tiles the play takes off the rack. Empty for a pass.
    pub fn tiles(&self) -> &[Tile] {
        match &self.play {
            Play::Place { tiles, .. } | Play::Exchange { tiles } => tiles,
            Play::Pass => &[],
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.play == other.play
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.play {
            Play::Place {
                row,
                col,
                across,
                tiles,
            } => {
                let word: String = tiles.iter().map(|t| t.letter()).collect();
                let col_letter = (b'A' + col) as char;
                if *across {
                    write!(f, "{}{} {}", row + 1, col_letter, word)
                } else {
                    write!(f, "{}{} {}", col_letter, row + 1, word)
                }
            }
            Play::Exchange { tiles } => {
                let word: String = tiles.iter().map(|t| t.letter()).collect();
                write!(f, "EXCH {}", word)
            }
            Play::Pass => write!(f, "PASS"),
        }
    }
}
