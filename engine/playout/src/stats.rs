//! The per-ply statistics grid.
//!
//! Statistics from a lookahead are kept in a ragged grid: one `Level` per
//! round of turns, one `PositionStatistics` slot per player acting in that
//! round. The last level of a lookahead may be partial, so levels do not
//! all have the same width. Both containers only ever grow; re-planning a
//! deeper lookahead extends them and never discards accumulated samples.

use std::fmt;

use crate::value::AveragedValue;

/// Which statistic of a slot to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticType {
    Score,
    Bingos,
}

/// Accumulated statistics for one ply slot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionStatistics {
    /// Points scored on this ply, end-of-game bonus included.
    pub score: AveragedValue,
    /// 1 for a full-rack play, 0 otherwise.
    pub bingos: AveragedValue,
}

impl PositionStatistics {
    pub fn statistic(&self, which: StatisticType) -> AveragedValue {
        match which {
            StatisticType::Score => self.score,
            StatisticType::Bingos => self.bingos,
        }
    }
}

impl fmt::Display for PositionStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stats: score {}, bingos {}", self.score, self.bingos)
    }
}

/// One round of turns: a slot per player acting at this depth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    pub statistics: Vec<PositionStatistics>,
}

impl Level {
    /// Extend the slot list to `number` entries. Never truncates.
    pub fn set_number_scores(&mut self, number: usize) {
        while self.statistics.len() < number {
            self.statistics.push(PositionStatistics::default());
        }
    }

    pub fn len(&self) -> usize {
        self.statistics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statistics.is_empty()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statistics in &self.statistics {
            writeln!(f, "{}", statistics)?;
        }
        Ok(())
    }
}

/// The full grid, one `Level` per lookahead round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelList {
    levels: Vec<Level>,
}

impl LevelList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend to `number` levels. Never truncates.
    pub fn set_number_levels(&mut self, number: usize) {
        while self.levels.len() < number {
            self.levels.push(Level::default());
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn level_mut(&mut self, index: usize) -> &mut Level {
        &mut self.levels[index]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Level> {
        self.levels.iter()
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }
}
