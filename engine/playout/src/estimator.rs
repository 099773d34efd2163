//! Win probability estimation for unfinished rollouts.
//!
//! When a rollout runs out of plies before the game ends, the simulator
//! converts the final spread into a win probability through a
//! `WinEstimator`. Production play would back this with a table fitted to
//! real game outcomes; `LogisticWinEstimator` is a cheap synthetic stand-in
//! with the same shape, good enough for tests and benchmarks.

/// Trait for spread-to-win-probability models.
pub trait WinEstimator: Send + Sync {
    /// Probability in [0, 1] that the side leading by `spread` points wins,
    /// given `unseen_tiles` tiles still outside that side's knowledge (bag
    /// plus a full rack). More unseen tiles mean more variance left, so
    /// estimates shrink toward one half.
    fn win_probability(&self, spread: i32, unseen_tiles: u32) -> f64;
}

/// Logistic curve over spread, flattened as unseen tiles increase.
#[derive(Debug, Clone)]
pub struct LogisticWinEstimator {
    /// Spread scale with an empty bag.
    pub base_scale: f64,
    /// Additional scale per unseen tile.
    pub scale_per_tile: f64,
}

impl Default for LogisticWinEstimator {
    fn default() -> Self {
        Self {
            base_scale: 8.0,
            scale_per_tile: 0.75,
        }
    }
}

impl LogisticWinEstimator {
    pub fn new(base_scale: f64, scale_per_tile: f64) -> Self {
        Self {
            base_scale,
            scale_per_tile,
        }
    }
}

impl WinEstimator for LogisticWinEstimator {
    fn win_probability(&self, spread: i32, unseen_tiles: u32) -> f64 {
        let scale = self.base_scale + self.scale_per_tile * unseen_tiles as f64;
        1.0 / (1.0 + (-(spread as f64) / scale).exp())
    }
}
