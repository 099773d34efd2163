//! Monte Carlo playout simulation for turn-based tile games.
//!
//! Given a game position and a set of candidate moves, the simulator
//! estimates each candidate's value by repeatedly sampling the hidden
//! information (opponent racks, tile draw order), playing the candidate
//! plus a bounded number of follow-up turns with the engine's fast static
//! policy, and averaging what comes back: per-turn scores and bingos, a
//! residual leave valuation, the final spread, and a win probability.
//!
//! # Overview
//!
//! One call to [`Simulator::simulate`] runs a number of iterations. Each
//! iteration:
//!
//! 1. **Randomizes** the unseen state once: every opponent rack is redealt
//!    from the unseen tile pool (respecting any known partial rack) and
//!    the bag gets a fixed shuffled drawing order.
//! 2. **Rolls out** every included candidate on its own clone of the
//!    position, recording statistics per turn slot in a ragged
//!    levels-by-players grid.
//! 3. **Folds** each rollout's message back into the candidate's
//!    persistent accumulators, keyed by a process-unique id.
//!
//! Between iterations an optional [`AbortCheck`] is polled, so a caller
//! can stop a long simulation at an iteration boundary and keep every
//! statistic gathered so far.
//!
//! # Usage
//!
//! ```rust,ignore
//! use playout::{LogisticWinEstimator, SimConfig, Simulator};
//!
//! let mut sim = Simulator::new(position, LogisticWinEstimator::default(), SimConfig::default());
//! sim.prune_to(10.0, 20);
//! sim.simulate(2, 300)?;
//! for mv in sim.moves(true, true) {
//!     println!("{} equity {:.1} win {:.1}%", mv, mv.equity, mv.win * 100.0);
//! }
//! ```
//!
//! # Architecture
//!
//! - [`value`]: running mean / standard deviation accumulator
//! - [`stats`]: the ragged per-turn statistics grid
//! - [`simmed`]: a candidate move plus its accumulators and derived equity
//! - [`plan`]: decomposition of a ply request into rounds of turns
//! - [`rollout`]: one candidate's playout within an iteration
//! - [`simulator`]: the facade owning position, candidates, RNG, and log
//! - [`estimator`]: spread-to-win-probability models
//! - [`dispatch`]: cooperative cancellation
//! - [`log`]: the opt-in nested trace stream

pub mod config;
pub mod dispatch;
pub mod estimator;
pub mod log;
pub mod plan;
mod rollout;
pub mod simmed;
pub mod simulator;
pub mod stats;
pub mod value;

// Re-export main types
pub use config::SimConfig;
pub use dispatch::{AbortCheck, AbortFlag};
pub use estimator::{LogisticWinEstimator, WinEstimator};
pub use log::TraceLog;
pub use plan::PlyPlan;
pub use simmed::{SimmedMove, SimmedMoveMessage};
pub use simulator::{SimError, Simulator};
pub use stats::{Level, LevelList, PositionStatistics, StatisticType};
pub use value::AveragedValue;
