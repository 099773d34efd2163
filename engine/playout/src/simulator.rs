//! The simulator facade.
//!
//! A `Simulator` owns the position under analysis, the set of candidate
//! moves with their accumulated statistics, and everything a simulation
//! run needs around them: the RNG that hides the unseen tiles, the
//! optional abort dispatch, and the optional trace stream.
//!
//! Each iteration randomizes the hidden state once (opponent racks and
//! the bag's drawing order), then rolls out every included candidate on a
//! fresh clone of the position and folds the results back into the
//! per-candidate accumulators. The original position is mutated only by
//! the randomization step; rollouts never touch it.

use std::path::Path;
use std::sync::Arc;

use game_core::{EngineError, GamePosition, Move, Rack};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::SimConfig;
use crate::dispatch::AbortCheck;
use crate::estimator::WinEstimator;
use crate::log::TraceLog;
use crate::plan::PlyPlan;
use crate::rollout::run_playout;
use crate::simmed::{SimmedMove, SimmedMoveMessage};

/// Errors that can occur during a simulation call.
///
/// The engine's own failures (an illegal commit, an inconsistent bag)
/// propagate out unchanged; the iteration they interrupted leaves no
/// consistency guarantee behind, but statistics from completed iterations
/// remain valid.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

pub struct Simulator<G: GamePosition, W: WinEstimator> {
    original: G,
    estimator: W,
    config: SimConfig,
    simmed_moves: Vec<SimmedMove>,
    considered_moves: Vec<Move>,
    partial_oppo_rack: Rack,
    iterations: u32,
    dispatch: Option<Arc<dyn AbortCheck>>,
    rng: ChaCha20Rng,
    log: TraceLog,
}

impl<G: GamePosition, W: WinEstimator> Simulator<G, W> {
    /// Create a simulator over `position`. Every move the engine has
    /// enumerated for the position starts out included.
    pub fn new(position: G, estimator: W, config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        let mut simulator = Self {
            original: position,
            estimator,
            config,
            simmed_moves: Vec::new(),
            considered_moves: Vec::new(),
            partial_oppo_rack: Rack::new(),
            iterations: 0,
            dispatch: None,
            rng,
            log: TraceLog::new(),
        };
        simulator.rebuild_simmed_moves();
        simulator
    }

    fn rebuild_simmed_moves(&mut self) {
        self.simmed_moves = self
            .original
            .candidate_moves()
            .into_iter()
            .map(SimmedMove::new)
            .collect();
    }

    /// Replace the position under analysis. Accumulated results are
    /// discarded and the candidate set is rebuilt from the new position.
    pub fn set_position(&mut self, position: G) {
        if self.has_simulation_results() {
            self.log.end_simulation();
        }
        self.original = position;
        self.considered_moves.clear();
        self.rebuild_simmed_moves();
        self.reset_numbers();
    }

    /// The position as the simulator currently sees it. Opponent racks
    /// and the drawing order reflect the most recent randomization.
    pub fn position(&self) -> &G {
        &self.original
    }

    /// Start writing the structured trace to `path`. Failure to open is
    /// reported and logging stays off; the simulation itself is never
    /// affected.
    pub fn set_logfile(&mut self, path: impl AsRef<Path>, append: bool) {
        self.log.open(path, append);
    }

    pub fn close_logfile(&mut self) {
        self.log.close();
    }

    pub fn is_logging(&self) -> bool {
        self.log.is_logging()
    }

    /// Freeform line in the trace stream.
    pub fn log_message(&mut self, message: &str) {
        self.log.message(message);
    }

    pub fn set_dispatch(&mut self, dispatch: Arc<dyn AbortCheck>) {
        self.dispatch = Some(dispatch);
    }

    pub fn clear_dispatch(&mut self) {
        self.dispatch = None;
    }

    /// Fix a known subset of every opponent's rack. The randomizer keeps
    /// these tiles in place and fills the rest from the unseen pool.
    pub fn set_partial_oppo_rack(&mut self, rack: Rack) {
        self.partial_oppo_rack = rack;
    }

    pub fn set_ignore_opponents(&mut self, ignore: bool) {
        self.config.ignore_opponents = ignore;
    }

    /// Mark exactly `moves` as included. Moves already known keep their
    /// accumulated statistics; unknown moves are appended as new
    /// candidates.
    pub fn set_included_moves(&mut self, moves: &[Move]) {
        for simmed in &mut self.simmed_moves {
            simmed.set_include_in_simulation(false);
        }
        for mv in moves {
            match self.simmed_moves.iter_mut().find(|s| s.mv == *mv) {
                Some(simmed) => simmed.set_include_in_simulation(true),
                None => self.simmed_moves.push(SimmedMove::new(mv.clone())),
            }
        }
    }

    /// Pin a move: pruning will never drop it once
    /// `make_sure_considered_moves_are_included` has run.
    pub fn add_considered_move(&mut self, mv: &Move) {
        self.considered_moves.push(mv.clone());
    }

    pub fn is_considered_move(&self, mv: &Move) -> bool {
        self.considered_moves.contains(mv)
    }

    /// Re-include any considered move that pruning dropped.
    pub fn make_sure_considered_moves_are_included(&mut self) {
        let mut superset = self.moves(true, true);
        for mv in &self.considered_moves {
            if !superset.contains(mv) {
                superset.push(mv.clone());
            }
        }
        self.set_included_moves(&superset);
    }

    /// Stable-reorder `moves` so considered moves come first.
    pub fn considered_moves_first(&self, moves: &mut Vec<Move>) {
        moves.sort_by_key(|mv| usize::from(!self.is_considered_move(mv)));
    }

    /// Narrow the included set to at most `max_moves` of the best moves by
    /// equity, dropping any that trail the leader by more than
    /// `equity_threshold`.
    pub fn prune_to(&mut self, equity_threshold: f64, max_moves: usize) {
        let included = self.moves(true, false);
        let Some(best) = included.first() else {
            return;
        };
        let floor = best.equity - equity_threshold;
        let keep: Vec<Move> = included
            .into_iter()
            .take(max_moves)
            .filter(|mv| mv.equity >= floor)
            .collect();
        self.set_included_moves(&keep);
    }

    /// Zero every candidate's accumulators and the iteration counter.
    pub fn reset_numbers(&mut self) {
        for simmed in &mut self.simmed_moves {
            simmed.clear();
        }
        self.iterations = 0;
    }

    pub fn has_simulation_results(&self) -> bool {
        self.iterations >= 1
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// A copy of the candidate moves. With `prune`, excluded moves are
    /// filtered out. Once results exist, each copy carries its
    /// simulation-derived equity and win average; the list sorts by win
    /// when `by_win` is set and results exist, by equity otherwise.
    pub fn moves(&self, prune: bool, by_win: bool) -> Vec<Move> {
        let use_calculated = self.has_simulation_results();

        let mut ret: Vec<Move> = self
            .simmed_moves
            .iter()
            .filter(|simmed| !prune || simmed.include_in_simulation())
            .map(|simmed| {
                let mut mv = simmed.mv.clone();
                if use_calculated {
                    mv.equity = simmed.calculate_equity();
                    mv.win = simmed.wins.average();
                }
                mv
            })
            .collect();

        if by_win && use_calculated {
            ret.sort_by(|a, b| b.win.partial_cmp(&a.win).unwrap_or(std::cmp::Ordering::Equal));
        } else {
            ret.sort_by(|a, b| {
                b.equity
                    .partial_cmp(&a.equity)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        ret
    }

    pub fn simmed_moves(&self) -> &[SimmedMove] {
        &self.simmed_moves
    }

    /// The accumulator for `mv`. On a miss the last entry is returned, so
    /// callers that care must check existence themselves; `None` only when
    /// there are no candidates at all.
    pub fn simmed_move_for_move(&self, mv: &Move) -> Option<&SimmedMove> {
        self.simmed_moves
            .iter()
            .find(|simmed| simmed.mv == *mv)
            .or_else(|| self.simmed_moves.last())
    }

    pub fn num_levels(&self) -> usize {
        self.simmed_moves
            .first()
            .map_or(0, |simmed| simmed.levels.len())
    }

    pub fn num_players_at_level(&self, level: usize) -> usize {
        self.simmed_moves
            .first()
            .and_then(|simmed| simmed.levels.level(level))
            .map_or(0, |l| l.len())
    }

    /// Run up to `iterations` simulation iterations of `plies` lookahead
    /// plies each. The abort dispatch is consulted before every iteration;
    /// a stop keeps everything accumulated so far.
    pub fn simulate(&mut self, plies: i32, iterations: u32) -> Result<(), SimError> {
        debug!(plies, iterations, "starting simulation");
        for _ in 0..iterations {
            if let Some(dispatch) = &self.dispatch {
                if dispatch.should_abort() {
                    debug!(completed = self.iterations, "simulation aborted");
                    break;
                }
            }
            self.simulate_iteration(plies)?;
        }
        Ok(())
    }

    /// One full iteration: randomize the hidden state, roll out every
    /// included candidate, fold the results in.
    pub fn simulate_iteration(&mut self, plies: i32) -> Result<(), SimError> {
        self.iterations += 1;

        self.randomize_oppo_racks()?;
        self.randomize_drawing_order()?;

        let start_player = self.original.current_player();
        let players = self.original.players().len();
        let plan = PlyPlan::new(plies, players, self.config.unbounded_ply_cap);

        if self.log.is_logging() && !self.log.has_header() {
            self.log.begin_simulation();
        }
        self.log
            .open_frame(&format!("<iteration index=\"{}\">", self.iterations));

        for index in 0..self.simmed_moves.len() {
            if !self.simmed_moves[index].include_in_simulation() {
                continue;
            }

            self.simmed_moves[index]
                .levels
                .set_number_levels(plan.total_levels());
            let mut message = SimmedMoveMessage {
                id: self.simmed_moves[index].id(),
                levels: self.simmed_moves[index].levels.clone(),
                residual: 0.0,
                game_spread: 0,
                wins: 0.0,
                heuristic_win: false,
            };
            let candidate = self.simmed_moves[index].mv.clone();
            trace!(candidate = %candidate, "rolling out candidate");

            self.log.open_frame("<playahead>");
            run_playout(
                self.original.clone(),
                &candidate,
                &mut message,
                &plan,
                start_player,
                self.config.ignore_opponents,
                &self.estimator,
                &mut self.log,
            )?;
            if !message.heuristic_win {
                self.log
                    .line(&format!("<gameover win=\"{}\"/>", message.wins));
            }
            self.log.close_frame("</playahead>");

            self.incorporate_message(message);
        }

        self.log.close_frame("</iteration>");
        Ok(())
    }

    fn incorporate_message(&mut self, message: SimmedMoveMessage) {
        if let Some(simmed) = self
            .simmed_moves
            .iter_mut()
            .find(|simmed| simmed.id() == message.id)
        {
            simmed.incorporate(message);
        }
    }

    /// Redeal every opponent's rack from the unseen pool, keeping the
    /// known partial rack in place. Draws are uniform; an inference model
    /// over opponents' past plays could bias them here instead.
    fn randomize_oppo_racks(&mut self) -> Result<(), SimError> {
        self.original.ensure_proper_bag()?;

        let mut unseen = self.original.unseen_bag();
        let capacity = self.original.rack_capacity();
        let current = self.original.current_player();

        for player in self.original.players() {
            if player == current {
                continue;
            }
            let mut rack = self.partial_oppo_rack.clone();
            // The refill pool must not contain the tiles already fixed on
            // the rack.
            unseen.remove_tiles(rack.tiles());
            unseen.refill(&mut rack, capacity, &mut self.rng);
            self.original.set_player_rack(player, rack, true)?;
        }

        self.original.ensure_proper_bag()?;
        Ok(())
    }

    /// Fix this iteration's drawing order to a fresh shuffle, so every
    /// rollout of the iteration draws the same tiles at the same times.
    fn randomize_drawing_order(&mut self) -> Result<(), SimError> {
        let order = self.original.bag().shuffled(&mut self.rng);
        self.original.set_drawing_order(order)?;
        Ok(())
    }
}
