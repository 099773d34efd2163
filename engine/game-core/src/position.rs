//! The per-position capability interface a rules engine exposes.

use std::fmt;

use crate::bag::Bag;
use crate::error::EngineError;
use crate::moves::Move;
use crate::rack::Rack;
use crate::tile::Tile;

/// Player identifier. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(pub u8);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A game position as analysis code sees it.
///
/// The trait is the whole contract: callers never look at a board or a
/// lexicon, only at moves, racks, the bag, and scores. Implementations must
/// be cheap to clone, because lookahead code copies the position once per
/// rollout and plays the copy forward.
///
/// Committing a move is a two-step protocol taken from play-by-play engines:
/// `set_candidate` stages the move, `commit_candidate` applies it. With
/// `maintain_board` set, the commit also performs the between-turns
/// bookkeeping (replacement tiles are drawn in bag order and the turn passes
/// to the next player); without it that bookkeeping is skipped, which is
/// what a driver wants on the last ply it will ever play on the copy.
pub trait GamePosition: Clone {
    /// The engine's enumerated moves for this position, best first.
    fn candidate_moves(&self) -> Vec<Move>;

    /// The player to move.
    fn current_player(&self) -> PlayerId;

    /// All players, in turn order.
    fn players(&self) -> Vec<PlayerId>;

    /// A player's current rack.
    fn rack(&self, player: PlayerId) -> Rack;

    /// Full rack size for this game.
    fn rack_capacity(&self) -> usize;

    /// The undrawn tiles.
    fn bag(&self) -> &Bag;

    fn bag_size(&self) -> usize {
        self.bag().len()
    }

    /// Every tile hidden from the player to move: the bag plus all other
    /// players' racks.
    fn unseen_bag(&self) -> Bag;

    /// A fast heuristic best move for the player to move. Not a search.
    fn static_best_move(&self) -> Move;

    /// Whether committing `mv` would end the game.
    fn does_move_end_game(&self, mv: &Move) -> bool;

    /// The end-of-game bonus the player to move would collect for going
    /// out, computed from the other players' unplayed tiles.
    fn deadwood_score(&self) -> i32;

    /// `player`'s score minus the best other score.
    fn spread(&self, player: PlayerId) -> i32;

    fn game_over(&self) -> bool;

    /// Leave valuation for the rack `mv` would leave behind.
    fn player_consideration(&self, mv: &Move) -> f64;

    /// Valuation of shared resources (board, bag) after `mv`.
    fn shared_consideration(&self, mv: &Move) -> f64;

    /// Stage `mv` for commit.
    fn set_candidate(&mut self, mv: &Move);

    /// Apply the staged candidate. See the trait docs for `maintain_board`.
    fn commit_candidate(&mut self, maintain_board: bool) -> Result<(), EngineError>;

    /// Overwrite a player's rack. With `adjust_bag`, the old rack returns
    /// to the bag and the new rack's tiles are taken from it.
    fn set_player_rack(
        &mut self,
        player: PlayerId,
        rack: Rack,
        adjust_bag: bool,
    ) -> Result<(), EngineError>;

    /// Install a deterministic drawing order; must be a permutation of the
    /// bag's contents.
    fn set_drawing_order(&mut self, order: Vec<Tile>) -> Result<(), EngineError>;

    /// Re-derive the bag from the total tile distribution, the board, and
    /// the racks, fixing up any drift introduced by rack rewrites.
    fn ensure_proper_bag(&mut self) -> Result<(), EngineError>;
}
