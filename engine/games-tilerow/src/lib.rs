//! TileRow, a miniature tile game for exercising analysis code
//!
//! TileRow keeps the parts of a crossword-style game that matter to
//! lookahead analysis (racks drawn from a shared bag, scored tile plays,
//! exchanges, passes, an end-of-game bonus for going out) and strips the
//! parts that do not (a real board and lexicon). Move generation is
//! intentionally naive and fully deterministic: every "play the k most
//! valuable tiles" move is offered, so tests can predict scores exactly.
//!
//! The game ends when a player plays out their rack with an empty bag
//! (collecting the other players' unplayed tile values as a bonus), or
//! after two full rounds of scoreless turns (each player then deducts
//! their own unplayed tiles).

use game_core::{Bag, EngineError, GamePosition, Move, Play, PlayerId, Rack, Tile};
use rand_chacha::ChaCha20Rng;

#[cfg(test)]
mod tests;

/// Standard letter values, A through Z.
const TILE_VALUES: [i32; 26] = [
    1, 3, 3, 2, 1, 4, 2, 4, 1, 8, 5, 1, 3, 1, 1, 3, 10, 1, 1, 1, 1, 4, 4, 8, 4, 10,
];

/// Reduced letter distribution used by `TileRowPosition::standard`.
const STANDARD_DISTRIBUTION: &str =
    "AAAAABBCCDDEEEEEEFFGGHHIIIIIJKLLLMMNNNNOOOOOPPQRRRRSSSSTTTTUUUVVWWXYZ";

/// Default rack size.
pub const STANDARD_RACK_CAPACITY: usize = 5;

/// Bonus for playing a full rack in one turn.
const BINGO_BONUS: i32 = 50;

pub fn tile_value(tile: Tile) -> i32 {
    tile.alphabet_index().map_or(0, |i| TILE_VALUES[i])
}

pub fn rack_value(rack: &Rack) -> i32 {
    rack.tiles().iter().map(|&t| tile_value(t)).sum()
}

/// Leave valuation: low-value tiles are worth holding on to, high-value
/// tiles clog the rack. Deliberately simple and deterministic.
fn leave_value(tiles: &[Tile]) -> f64 {
    tiles
        .iter()
        .map(|&t| 1.5 - 0.25 * tile_value(t) as f64)
        .sum()
}

/// A TileRow game position.
#[derive(Debug, Clone)]
pub struct TileRowPosition {
    racks: Vec<Rack>,
    scores: Vec<i32>,
    bag: Bag,
    current: usize,
    rack_capacity: usize,
    consecutive_passes: usize,
    game_over: bool,
    candidate: Option<Move>,
    /// Tiles committed to the board so far.
    played: Vec<Tile>,
    /// Full tile distribution the game started with, for bag auditing.
    initial_tiles: Vec<Tile>,
    plays_made: u32,
}

impl TileRowPosition {
    /// Build a position with exact racks and bag contents. The first rack
    /// belongs to the player to move.
    pub fn new(racks: &[&str], bag: &str, rack_capacity: usize) -> Self {
        let racks: Vec<Rack> = racks.iter().map(|r| Rack::from_letters(r)).collect();
        let bag = Bag::from_letters(bag);
        let mut initial_tiles: Vec<Tile> = bag.tiles().to_vec();
        for rack in &racks {
            initial_tiles.extend_from_slice(rack.tiles());
        }
        let scores = vec![0; racks.len()];
        Self {
            racks,
            scores,
            bag,
            current: 0,
            rack_capacity,
            consecutive_passes: 0,
            game_over: false,
            candidate: None,
            played: Vec::new(),
            initial_tiles,
            plays_made: 0,
        }
    }

    /// A freshly dealt game over the standard distribution.
    pub fn standard(num_players: usize, rng: &mut ChaCha20Rng) -> Self {
        let mut position = Self::new(
            &vec![""; num_players],
            STANDARD_DISTRIBUTION,
            STANDARD_RACK_CAPACITY,
        );
        let order = position.bag.shuffled(rng);
        position.bag = Bag::from_tiles(order);
        for idx in 0..num_players {
            position
                .bag
                .replenish(&mut position.racks[idx], STANDARD_RACK_CAPACITY);
        }
        position
    }

    pub fn score(&self, player: PlayerId) -> i32 {
        self.scores.get(player.0 as usize).copied().unwrap_or(0)
    }

    pub fn consecutive_passes(&self) -> usize {
        self.consecutive_passes
    }

    /// Rack tiles sorted most valuable first, ties broken alphabetically.
    fn tiles_by_value(&self, rack: &Rack) -> Vec<Tile> {
        let mut tiles = rack.tiles().to_vec();
        tiles.sort_by_key(|&t| (-tile_value(t), t));
        tiles
    }

    fn place_move(&self, tiles: Vec<Tile>, rack: &Rack) -> Move {
        let mut score: i32 = tiles.iter().map(|&t| tile_value(t)).sum();
        let is_bingo = tiles.len() == self.rack_capacity;
        if is_bingo {
            score += BINGO_BONUS;
        }
        let leave = rack.leave(&tiles);
        let col = (self.plays_made % 26) as u8;
        let mut mv =
            Move::place(0, col, true, tiles, score).with_equity(score as f64 + leave_value(leave.tiles()));
        if is_bingo {
            mv = mv.as_bingo();
        }
        mv
    }

    fn end_by_passes(&mut self) {
        self.game_over = true;
        for (idx, rack) in self.racks.iter().enumerate() {
            self.scores[idx] -= rack_value(rack);
        }
    }

    fn count_tiles(tiles: &[Tile]) -> [i32; 256] {
        let mut counts = [0i32; 256];
        for &t in tiles {
            counts[t.0 as usize] += 1;
        }
        counts
    }
}

impl GamePosition for TileRowPosition {
    fn candidate_moves(&self) -> Vec<Move> {
        if self.game_over {
            return Vec::new();
        }
        let rack = &self.racks[self.current];
        let by_value = self.tiles_by_value(rack);
        let mut moves: Vec<Move> = (1..=by_value.len())
            .map(|k| self.place_move(by_value[..k].to_vec(), rack))
            .collect();
        moves.push(Move::pass().with_equity(leave_value(rack.tiles())));
        moves.sort_by(|a, b| {
            b.equity
                .partial_cmp(&a.equity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        moves
    }

    fn current_player(&self) -> PlayerId {
        PlayerId(self.current as u8)
    }

    fn players(&self) -> Vec<PlayerId> {
        (0..self.racks.len()).map(|i| PlayerId(i as u8)).collect()
    }

    fn rack(&self, player: PlayerId) -> Rack {
        self.racks
            .get(player.0 as usize)
            .cloned()
            .unwrap_or_default()
    }

    fn rack_capacity(&self) -> usize {
        self.rack_capacity
    }

    fn bag(&self) -> &Bag {
        &self.bag
    }

    fn unseen_bag(&self) -> Bag {
        let mut tiles = self.bag.tiles().to_vec();
        for (idx, rack) in self.racks.iter().enumerate() {
            if idx != self.current {
                tiles.extend_from_slice(rack.tiles());
            }
        }
        Bag::from_tiles(tiles)
    }

    fn static_best_move(&self) -> Move {
        if self.game_over || self.racks[self.current].is_empty() {
            return Move::pass();
        }
        self.candidate_moves()
            .into_iter()
            .next()
            .unwrap_or_else(Move::pass)
    }

    fn does_move_end_game(&self, mv: &Move) -> bool {
        match &mv.play {
            Play::Place { tiles, .. } => {
                self.bag.is_empty() && tiles.len() == self.racks[self.current].len()
            }
            _ => false,
        }
    }

    fn deadwood_score(&self) -> i32 {
        self.racks
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != self.current)
            .map(|(_, rack)| rack_value(rack))
            .sum()
    }

    fn spread(&self, player: PlayerId) -> i32 {
        let own = self.score(player);
        let best_other = self
            .scores
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != player.0 as usize)
            .map(|(_, &s)| s)
            .max()
            .unwrap_or(0);
        own - best_other
    }

    fn game_over(&self) -> bool {
        self.game_over
    }

    fn player_consideration(&self, mv: &Move) -> f64 {
        let leave = self.racks[self.current].leave(mv.tiles());
        leave_value(leave.tiles())
    }

    fn shared_consideration(&self, _mv: &Move) -> f64 {
        if self.bag.len() < self.rack_capacity {
            (self.rack_capacity - self.bag.len()) as f64 * 0.1
        } else {
            0.0
        }
    }

    fn set_candidate(&mut self, mv: &Move) {
        self.candidate = Some(mv.clone());
    }

    fn commit_candidate(&mut self, maintain_board: bool) -> Result<(), EngineError> {
        let mv = self.candidate.take().ok_or(EngineError::NoCandidate)?;
        match &mv.play {
            Play::Pass => {
                self.consecutive_passes += 1;
                if self.consecutive_passes >= 2 * self.racks.len() {
                    self.end_by_passes();
                }
            }
            Play::Exchange { tiles } => {
                if !self.racks[self.current].contains_all(tiles) {
                    return Err(EngineError::IllegalMove(format!(
                        "exchange tiles not on rack: {}",
                        mv
                    )));
                }
                if self.bag.len() < tiles.len() {
                    return Err(EngineError::IllegalMove(
                        "bag too small to exchange".to_string(),
                    ));
                }
                self.racks[self.current].remove_all(tiles);
                for _ in 0..tiles.len() {
                    if let Some(t) = self.bag.draw() {
                        self.racks[self.current].add(t);
                    }
                }
                for &t in tiles {
                    self.bag.put_back(t);
                }
                self.consecutive_passes += 1;
                if self.consecutive_passes >= 2 * self.racks.len() {
                    self.end_by_passes();
                }
            }
            Play::Place { tiles, .. } => {
                if !self.racks[self.current].contains_all(tiles) {
                    return Err(EngineError::IllegalMove(format!(
                        "played tiles not on rack: {}",
                        mv
                    )));
                }
                self.racks[self.current].remove_all(tiles);
                self.played.extend_from_slice(tiles);
                self.scores[self.current] += mv.score;
                self.consecutive_passes = 0;
                self.plays_made += 1;
                if self.racks[self.current].is_empty() && self.bag.is_empty() {
                    let bonus = self.deadwood_score();
                    self.scores[self.current] += bonus;
                    self.game_over = true;
                }
            }
        }
        if maintain_board && !self.game_over {
            let capacity = self.rack_capacity;
            self.bag.replenish(&mut self.racks[self.current], capacity);
            self.current = (self.current + 1) % self.racks.len();
        }
        Ok(())
    }

    fn set_player_rack(
        &mut self,
        player: PlayerId,
        rack: Rack,
        adjust_bag: bool,
    ) -> Result<(), EngineError> {
        let idx = player.0 as usize;
        if idx >= self.racks.len() {
            return Err(EngineError::UnknownPlayer(player.0));
        }
        if adjust_bag {
            let old = std::mem::take(&mut self.racks[idx]);
            for &t in old.tiles() {
                self.bag.put_back(t);
            }
            // Best effort; a following ensure_proper_bag settles the totals
            // when the new rack was drawn from tiles held elsewhere.
            self.bag.remove_tiles(rack.tiles());
        }
        self.racks[idx] = rack;
        Ok(())
    }

    fn set_drawing_order(&mut self, order: Vec<Tile>) -> Result<(), EngineError> {
        self.bag.set_drawing_order(order)
    }

    fn ensure_proper_bag(&mut self) -> Result<(), EngineError> {
        let mut counts = Self::count_tiles(&self.initial_tiles);
        for (byte, count) in Self::count_tiles(&self.played).iter().enumerate() {
            counts[byte] -= count;
        }
        for rack in &self.racks {
            for (byte, count) in Self::count_tiles(rack.tiles()).iter().enumerate() {
                counts[byte] -= count;
            }
        }
        if let Some(byte) = counts.iter().position(|&c| c < 0) {
            return Err(EngineError::BagMismatch(format!(
                "more {} tiles in play than the game started with",
                Tile(byte as u8)
            )));
        }
        let current = Self::count_tiles(self.bag.tiles());
        if current != counts {
            let mut tiles = Vec::new();
            for (byte, &count) in counts.iter().enumerate() {
                for _ in 0..count {
                    tiles.push(Tile(byte as u8));
                }
            }
            self.bag = Bag::from_tiles(tiles);
        }
        Ok(())
    }
}
