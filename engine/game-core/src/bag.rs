//! The bag of undrawn tiles.
//!
//! A `Bag` is a multiset with an explicit drawing order: `draw` always takes
//! the tile at the end of the internal list. Installing a permutation with
//! `set_drawing_order` therefore makes every subsequent in-order draw
//! deterministic, which is what lets a simulation fix its randomness up
//! front and replay the rest of an iteration reproducibly.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::error::EngineError;
use crate::rack::Rack;
use crate::tile::{tiles_from_letters, Tile};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bag {
    tiles: Vec<Tile>,
}

impl Bag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_letters(letters: &str) -> Self {
        Self {
            tiles: tiles_from_letters(letters),
        }
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Draw the next tile in the current drawing order.
    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }

    /// Draw a uniformly random tile, ignoring the drawing order.
    pub fn draw_random(&mut self, rng: &mut ChaCha20Rng) -> Option<Tile> {
        if self.tiles.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.tiles.len());
        Some(self.tiles.swap_remove(idx))
    }

    /// Return a tile to the bottom of the bag (drawn last).
    pub fn put_back(&mut self, tile: Tile) {
        self.tiles.insert(0, tile);
    }

    /// Remove one instance of each tile in `tiles`. Tiles the bag does not
    /// hold are skipped.
    pub fn remove_tiles(&mut self, tiles: &[Tile]) {
        for &t in tiles {
            if let Some(idx) = self.tiles.iter().position(|&b| b == t) {
                self.tiles.swap_remove(idx);
            }
        }
    }

    /// Fill `rack` up to `capacity` with uniformly random draws. Stops early
    /// when the bag runs dry.
    pub fn refill(&mut self, rack: &mut Rack, capacity: usize, rng: &mut ChaCha20Rng) {
        while rack.len() < capacity {
            match self.draw_random(rng) {
                Some(tile) => rack.add(tile),
                None => break,
            }
        }
    }

    /// Fill `rack` up to `capacity` following the current drawing order.
    pub fn replenish(&mut self, rack: &mut Rack, capacity: usize) {
        while rack.len() < capacity {
            match self.draw() {
                Some(tile) => rack.add(tile),
                None => break,
            }
        }
    }

    /// A shuffled copy of the bag's contents, suitable for
    /// `set_drawing_order`.
    pub fn shuffled(&self, rng: &mut ChaCha20Rng) -> Vec<Tile> {
        let mut tiles = self.tiles.clone();
        tiles.shuffle(rng);
        tiles
    }

    /// Replace the drawing order with `order`, which must be a permutation
    /// of the bag's current contents.
    pub fn set_drawing_order(&mut self, order: Vec<Tile>) -> Result<(), EngineError> {
        let mut current = self.tiles.clone();
        let mut proposed = order.clone();
        current.sort();
        proposed.sort();
        if current != proposed {
            return Err(EngineError::BagMismatch(format!(
                "drawing order is not a permutation of the bag ({} tiles vs {})",
                order.len(),
                self.tiles.len()
            )));
        }
        self.tiles = order;
        Ok(())
    }
}

impl fmt::Display for Bag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sorted = self.tiles.clone();
        sorted.sort();
        for tile in sorted {
            write!(f, "{}", tile)?;
        }
        Ok(())
    }
}
