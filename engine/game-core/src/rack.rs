//! A player's rack of tiles.

use std::fmt;

use crate::tile::{tiles_from_letters, Tile};

/// The tiles a player currently holds. Order is not significant; `Display`
/// renders the tiles sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rack {
    tiles: Vec<Tile>,
}

impl Rack {
    /// Create an empty rack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rack from a string of letters, e.g. `"AEINRST"`.
    pub fn from_letters(letters: &str) -> Self {
        Self {
            tiles: tiles_from_letters(letters),
        }
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Add one tile to the rack.
    pub fn add(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Remove one instance of `tile`. Returns false when the rack does not
    /// hold it.
    pub fn remove(&mut self, tile: Tile) -> bool {
        match self.tiles.iter().position(|&t| t == tile) {
            Some(idx) => {
                self.tiles.swap_remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove one instance of each tile in `tiles`. Returns false (leaving
    /// the rack partially modified) when any tile is missing.
    pub fn remove_all(&mut self, tiles: &[Tile]) -> bool {
        tiles.iter().all(|&t| self.remove(t))
    }

    /// Multiset containment check.
    pub fn contains_all(&self, tiles: &[Tile]) -> bool {
        let mut scratch = self.clone();
        tiles.iter().all(|&t| scratch.remove(t))
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    /// The tiles left after removing one instance of each of `played`.
    /// Tiles that are not on the rack are ignored.
    pub fn leave(&self, played: &[Tile]) -> Rack {
        let mut rest = self.clone();
        for &t in played {
            rest.remove(t);
        }
        rest
    }
}

impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sorted = self.tiles.clone();
        sorted.sort();
        for tile in sorted {
            write!(f, "{}", tile)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_single_instance() {
        let mut rack = Rack::from_letters("AAB");
        assert!(rack.remove(Tile::from_char('A')));
        assert_eq!(rack.len(), 2);
        assert!(rack.contains_all(&tiles_from_letters("AB")));
    }

    #[test]
    fn test_remove_missing_tile() {
        let mut rack = Rack::from_letters("AB");
        assert!(!rack.remove(Tile::from_char('Z')));
        assert_eq!(rack.len(), 2);
    }

    #[test]
    fn test_contains_all_respects_multiplicity() {
        let rack = Rack::from_letters("AAB");
        assert!(rack.contains_all(&tiles_from_letters("AA")));
        assert!(!rack.contains_all(&tiles_from_letters("AAA")));
    }

    #[test]
    fn test_leave() {
        let rack = Rack::from_letters("AABC");
        let leave = rack.leave(&tiles_from_letters("AB"));
        assert_eq!(leave.len(), 2);
        assert!(leave.contains_all(&tiles_from_letters("AC")));
    }

    #[test]
    fn test_display_is_sorted() {
        let rack = Rack::from_letters("CBA");
        assert_eq!(rack.to_string(), "ABC");
    }
}
