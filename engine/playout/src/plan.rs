//! Lookahead depth decomposition.

/// How a requested ply count maps onto the level grid.
///
/// The candidate play itself occupies ply zero, so a request for `plies`
/// lookahead plies covers `plies + 1` turns in total. Those turns fill
/// `levels` full rounds of `players` turns each, plus a final partial
/// round of `decimal` turns. A negative request means "play out the whole
/// game" and is capped before decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlyPlan {
    /// Number of full rounds.
    pub levels: usize,
    /// Turns in the final partial round; zero means there is none.
    pub decimal: usize,
    /// Players per full round.
    pub players: usize,
}

impl PlyPlan {
    pub fn new(plies: i32, players: usize, unbounded_cap: u32) -> Self {
        let plies = if plies < 0 { unbounded_cap as i64 } else { plies as i64 };
        let total = (plies + 1) as usize;
        let decimal = total % players;
        let levels = (total - decimal) / players;
        Self {
            levels,
            decimal,
            players,
        }
    }

    /// Rounds to visit, the possibly-partial final one included.
    pub fn total_levels(&self) -> usize {
        self.levels + 1
    }

    /// Turn slots in round `level_number` (one-indexed). Zero for an
    /// empty final round.
    pub fn slots_at(&self, level_number: usize) -> usize {
        if level_number == self.levels + 1 {
            self.decimal
        } else {
            self.players
        }
    }

    /// Whether the turn at (`level_number`, `player_slot`), both
    /// one-indexed, is the acting player's last turn of the lookahead.
    pub fn is_final_turn_for_player(&self, level_number: usize, player_slot: usize) -> bool {
        if level_number == self.levels {
            player_slot > self.decimal
        } else if level_number == self.levels + 1 {
            player_slot <= self.decimal
        } else {
            false
        }
    }

    /// Whether the turn at (`level_number`, `player_slot`) is the last
    /// turn of the whole lookahead.
    pub fn is_very_final_turn(&self, level_number: usize, player_slot: usize) -> bool {
        (self.decimal == 0 && level_number == self.levels && player_slot == self.players)
            || (level_number == self.levels + 1 && player_slot == self.decimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_plies_is_just_the_candidate() {
        let plan = PlyPlan::new(0, 2, 1000);
        assert_eq!(plan.levels, 0);
        assert_eq!(plan.decimal, 1);
        assert_eq!(plan.total_levels(), 1);
        assert_eq!(plan.slots_at(1), 1);
        assert!(plan.is_final_turn_for_player(1, 1));
        assert!(plan.is_very_final_turn(1, 1));
    }

    #[test]
    fn test_two_plies_two_players() {
        let plan = PlyPlan::new(2, 2, 1000);
        assert_eq!(plan.levels, 1);
        assert_eq!(plan.decimal, 1);
        assert_eq!(plan.slots_at(1), 2);
        assert_eq!(plan.slots_at(2), 1);

        // The opponent's only turn is their last.
        assert!(!plan.is_final_turn_for_player(1, 1));
        assert!(plan.is_final_turn_for_player(1, 2));
        // The root player's turn in the partial round is both their last
        // and the lookahead's last.
        assert!(plan.is_final_turn_for_player(2, 1));
        assert!(plan.is_very_final_turn(2, 1));
        assert!(!plan.is_very_final_turn(1, 2));
    }

    #[test]
    fn test_three_plies_two_players_has_no_partial_round() {
        let plan = PlyPlan::new(3, 2, 1000);
        assert_eq!(plan.levels, 2);
        assert_eq!(plan.decimal, 0);
        assert_eq!(plan.slots_at(3), 0, "empty final round is skipped");
        assert!(plan.is_final_turn_for_player(2, 1));
        assert!(plan.is_final_turn_for_player(2, 2));
        assert!(plan.is_very_final_turn(2, 2));
        assert!(!plan.is_very_final_turn(2, 1));
    }

    #[test]
    fn test_negative_request_is_capped() {
        let plan = PlyPlan::new(-1, 2, 1000);
        // 1000 capped plies plus the candidate.
        assert_eq!(plan.levels * 2 + plan.decimal, 1001);
        assert_eq!(plan.levels, 500);
        assert_eq!(plan.decimal, 1);
    }

    #[test]
    fn test_three_player_decomposition() {
        let plan = PlyPlan::new(4, 3, 1000);
        // Five turns: one full round of three, partial round of two.
        assert_eq!(plan.levels, 1);
        assert_eq!(plan.decimal, 2);
        assert_eq!(plan.slots_at(1), 3);
        assert_eq!(plan.slots_at(2), 2);
        assert!(plan.is_final_turn_for_player(1, 3));
        assert!(!plan.is_final_turn_for_player(1, 2));
        assert!(plan.is_final_turn_for_player(2, 1));
        assert!(plan.is_very_final_turn(2, 2));
    }
}
