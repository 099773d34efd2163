use super::*;
use game_core::tile::tiles_from_letters;
use rand::SeedableRng;

fn place_tiles(mv: &Move) -> Vec<Tile> {
    mv.tiles().to_vec()
}

#[test]
fn test_candidate_moves_are_deterministic_and_sorted() {
    // Rack ABC with values A=1, B=3, C=3; capacity 3.
    let position = TileRowPosition::new(&["ABC", "DEE"], "FGH", 3);
    let moves = position.candidate_moves();

    // Three place moves (top 1, 2, 3 tiles by value) plus a pass.
    assert_eq!(moves.len(), 4);

    // Best move plays the whole rack for the bingo bonus: 3+3+1+50.
    assert_eq!(moves[0].score, 57);
    assert!(moves[0].is_bingo);
    assert_eq!(place_tiles(&moves[0]), tiles_from_letters("BCA"));

    // Sorted by equity descending.
    for pair in moves.windows(2) {
        assert!(
            pair[0].equity >= pair[1].equity,
            "moves out of order: {} before {}",
            pair[0].equity,
            pair[1].equity
        );
    }

    // Same position, same list.
    assert_eq!(position.candidate_moves(), moves);
}

#[test]
fn test_static_best_move_matches_move_list() {
    let position = TileRowPosition::new(&["ABC", "DEE"], "FGH", 3);
    let best = position.static_best_move();
    assert_eq!(best, position.candidate_moves()[0]);
}

#[test]
fn test_static_best_move_on_empty_rack_is_pass() {
    let position = TileRowPosition::new(&["", "DEE"], "FGH", 3);
    assert!(position.static_best_move().is_pass());
}

#[test]
fn test_commit_place_scores_refills_and_advances() {
    let mut position = TileRowPosition::new(&["ABC", "DEE"], "FGH", 3);
    let mv = position
        .candidate_moves()
        .into_iter()
        .find(|m| m.tiles().len() == 2)
        .expect("two-tile move exists");
    assert_eq!(mv.score, 6); // B + C

    position.set_candidate(&mv);
    position.commit_candidate(true).unwrap();

    assert_eq!(position.score(PlayerId(0)), 6);
    assert_eq!(position.current_player(), PlayerId(1));
    // Rack refilled to capacity from the end of the bag.
    let rack = position.rack(PlayerId(0));
    assert_eq!(rack.len(), 3);
    assert!(rack.contains_all(&tiles_from_letters("AHG")));
    assert_eq!(position.bag_size(), 1);
}

#[test]
fn test_commit_without_maintain_skips_bookkeeping() {
    let mut position = TileRowPosition::new(&["ABC", "DEE"], "FGH", 3);
    let mv = position.static_best_move();
    position.set_candidate(&mv);
    position.commit_candidate(false).unwrap();

    // Score applied, but no refill and no turn change.
    assert_eq!(position.score(PlayerId(0)), 57);
    assert_eq!(position.current_player(), PlayerId(0));
    assert!(position.rack(PlayerId(0)).is_empty());
    assert_eq!(position.bag_size(), 3);
}

#[test]
fn test_commit_without_candidate_is_an_error() {
    let mut position = TileRowPosition::new(&["ABC", "DEE"], "FGH", 3);
    assert!(matches!(
        position.commit_candidate(true),
        Err(EngineError::NoCandidate)
    ));
}

#[test]
fn test_commit_rejects_tiles_not_on_rack() {
    let mut position = TileRowPosition::new(&["ABC", "DEE"], "FGH", 3);
    let mv = Move::place(0, 0, true, tiles_from_letters("ZZ"), 20);
    position.set_candidate(&mv);
    assert!(matches!(
        position.commit_candidate(true),
        Err(EngineError::IllegalMove(_))
    ));
}

#[test]
fn test_play_out_collects_deadwood() {
    // Empty bag, so playing the whole rack ends the game.
    let mut position = TileRowPosition::new(&["AB", "C"], "", 2);
    let out = position.static_best_move();
    assert!(position.does_move_end_game(&out));
    assert_eq!(position.deadwood_score(), 3); // opponent holds C

    position.set_candidate(&out);
    position.commit_candidate(true).unwrap();

    assert!(position.game_over());
    // 4 points played, 50 bingo, 3 deadwood.
    assert_eq!(position.score(PlayerId(0)), 57);
    assert_eq!(position.spread(PlayerId(0)), 57);
    // Game over: the turn does not advance.
    assert_eq!(position.current_player(), PlayerId(0));
}

#[test]
fn test_does_move_end_game_requires_empty_bag() {
    let position = TileRowPosition::new(&["AB", "C"], "D", 2);
    let out = position.static_best_move();
    assert!(!position.does_move_end_game(&out));
}

#[test]
fn test_pass_out_deducts_own_racks() {
    let mut position = TileRowPosition::new(&["AB", "CD"], "", 2);
    for _ in 0..4 {
        assert!(!position.game_over());
        position.set_candidate(&Move::pass());
        position.commit_candidate(true).unwrap();
    }
    assert!(position.game_over());
    assert_eq!(position.score(PlayerId(0)), -4); // A + B
    assert_eq!(position.score(PlayerId(1)), -5); // C + D
    assert_eq!(position.spread(PlayerId(0)), 1);
}

#[test]
fn test_place_resets_pass_count() {
    let mut position = TileRowPosition::new(&["AB", "CD"], "EF", 2);
    position.set_candidate(&Move::pass());
    position.commit_candidate(true).unwrap();
    assert_eq!(position.consecutive_passes(), 1);

    let mv = position.static_best_move();
    position.set_candidate(&mv);
    position.commit_candidate(true).unwrap();
    assert_eq!(position.consecutive_passes(), 0);
}

#[test]
fn test_exchange_draws_in_bag_order_and_returns_tiles() {
    let mut position = TileRowPosition::new(&["AB", "CD"], "EF", 2);
    let mv = Move::exchange(tiles_from_letters("A"));
    position.set_candidate(&mv);
    position.commit_candidate(true).unwrap();

    // Drew F (end of the bag), gave back A.
    let rack = position.rack(PlayerId(0));
    assert!(rack.contains_all(&tiles_from_letters("BF")));
    assert_eq!(position.bag_size(), 2);
    let mut bag_tiles = position.bag().tiles().to_vec();
    bag_tiles.sort();
    assert_eq!(bag_tiles, tiles_from_letters("AE"));
}

#[test]
fn test_unseen_bag_hides_only_own_rack() {
    let position = TileRowPosition::new(&["AB", "CD"], "EF", 2);
    let unseen = position.unseen_bag();
    assert_eq!(unseen.len(), 4);
    let mut tiles = unseen.tiles().to_vec();
    tiles.sort();
    assert_eq!(tiles, tiles_from_letters("CDEF"));
}

#[test]
fn test_set_player_rack_then_ensure_proper_bag() {
    let mut position = TileRowPosition::new(&["AB", "CD"], "EF", 2);
    position
        .set_player_rack(PlayerId(1), Rack::from_letters("EF"), true)
        .unwrap();
    position.ensure_proper_bag().unwrap();

    assert_eq!(position.rack(PlayerId(1)), Rack::from_letters("EF"));
    let mut bag_tiles = position.bag().tiles().to_vec();
    bag_tiles.sort();
    assert_eq!(bag_tiles, tiles_from_letters("CD"));
}

#[test]
fn test_ensure_proper_bag_detects_excess_tiles() {
    let mut position = TileRowPosition::new(&["AB", "CD"], "EF", 2);
    position
        .set_player_rack(PlayerId(1), Rack::from_letters("ZZZ"), false)
        .unwrap();
    assert!(matches!(
        position.ensure_proper_bag(),
        Err(EngineError::BagMismatch(_))
    ));
}

#[test]
fn test_spread_against_best_opponent() {
    let mut position = TileRowPosition::new(&["AB", "CD", "EF"], "GH", 2);
    let mv = position.static_best_move();
    position.set_candidate(&mv);
    position.commit_candidate(true).unwrap();
    let lead = position.score(PlayerId(0));
    assert!(lead > 0);
    assert_eq!(position.spread(PlayerId(0)), lead);
    assert_eq!(position.spread(PlayerId(1)), -lead);
    assert_eq!(position.spread(PlayerId(2)), -lead);
}

#[test]
fn test_standard_deal() {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let position = TileRowPosition::standard(2, &mut rng);
    assert_eq!(position.players().len(), 2);
    for player in position.players() {
        assert_eq!(position.rack(player).len(), STANDARD_RACK_CAPACITY);
    }
    assert!(!position.game_over());
    assert!(!position.candidate_moves().is_empty());
}

#[test]
fn test_standard_deal_is_seed_reproducible() {
    let a = TileRowPosition::standard(2, &mut ChaCha20Rng::seed_from_u64(7));
    let b = TileRowPosition::standard(2, &mut ChaCha20Rng::seed_from_u64(7));
    assert_eq!(a.rack(PlayerId(0)), b.rack(PlayerId(0)));
    assert_eq!(a.rack(PlayerId(1)), b.rack(PlayerId(1)));
}
