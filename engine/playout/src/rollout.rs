//! One candidate's playout within a simulation iteration.
//!
//! The driver plays the candidate, then up to the planned number of
//! further turns using the engine's fast static policy, recording a score
//! and bingo sample per turn slot and a residual leave valuation at each
//! player's last simulated turn. The game copy it runs on is discarded
//! afterwards; everything observable ends up in the message.

use game_core::{GamePosition, Move, PlayerId};

use crate::estimator::WinEstimator;
use crate::log::TraceLog;
use crate::plan::PlyPlan;
use crate::simmed::SimmedMoveMessage;
use crate::simulator::SimError;

#[allow(clippy::too_many_arguments)]
pub(crate) fn run_playout<G: GamePosition, W: WinEstimator>(
    mut game: G,
    candidate: &Move,
    message: &mut SimmedMoveMessage,
    plan: &PlyPlan,
    start_player: PlayerId,
    ignore_opponents: bool,
    estimator: &W,
    log: &mut TraceLog,
) -> Result<(), SimError> {
    let mut residual = 0.0;

    'levels: for level_number in 1..=plan.total_levels() {
        if game.game_over() {
            break;
        }
        let slots = plan.slots_at(level_number);
        if slots == 0 {
            continue;
        }
        message.levels.level_mut(level_number - 1).set_number_scores(slots);

        for player_slot in 1..=slots {
            if game.game_over() {
                break 'levels;
            }
            let player_id = game.current_player();
            if log.is_logging() {
                let ply_index = (level_number - 1) * plan.players + player_slot - 1;
                log.open_frame(&format!("<ply index=\"{}\">", ply_index));
            }

            let mv = if level_number == 1 && player_id == start_player {
                candidate.clone()
            } else if ignore_opponents && player_id != start_player {
                Move::pass()
            } else {
                game.static_best_move()
            };

            // A game-ending play collects the other players' unplayed
            // tiles. Record it with the play's sample here; the engine
            // adds the same bonus itself when the move commits, so the
            // move is left untouched.
            let mut recorded_score = mv.score;
            if game.does_move_end_game(&mv) {
                recorded_score += game.deadwood_score();
            }

            let statistics =
                &mut message.levels.level_mut(level_number - 1).statistics[player_slot - 1];
            statistics.score.incorporate(recorded_score as f64);
            statistics.bingos.incorporate(if mv.is_bingo { 1.0 } else { 0.0 });

            if log.is_logging() {
                log.line(&format!("<rack tiles=\"{}\"/>", game.rack(player_id)));
                log.line(&format!(
                    "<move notation=\"{}\" score=\"{}\"/>",
                    mv, recorded_score
                ));
            }

            let final_for_player = plan.is_final_turn_for_player(level_number, player_slot);
            let very_final = plan.is_very_final_turn(level_number, player_slot);

            if final_for_player && !(ignore_opponents && player_id != start_player) {
                let mut addend = game.player_consideration(&mv);
                if log.is_logging() {
                    log.line(&format!("<pc value=\"{}\"/>", addend));
                }

                if very_final {
                    let shared = game.shared_consideration(&mv);
                    addend += shared;
                    if shared != 0.0 && log.is_logging() {
                        log.line(&format!("<sc value=\"{}\"/>", shared));
                    }
                }

                if player_id == start_player {
                    residual += addend;
                } else {
                    residual -= addend;
                }
            }

            game.set_candidate(&mv);
            // The last simulated turn skips the between-turns bookkeeping;
            // nothing will be played on this copy afterwards.
            game.commit_candidate(!very_final)?;
            log.close_frame("</ply>");
        }
    }

    message.residual = residual;
    let spread = game.spread(start_player);
    message.game_spread = spread;

    if game.game_over() {
        message.heuristic_win = false;
        message.wins = match spread.cmp(&0) {
            std::cmp::Ordering::Greater => 1.0,
            std::cmp::Ordering::Equal => 0.5,
            std::cmp::Ordering::Less => 0.0,
        };
    } else {
        message.heuristic_win = true;
        let resource_units = (game.bag_size() + game.rack_capacity()) as u32;
        message.wins = if game.current_player() == start_player {
            estimator.win_probability((spread as f64 + residual) as i32, resource_units)
        } else {
            1.0 - estimator.win_probability((-(spread as f64) - residual) as i32, resource_units)
        };
    }

    Ok(())
}
