//! Second-last-defender offside check, evaluated at pass commit time.
//!
//! A receiver is offside when, at the moment the pass is played, they stand
//! in the opponent half, ahead of the passer, and closer to the opponent
//! goal line than the second-last defender (goalkeeper excluded from the
//! count, as the keeper is normally the last one). Restart grace windows
//! suppress the check entirely; that is handled by the caller.

use super::{pitch, MatchEngine};
use crate::models::TeamSide;

impl MatchEngine {
    /// Whether a pass from `passer` to `receiver` (same side) is offside.
    pub fn check_offside(&self, passer: usize, receiver: usize) -> bool {
        let side = TeamSide::of_index(passer);
        debug_assert_eq!(side, TeamSide::of_index(receiver));

        let attacks_right = self.attacks_right(side);
        // Distance to the attacked goal line; smaller is more advanced.
        let to_goal_line = |x: f32| {
            if attacks_right {
                pitch::LENGTH_M - x
            } else {
                x
            }
        };

        let receiver_x = self.players[receiver].pos.x;
        let in_opponent_half = if attacks_right {
            receiver_x > pitch::CENTER_X
        } else {
            receiver_x < pitch::CENTER_X
        };
        if !in_opponent_half {
            return false;
        }
        if to_goal_line(receiver_x) >= to_goal_line(self.players[passer].pos.x) {
            return false;
        }

        // Second-last outfield defender; degenerate defenses fall back to
        // the goal line itself.
        let mut defender_dists: Vec<f32> = side
            .opposite()
            .range()
            .filter(|&idx| !self.players[idx].role.is_goalkeeper())
            .map(|idx| to_goal_line(self.players[idx].pos.x))
            .collect();
        defender_dists.sort_by(|a, b| a.partial_cmp(b).expect("finite coordinates"));
        let second_last = defender_dists.get(1).copied().unwrap_or(0.0);

        to_goal_line(receiver_x) < second_last
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::geometry::Vec2;
    use crate::engine::test_support::test_engine;
    use crate::engine::MatchEngine;
    use crate::models::TeamSide;

    /// Away outfielders form a line at `x`, keeper on the goal line.
    fn set_away_defense(engine: &mut MatchEngine, line_x: f32) {
        for (slot, idx) in TeamSide::Away.range().enumerate() {
            if slot == 0 {
                engine.place_player(idx, Vec2::new(104.0, 34.0));
            } else {
                engine.place_player(idx, Vec2::new(line_x, 10.0 + 2.0 * slot as f32));
            }
        }
    }

    #[test]
    fn test_receiver_beyond_defensive_line_is_offside() {
        let mut engine = test_engine(9);
        set_away_defense(&mut engine, 80.0);
        engine.place_player(5, Vec2::new(60.0, 34.0)); // passer
        engine.place_player(9, Vec2::new(85.0, 30.0)); // receiver past the line
        assert!(engine.check_offside(5, 9));
    }

    #[test]
    fn test_receiver_level_with_line_is_onside() {
        let mut engine = test_engine(9);
        set_away_defense(&mut engine, 80.0);
        engine.place_player(5, Vec2::new(60.0, 34.0));
        engine.place_player(9, Vec2::new(80.0, 30.0));
        assert!(!engine.check_offside(5, 9));
    }

    #[test]
    fn test_own_half_is_never_offside() {
        let mut engine = test_engine(9);
        set_away_defense(&mut engine, 40.0);
        engine.place_player(5, Vec2::new(20.0, 34.0));
        engine.place_player(9, Vec2::new(50.0, 30.0));
        assert!(!engine.check_offside(5, 9));
    }

    #[test]
    fn test_receiver_behind_passer_is_onside() {
        let mut engine = test_engine(9);
        set_away_defense(&mut engine, 80.0);
        engine.place_player(5, Vec2::new(90.0, 34.0));
        engine.place_player(9, Vec2::new(85.0, 30.0));
        assert!(!engine.check_offside(5, 9));
    }

    #[test]
    fn test_goalkeeper_does_not_count_as_defender() {
        let mut engine = test_engine(9);
        // Keeper deep, whole outfield pushed up to midfield.
        set_away_defense(&mut engine, 55.0);
        engine.place_player(5, Vec2::new(50.0, 34.0));
        engine.place_player(9, Vec2::new(70.0, 30.0));
        // Past the second-last outfielder even though the keeper is deeper.
        assert!(engine.check_offside(5, 9));
    }
}
