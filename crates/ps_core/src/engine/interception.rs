//! Pass interception geometry.
//!
//! Interception is decided at pass commit time, not during the flight: each
//! opponent close enough to the flight corridor races the ball to its
//! projection point, and the earliest one that clearly beats the ball wins.
//! The result is baked into the flight record and executed by the physics
//! tick when the ball reaches that point.

use super::geometry::{distance_to_segment, lerp_position, Vec2};
use super::MatchEngine;
use crate::models::TeamSide;

impl MatchEngine {
    /// Pick the interceptor for a pass from `start` to `end` played by
    /// `passing_side`, if any: (player, intercept point, absolute ms).
    pub(crate) fn find_interceptor(
        &self,
        start: Vec2,
        end: Vec2,
        duration_ms: u64,
        passing_side: TeamSide,
    ) -> Option<(usize, Vec2, u64)> {
        let cfg = &self.cfg.decision;
        let base_speed = self.cfg.physics.player_speed_mps;
        let min_factor = self.cfg.stamina.min_speed_factor;

        let mut best: Option<(usize, f32)> = None;
        for idx in passing_side.opposite().range() {
            let player = &self.players[idx];
            let (dist, t) = distance_to_segment(player.pos, start, end);
            if dist > cfg.corridor_width_m {
                continue;
            }

            let ball_t_s = duration_ms as f32 / 1_000.0 * t;
            let speed = player.effective_speed(base_speed, min_factor);
            if speed <= 0.0 {
                continue;
            }
            let travel_s = dist / speed;
            if travel_s >= ball_t_s * cfg.intercept_margin {
                continue;
            }

            if best.map(|(_, bt)| t < bt).unwrap_or(true) {
                best = Some((idx, t));
            }
        }

        best.map(|(idx, t)| {
            let point = lerp_position(start, end, t);
            let at_ms = self.now_ms + (duration_ms as f32 * t) as u64;
            (idx, point, at_ms)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::test_engine;
    use crate::models::TeamSide;

    #[test]
    fn test_defender_on_the_lane_intercepts() {
        let mut engine = test_engine(5);
        engine.force_in_play();
        let start = Vec2::new(30.0, 34.0);
        let end = Vec2::new(60.0, 34.0);
        // Park the away side far off the lane, then put one right on it.
        for idx in TeamSide::Away.range() {
            engine.place_player(idx, Vec2::new(90.0, 5.0));
        }
        engine.place_player(15, Vec2::new(45.0, 34.5));

        let hit = engine.find_interceptor(start, end, 2_400, TeamSide::Home);
        match hit {
            Some((idx, point, _)) => {
                assert_eq!(idx, 15);
                assert!((point.y - 34.0).abs() < 1e-4);
                assert!(point.x > start.x && point.x < end.x);
            }
            None => panic!("expected an interception"),
        }
    }

    #[test]
    fn test_clear_corridor_is_safe() {
        let mut engine = test_engine(5);
        engine.force_in_play();
        for idx in TeamSide::Away.range() {
            engine.place_player(idx, Vec2::new(90.0, 5.0));
        }
        let hit = engine.find_interceptor(
            Vec2::new(30.0, 60.0),
            Vec2::new(50.0, 60.0),
            1_500,
            TeamSide::Home,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_own_team_never_intercepts() {
        let mut engine = test_engine(5);
        engine.force_in_play();
        for idx in 0..22 {
            engine.place_player(idx, Vec2::new(90.0, 5.0));
        }
        // A home player standing on the lane of a home pass is a receiver
        // situation, not an interception.
        engine.place_player(3, Vec2::new(40.0, 20.0));
        let hit = engine.find_interceptor(
            Vec2::new(30.0, 20.0),
            Vec2::new(50.0, 20.0),
            1_500,
            TeamSide::Home,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_earliest_projection_wins() {
        let mut engine = test_engine(5);
        engine.force_in_play();
        for idx in TeamSide::Away.range() {
            engine.place_player(idx, Vec2::new(90.0, 5.0));
        }
        engine.place_player(14, Vec2::new(55.0, 34.2));
        engine.place_player(17, Vec2::new(40.0, 33.8));

        let hit = engine.find_interceptor(
            Vec2::new(30.0, 34.0),
            Vec2::new(70.0, 34.0),
            3_000,
            TeamSide::Home,
        );
        assert_eq!(hit.map(|(idx, _, _)| idx), Some(17));
    }
}
