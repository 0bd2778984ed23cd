//! Stamina drain and recovery.
//!
//! Drain applies to everyone every physics tick; activity near the ball
//! costs extra and blocks recovery. Depleted players keep moving at the
//! configured floor speed rather than stopping.

use super::MatchEngine;

impl MatchEngine {
    pub(crate) fn stamina_tick(&mut self, dt_s: f32) {
        let cfg = &self.cfg.stamina;
        let ball_pos = self.ball.pos;
        let owner = self.ball.owner;

        for (idx, player) in self.players.iter_mut().enumerate() {
            let near_ball = player.pos.distance_to(ball_pos) <= cfg.near_ball_radius_m;
            let active = near_ball || Some(idx) == owner;

            let mult = cfg.role_multiplier(player.role);
            let mut delta = -cfg.base_decay_per_s * mult * dt_s;
            if active {
                delta -= cfg.chase_decay_per_s * mult * dt_s;
            } else {
                delta += cfg.regen_per_s * dt_s;
            }
            player.stamina = (player.stamina + delta).clamp(0.0, player.abilities.max_stamina);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::geometry::Vec2;
    use crate::engine::test_support::test_engine;

    #[test]
    fn test_drain_near_ball_recovery_far() {
        let mut engine = test_engine(7);
        engine.place_loose_ball(Vec2::new(52.5, 34.0));
        engine.place_player(1, Vec2::new(52.0, 34.0)); // defender at the ball

        let before = engine.player_staminas()[1].0;
        engine.stamina_tick(10.0);
        let drained = engine.player_staminas()[1].0;
        assert!(drained < before, "active player must drain");

        // Step away from the ball: the drained player recovers.
        engine.place_player(1, Vec2::new(5.0, 5.0));
        engine.stamina_tick(1.0);
        assert!(engine.player_staminas()[1].0 > drained, "idle player must recover");
    }

    #[test]
    fn test_stamina_stays_in_bounds() {
        let mut engine = test_engine(7);
        for _ in 0..5_000 {
            engine.stamina_tick(1.0);
        }
        for (stamina, max) in engine.player_staminas() {
            assert!(stamina >= 0.0 && stamina <= max);
        }
    }
}
