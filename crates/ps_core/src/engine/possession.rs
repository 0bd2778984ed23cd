//! Possession: loose-ball pickup, the ownership lock, and steal contests.
//!
//! At most one owner at any time. Ownership changes re-arm a short lock
//! during which no contest fires, so possession cannot ping-pong within a
//! single exchange. Contest rolls are keyed on (seed, tick, thief) and are
//! therefore independent of player iteration order.

use tracing::debug;

use super::events::{EventMeta, EventOutcome, EventType};
use super::rng;
use super::{pitch, MatchEngine};
use crate::models::TeamSide;

impl MatchEngine {
    /// Give the ball to `idx`, re-arming the possession lock.
    pub(crate) fn give_possession(&mut self, idx: usize) {
        self.ball.owner = Some(idx);
        self.ball.last_touch = Some(TeamSide::of_index(idx));
        self.ball.pos = self.players[idx].pos;
        self.ball.vel = Default::default();
        self.flight = None;
        self.lock_until_ms = self.now_ms + self.cfg.possession.lock_ms;
        self.owned_since_ms = self.now_ms;
    }

    /// Loose-ball pickup: the nearest player within reach takes the ball.
    pub(crate) fn try_pickup(&mut self) {
        if self.ball.owner.is_some() || self.flight.is_some() {
            return;
        }
        if let Some(idx) = self.nearest_player(self.ball.pos, None) {
            if self.players[idx].pos.distance_to(self.ball.pos)
                <= self.cfg.physics.pickup_radius_m
            {
                debug!(player = self.player_name(idx), "loose ball picked up");
                self.give_possession(idx);
            }
        }
    }

    /// Steal contest against the current owner. At most one challenger per
    /// tick: the nearest opponent inside the contest radius.
    pub(crate) fn try_steal(&mut self) {
        let owner = match self.ball.owner {
            Some(owner) => owner,
            None => return,
        };
        if self.now_ms < self.lock_until_ms || self.grace_active() {
            return;
        }

        let cfg = &self.cfg.possession;
        let owner_side = TeamSide::of_index(owner);
        let owner_pos = self.players[owner].pos;
        let thief = match self.nearest_of_side(owner_side.opposite(), owner_pos, false) {
            Some(idx) => idx,
            None => return,
        };
        if self.players[thief].pos.distance_to(owner_pos) > cfg.contest_radius_m {
            return;
        }

        let hold_s = (self.now_ms - self.owned_since_ms) as f32 / 1_000.0;
        let hold_bonus = (hold_s * cfg.hold_bonus_per_s).min(cfg.hold_bonus_cap);

        // Standing in the owner's attacking path makes the tackle easier.
        let attack_x = self.attack_dir(owner_side);
        let to_thief = owner_pos.direction_to(self.players[thief].pos);
        let facing = (to_thief.x * attack_x).max(0.0);

        let ratio_diff = self.players[thief].stamina_ratio() - self.players[owner].stamina_ratio();
        let p = (cfg.steal_base
            + cfg.steal_stamina_coeff * ratio_diff
            + hold_bonus
            + cfg.facing_bonus * facing)
            .clamp(0.02, 0.9);

        if rng::roll_f32(self.rng.seed, self.now_ms, thief, rng::subcase::STEAL) < p {
            let thief_name = self.player_name(thief).to_string();
            let owner_name = self.player_name(owner).to_string();
            let role = self.players[thief].role;
            self.emit(
                EventType::Tackle,
                Some(owner_side.opposite()),
                format!("{thief_name} wins the ball off {owner_name}"),
                EventMeta::default()
                    .player(thief, role)
                    .at(owner_pos)
                    .outcome(EventOutcome::Complete),
            );
            self.stagnant_passes = 0;
            self.give_possession(thief);
        } else if rng::roll_bool(
            self.rng.seed,
            self.now_ms,
            thief,
            rng::subcase::FOUL,
            cfg.foul_chance_on_fail,
        ) {
            self.whistle_foul(thief, owner);
        }
    }

    /// A failed contest went in hard: foul against the owner, possible
    /// booking, and a free kick or penalty depending on where it happened.
    fn whistle_foul(&mut self, offender: usize, victim: usize) {
        let offender_side = TeamSide::of_index(offender);
        let victim_side = offender_side.opposite();
        let spot = self.players[victim].pos;

        let offender_name = self.player_name(offender).to_string();
        let victim_name = self.player_name(victim).to_string();
        let role = self.players[offender].role;
        self.emit(
            EventType::Foul,
            Some(offender_side),
            format!("{offender_name} brings down {victim_name}"),
            EventMeta::default()
                .player(offender, role)
                .at(spot)
                .outcome(EventOutcome::Restart),
        );

        if rng::roll_bool(
            self.rng.seed,
            self.now_ms,
            offender,
            rng::subcase::CARD,
            self.cfg.possession.yellow_chance_on_foul,
        ) {
            self.emit(
                EventType::YellowCard,
                Some(offender_side),
                format!("{offender_name} goes into the book"),
                EventMeta::default()
                    .player(offender, role)
                    .at(spot)
                    .outcome(EventOutcome::Complete),
            );
        }

        // Fouls inside the offender's own penalty area concede a penalty.
        let right_goal = !self.attacks_right(offender_side);
        if pitch::in_penalty_area(spot, right_goal) {
            self.restart_penalty(victim_side);
        } else {
            self.restart_free_kick(victim_side, spot);
        }
    }
}
