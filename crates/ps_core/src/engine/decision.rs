//! Coarse on-ball decision tick.
//!
//! Runs on its own cadence, independent of the physics frame rate. The
//! owner weighs a shot first, then picks a pass lane (forward, lateral or
//! backward) under pressure, anti-stagnation and opening-phase biases. A
//! loose ball resolves pickups here; an owned ball resolves steal contests
//! before the owner acts.

use tracing::debug;

use super::ball::{BallFlight, FlightKind};
use super::events::{subtype, EventMeta, EventOutcome, EventType};
use super::geometry::Vec2;
use super::{pitch, MatchEngine};
use crate::models::TeamSide;

/// Pass lane relative to the attack direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassLane {
    Forward,
    Lateral,
    Backward,
}

impl MatchEngine {
    pub(crate) fn decision_tick(&mut self) {
        if self.flight.is_some() {
            return;
        }
        match self.ball.owner {
            None => self.try_pickup(),
            Some(owner) => {
                self.try_steal();
                // The contest may have moved the ball or triggered a restart.
                if self.ball.owner == Some(owner) && self.flight.is_none() {
                    self.owner_decide(owner);
                }
            }
        }
    }

    fn owner_decide(&mut self, owner: usize) {
        if self.penalty_pending {
            self.penalty_pending = false;
            self.take_shot(owner, true);
            return;
        }
        if self.try_shot(owner) {
            return;
        }
        self.try_pass(owner);
    }

    // ===========================================
    // Shooting
    // ===========================================

    /// Probabilistic shot attempt; returns whether a shot was taken.
    fn try_shot(&mut self, owner: usize) -> bool {
        let cfg = &self.cfg.decision;
        let side = TeamSide::of_index(owner);
        let pos = self.players[owner].pos;
        let goal = pitch::attacked_goal_center(self.attacks_right(side));

        let dist = pos.distance_to(goal);
        if dist > cfg.max_shot_distance_m {
            return false;
        }

        let centrality = 1.0 - ((pos.y - pitch::CENTER_Y).abs() / (pitch::WIDTH_M / 2.0)).min(1.0);
        let quality =
            cfg.shot_quality_base + cfg.shot_quality_accuracy_coeff * self.players[owner].abilities.accuracy;
        let freshness =
            cfg.shot_freshness_base + cfg.shot_freshness_stamina_coeff * self.players[owner].stamina_ratio();
        let p = cfg.shot_base
            * (1.0 - dist / cfg.max_shot_distance_m)
            * (cfg.shot_centrality_floor + cfg.shot_centrality_coeff * centrality)
            * cfg.shot_eagerness(self.players[owner].role)
            * quality
            * freshness;

        if self.rng.chance(p.clamp(0.0, 0.95)) {
            self.take_shot(owner, false);
            true
        } else {
            false
        }
    }

    fn take_shot(&mut self, owner: usize, penalty: bool) {
        let side = TeamSide::of_index(owner);
        let attacks_right = self.attacks_right(side);
        let goal = pitch::attacked_goal_center(attacks_right);
        let start = self.players[owner].pos;
        let abilities = self.players[owner].abilities;

        // Aim error shrinks with accuracy; penalties are taken composed.
        let mut spread = (1.0 - abilities.accuracy) * self.cfg.decision.shot_spread_m;
        if penalty {
            spread *= 0.5;
        }
        let aim_y = pitch::CENTER_Y + self.rng.gen_range_f32(-spread, spread);
        let end = Vec2::new(goal.x, aim_y.clamp(0.0, pitch::WIDTH_M));

        let dist = start.distance_to(end);
        let physics = &self.cfg.physics;
        let speed = physics.shot_speed_mps
            * (physics.kick_power_base + physics.kick_power_coeff * abilities.shot_power);
        let duration_ms = ((dist / speed.max(1.0)) * 1_000.0) as u64;

        let cfg = &self.cfg.decision;
        let xg = if penalty {
            cfg.penalty_xg
        } else {
            let centrality =
                1.0 - ((start.y - pitch::CENTER_Y).abs() / (pitch::WIDTH_M / 2.0)).min(1.0);
            (cfg.xg_base
                + cfg.xg_distance_coeff
                    * (1.0 - dist / cfg.max_shot_distance_m)
                    * (cfg.shot_centrality_floor + cfg.shot_centrality_coeff * centrality))
                .clamp(0.02, 0.85)
        };

        let name = self.player_name(owner).to_string();
        let role = self.players[owner].role;
        let tag = if penalty { subtype::PENALTY_SHOT } else { subtype::SHOT_ATTEMPT };
        debug!(player = %name, dist, xg, penalty, "shot taken");
        self.emit(
            EventType::Shot,
            Some(side),
            if penalty {
                format!("{name} strikes the penalty")
            } else {
                format!("{name} lets fly from {dist:.0} meters")
            },
            EventMeta::default()
                .player(owner, role)
                .path(start, end)
                .subtype(tag)
                .xg(xg)
                .outcome(EventOutcome::Attempt),
        );

        self.ball.owner = None;
        self.ball.last_touch = Some(side);
        self.stagnant_passes = 0;
        self.flight = Some(BallFlight {
            kind: FlightKind::Shot,
            kicker: owner,
            receiver: None,
            interceptor: None,
            start,
            end,
            start_ms: self.now_ms,
            duration_ms: duration_ms.max(1),
            xg: Some(xg),
        });
    }

    // ===========================================
    // Passing
    // ===========================================

    fn try_pass(&mut self, owner: usize) {
        let side = TeamSide::of_index(owner);
        let attack_x = self.attack_dir(side);
        let owner_pos = self.players[owner].pos;
        let cfg = &self.cfg.decision;

        // Partition teammates into lanes by attack-direction advance.
        let mut forward: Vec<usize> = Vec::new();
        let mut lateral: Vec<usize> = Vec::new();
        let mut backward: Vec<usize> = Vec::new();
        for idx in side.range() {
            if idx == owner {
                continue;
            }
            let advance = (self.players[idx].pos.x - owner_pos.x) * attack_x;
            if advance >= cfg.forward_dx_m {
                forward.push(idx);
            } else if advance <= -cfg.forward_dx_m {
                backward.push(idx);
            } else {
                lateral.push(idx);
            }
        }

        let mut fw = cfg.forward_weight;
        let mut lat = cfg.lateral_weight;
        let mut bw = cfg.backward_weight;

        // Under pressure the safe ball looks better.
        let pressed = self
            .nearest_of_side(side.opposite(), owner_pos, false)
            .map(|idx| self.players[idx].pos.distance_to(owner_pos) <= cfg.pressure_radius_m)
            .unwrap_or(false);
        if pressed {
            fw *= cfg.pressed_forward_damp;
            lat *= cfg.pressed_safe_boost;
            bw *= cfg.pressed_safe_boost;
        }
        // Too many sideways balls force the issue.
        if self.stagnant_passes >= cfg.stagnation_threshold {
            fw *= cfg.stagnation_forward_boost;
            bw *= cfg.stagnation_backward_damp;
        }
        // Nobody plays backward straight from kickoff.
        if self.now_ms < cfg.opening_ms {
            bw *= cfg.opening_backward_damp;
        }

        if forward.is_empty() {
            fw = 0.0;
        }
        if lateral.is_empty() {
            lat = 0.0;
        }
        if backward.is_empty() {
            bw = 0.0;
        }
        let total = fw + lat + bw;
        if total <= 0.0 {
            return; // keep dribbling
        }

        let roll = self.rng.gen_range_f32(0.0, total);
        let (lane, pool) = if roll < fw {
            (PassLane::Forward, &forward)
        } else if roll < fw + lat {
            (PassLane::Lateral, &lateral)
        } else {
            (PassLane::Backward, &backward)
        };

        // Forward balls look for the most advanced runner; square and back
        // balls take the nearest safe option.
        let target = match lane {
            PassLane::Forward => pool
                .iter()
                .copied()
                .max_by(|&a, &b| {
                    let aa = (self.players[a].pos.x - owner_pos.x) * attack_x;
                    let ab = (self.players[b].pos.x - owner_pos.x) * attack_x;
                    aa.partial_cmp(&ab).expect("finite coordinates")
                }),
            PassLane::Lateral | PassLane::Backward => pool
                .iter()
                .copied()
                .min_by(|&a, &b| {
                    let da = self.players[a].pos.distance_to(owner_pos);
                    let db = self.players[b].pos.distance_to(owner_pos);
                    da.partial_cmp(&db).expect("finite coordinates")
                }),
        };
        let target = match target {
            Some(idx) => idx,
            None => return,
        };

        self.commit_pass(owner, target, lane);
    }

    fn commit_pass(&mut self, owner: usize, target: usize, lane: PassLane) {
        let side = TeamSide::of_index(owner);
        let attack_x = self.attack_dir(side);
        let start = self.players[owner].pos;

        // Lead the receiver into space along the attack direction.
        let lead = self.cfg.decision.lead_m;
        let end = pitch::clamp(self.players[target].pos.plus(Vec2::new(attack_x * lead, 0.0)));

        // Restart grace suspends both the offside trap and interceptors.
        let grace = self.grace_active();

        if !grace && self.check_offside(owner, target) {
            let name = self.player_name(target).to_string();
            let role = self.players[target].role;
            let spot = self.players[target].pos;
            self.emit(
                EventType::Offside,
                Some(side),
                format!("{name} strayed offside, flag up"),
                EventMeta::default()
                    .player(target, role)
                    .at(spot)
                    .outcome(EventOutcome::Restart),
            );
            self.restart_free_kick(side.opposite(), spot);
            return;
        }

        let dist = start.distance_to(end);
        let pass_power = self.players[owner].abilities.pass_power;
        let physics = &self.cfg.physics;
        let speed = physics.pass_speed_mps
            * (physics.kick_power_base + physics.kick_power_coeff * pass_power);
        let duration_ms = (((dist / speed.max(1.0)) * 1_000.0) as u64).max(1);

        let interceptor = if grace {
            None
        } else {
            self.find_interceptor(start, end, duration_ms, side)
        };

        // Long balls get tagged by reach, the rest by lane.
        let tag = if dist > self.cfg.decision.long_pass_threshold_m {
            subtype::LONG_PASS
        } else {
            match lane {
                PassLane::Forward => subtype::FORWARD_PASS,
                PassLane::Lateral => subtype::LATERAL_PASS,
                PassLane::Backward => subtype::BACKWARD_PASS,
            }
        };
        let outcome = if interceptor.is_some() {
            EventOutcome::Intercepted
        } else {
            EventOutcome::Complete
        };

        let passer = self.player_name(owner).to_string();
        let receiver = self.player_name(target).to_string();
        let role = self.players[owner].role;
        let verb = match lane {
            PassLane::Forward => "plays it forward to",
            PassLane::Lateral => "squares it to",
            PassLane::Backward => "drops it back to",
        };
        debug!(%passer, %receiver, dist, ?lane, intercepted = interceptor.is_some(), "pass");
        self.emit(
            EventType::Pass,
            Some(side),
            format!("{passer} {verb} {receiver}"),
            EventMeta::default()
                .player(owner, role)
                .path(start, end)
                .subtype(tag)
                .outcome(outcome),
        );

        self.ball.owner = None;
        self.ball.last_touch = Some(side);
        self.flight = Some(BallFlight {
            kind: FlightKind::Pass,
            kicker: owner,
            receiver: Some(target),
            interceptor,
            start,
            end,
            start_ms: self.now_ms,
            duration_ms,
            xg: None,
        });
    }
}
