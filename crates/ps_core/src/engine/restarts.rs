//! Dead-ball restarts: kickoff, throw-ins, goal kicks, corners, free kicks
//! and penalties.
//!
//! Every restart places a taker, hands them the ball and opens a grace
//! window during which steal contests and offside checks are suppressed so
//! play can actually resume.

use tracing::debug;

use super::events::{EventMeta, EventOutcome, EventType};
use super::formation::formation_anchors;
use super::geometry::Vec2;
use super::{pitch, Ball, MatchEngine, MatchPhase};
use crate::models::{PlayerRole, TeamSide};

impl MatchEngine {
    pub(crate) fn open_restart_grace(&mut self) {
        self.grace_until_ms = self.now_ms + self.cfg.clock.restart_grace_ms;
    }

    /// Move everyone to their formation anchors for the current half.
    pub(crate) fn reset_formations(&mut self) {
        for side in [TeamSide::Home, TeamSide::Away] {
            let roles: Vec<PlayerRole> =
                side.range().map(|idx| self.players[idx].role).collect();
            let anchors = formation_anchors(&roles, self.attacks_right(side));
            for (slot, idx) in side.range().enumerate() {
                let player = &mut self.players[idx];
                player.pos = anchors[slot];
                player.home = anchors[slot];
                player.lane_target = None;
                player.next_lane_recalc_ms = self.now_ms;
            }
        }
    }

    /// Center the ball and freeze play briefly before the kicking side's
    /// taker puts it back in motion.
    pub(crate) fn begin_kickoff(&mut self) {
        let side = self.kickoff_side;
        debug!(team = self.team_name(side), half = self.clock.half, "kickoff");

        self.reset_formations();
        self.flight = None;
        self.ball = Ball::default();
        self.stagnant_passes = 0;
        self.penalty_pending = false;

        // Most central midfielder takes it; any outfielder will do.
        let taker = self
            .most_central(side, PlayerRole::Midfielder)
            .or_else(|| self.most_central(side, PlayerRole::Forward))
            .or_else(|| self.nearest_of_side(side, pitch::CENTER, true))
            .unwrap_or_else(|| side.range().start);
        self.players[taker].pos = Vec2::new(pitch::CENTER_X, pitch::CENTER_Y);
        self.give_possession(taker);

        self.phase = MatchPhase::Kickoff;
        self.phase_wait_until_ms = self.now_ms + self.cfg.clock.kickoff_freeze_ms;
        self.open_restart_grace();

        let name = self.player_name(taker).to_string();
        let role = self.players[taker].role;
        self.emit(
            EventType::Kickoff,
            Some(side),
            format!("{} get us underway through {name}", self.team_name(side)),
            EventMeta::default()
                .player(taker, role)
                .at(pitch::CENTER)
                .outcome(EventOutcome::Restart),
        );
    }

    fn most_central(&self, side: TeamSide, role: PlayerRole) -> Option<usize> {
        side.range()
            .filter(|&idx| self.players[idx].role == role)
            .min_by(|&a, &b| {
                let da = self.players[a].pos.distance_to(pitch::CENTER);
                let db = self.players[b].pos.distance_to(pitch::CENTER);
                da.partial_cmp(&db).expect("finite coordinates")
            })
    }

    pub(crate) fn restart_throw_in(&mut self, exit_x: f32, top: bool, to_side: TeamSide) {
        let x = exit_x.clamp(pitch::GOAL_LINE_INSET_M, pitch::LENGTH_M - pitch::GOAL_LINE_INSET_M);
        let y = if top {
            pitch::TOUCHLINE_INSET_M
        } else {
            pitch::WIDTH_M - pitch::TOUCHLINE_INSET_M
        };
        let spot = Vec2::new(x, y);

        let taker = self
            .nearest_of_side(to_side, spot, true)
            .unwrap_or_else(|| to_side.range().start);
        self.players[taker].pos = spot;
        self.give_possession(taker);
        self.open_restart_grace();
        self.stagnant_passes = 0;

        let name = self.player_name(taker).to_string();
        let role = self.players[taker].role;
        self.emit(
            EventType::ThrowIn,
            Some(to_side),
            format!("Throw-in for {}, taken by {name}", self.team_name(to_side)),
            EventMeta::default()
                .player(taker, role)
                .at(spot)
                .outcome(EventOutcome::Restart),
        );
    }

    pub(crate) fn restart_goal_kick(&mut self, side: TeamSide) {
        // The defending keeper restarts from in front of their own goal.
        let own_goal_x = if self.attacks_right(side) {
            pitch::GOAL_LINE_INSET_M
        } else {
            pitch::LENGTH_M - pitch::GOAL_LINE_INSET_M
        };
        let spot = Vec2::new(own_goal_x, pitch::CENTER_Y);

        let keeper = self.gk_index(side);
        self.players[keeper].pos = spot;
        self.give_possession(keeper);
        self.open_restart_grace();
        self.stagnant_passes = 0;

        let name = self.player_name(keeper).to_string();
        self.emit(
            EventType::GoalKick,
            Some(side),
            format!("Goal kick: {name} restarts for {}", self.team_name(side)),
            EventMeta::default()
                .player(keeper, PlayerRole::Goalkeeper)
                .at(spot)
                .outcome(EventOutcome::Restart),
        );
    }

    /// Corner for `attacking` at the goal they attack; `top` picks the
    /// near-side quadrant by the exit point.
    pub(crate) fn restart_corner(&mut self, attacking: TeamSide, right_goal: bool, top: bool) {
        let x = if right_goal { pitch::LENGTH_M - 0.5 } else { 0.5 };
        let y = if top { 0.5 } else { pitch::WIDTH_M - 0.5 };
        let spot = Vec2::new(x, y);

        let taker = self
            .nearest_of_side(attacking, spot, true)
            .unwrap_or_else(|| attacking.range().start);
        self.players[taker].pos = spot;
        self.give_possession(taker);
        self.open_restart_grace();
        self.stagnant_passes = 0;

        let name = self.player_name(taker).to_string();
        let role = self.players[taker].role;
        self.emit(
            EventType::Corner,
            Some(attacking),
            format!("Corner to {}, {name} over it", self.team_name(attacking)),
            EventMeta::default()
                .player(taker, role)
                .at(spot)
                .outcome(EventOutcome::Restart),
        );
    }

    /// Free kick from the foul spot. The preceding foul event already
    /// carries the narrative, so no separate event is emitted here.
    pub(crate) fn restart_free_kick(&mut self, side: TeamSide, spot: Vec2) {
        let spot = pitch::clamp(spot);
        let taker = self
            .nearest_of_side(side, spot, true)
            .unwrap_or_else(|| side.range().start);
        self.players[taker].pos = spot;
        self.give_possession(taker);
        self.open_restart_grace();
        self.stagnant_passes = 0;
    }

    /// Penalty to `side`: their strongest shooter steps up, and the next
    /// decision tick is forced into the shot branch.
    pub(crate) fn restart_penalty(&mut self, side: TeamSide) {
        let spot = pitch::penalty_spot(self.attacks_right(side));

        let taker = side
            .range()
            .filter(|&idx| !self.players[idx].role.is_goalkeeper())
            .max_by(|&a, &b| {
                let sa = self.players[a].abilities.shot_power;
                let sb = self.players[b].abilities.shot_power;
                sa.partial_cmp(&sb).expect("finite abilities")
            })
            .unwrap_or_else(|| side.range().start);
        self.players[taker].pos = spot;
        self.give_possession(taker);
        self.open_restart_grace();
        self.penalty_pending = true;
        self.stagnant_passes = 0;

        let name = self.player_name(taker).to_string();
        let role = self.players[taker].role;
        self.emit(
            EventType::Penalty,
            Some(side),
            format!("Penalty to {}! {name} places the ball", self.team_name(side)),
            EventMeta::default()
                .player(taker, role)
                .at(spot)
                .outcome(EventOutcome::Restart),
        );
    }
}
