//! Match simulation engine.
//!
//! Execution is single-threaded and cooperative. The host drives
//! [`MatchEngine::step_frame`] once per rendering frame; within a frame the
//! engine applies physics integration first, then any due coarse decision
//! ticks, then any due 1 Hz countdown ticks, and finally publishes a fresh
//! state snapshot to subscribers. Every tick is an independent, idempotent
//! recomputation from current state; there is no retry concept.

pub mod ball;
pub mod clock;
pub mod config;
pub mod decision;
pub mod events;
pub mod formation;
pub mod geometry;
pub mod interception;
pub mod match_state;
pub mod offside;
pub mod pitch;
pub mod possession;
pub mod restarts;
pub mod rng;
pub mod stamina;

use tracing::debug;

use crate::error::{EngineError, Result};
use crate::models::{Abilities, PlayerRole, Team, TeamSide};

use ball::{classify_boundary, integrate_loose, Ball, BallFlight, BoundaryCrossing, FlightKind};
use clock::{ClockSignal, MatchClock, MatchPhase};
use config::EngineConfig;
use events::{EventMeta, EventOutcome, EventType, MatchEvent, MomentumTracker, PitchZone};
use geometry::Vec2;
use match_state::{MatchState, MatchStats, Score};
use rng::MatchRng;

/// Fixed frame step used by [`MatchEngine::simulate`].
pub const FRAME_DT_MS: u64 = 50;

pub type EventListener = Box<dyn FnMut(&MatchEvent)>;
pub type StateListener = Box<dyn FnMut(&MatchState)>;

/// Engine-side player record. Roster identity is copied in at match start;
/// position and stamina are owned and mutated by the engine from then on.
#[derive(Debug, Clone)]
pub(crate) struct SimPlayer {
    pub id: u32,
    pub name: String,
    pub role: PlayerRole,
    pub abilities: Abilities,
    pub pos: Vec2,
    /// Formation anchor used for off-ball return drift.
    pub home: Vec2,
    pub stamina: f32,
    /// Off-ball drift target, recomputed on a fixed cadence.
    pub lane_target: Option<Vec2>,
    pub next_lane_recalc_ms: u64,
}

impl SimPlayer {
    pub fn stamina_ratio(&self) -> f32 {
        if self.abilities.max_stamina <= 0.0 {
            return 0.0;
        }
        (self.stamina / self.abilities.max_stamina).clamp(0.0, 1.0)
    }

    /// Stamina-modulated movement speed in m/s.
    pub fn effective_speed(&self, base_mps: f32, min_factor: f32) -> f32 {
        let fatigue = min_factor + (1.0 - min_factor) * self.stamina_ratio();
        base_mps * self.abilities.speed_factor * fatigue
    }
}

#[derive(Debug, Clone)]
pub struct MatchPlan {
    pub home_team: Team,
    pub away_team: Team,
    pub duration_s: u32,
    pub seed: u64,
    pub config: EngineConfig,
}

pub struct MatchEngine {
    pub(crate) cfg: EngineConfig,
    home_name: String,
    away_name: String,
    pub(crate) players: Vec<SimPlayer>,
    pub(crate) ball: Ball,
    pub(crate) flight: Option<BallFlight>,
    pub(crate) rng: MatchRng,
    pub(crate) clock: MatchClock,
    pub(crate) phase: MatchPhase,
    pub(crate) now_ms: u64,
    decision_acc_ms: u64,
    clock_acc_ms: u64,
    /// Deadline for the current pregame pause or kickoff freeze.
    phase_wait_until_ms: u64,
    pub(crate) lock_until_ms: u64,
    pub(crate) owned_since_ms: u64,
    pub(crate) grace_until_ms: u64,
    first_kickoff: TeamSide,
    pub(crate) kickoff_side: TeamSide,
    pub(crate) score: Score,
    momentum: MomentumTracker,
    /// Consecutive completed passes that failed to advance the ball.
    pub(crate) stagnant_passes: u32,
    /// Set by a penalty award; forces the next owner decision to shoot.
    pub(crate) penalty_pending: bool,
    pub(crate) is_running: bool,
    stats: MatchStats,
    events: Vec<MatchEvent>,
    event_listeners: Vec<EventListener>,
    state_listeners: Vec<StateListener>,
}

impl MatchEngine {
    pub fn new(plan: MatchPlan) -> Result<Self> {
        plan.home_team.validate()?;
        plan.away_team.validate()?;
        if plan.duration_s == 0 {
            return Err(EngineError::InvalidDuration { seconds: 0 });
        }

        let players: Vec<SimPlayer> = plan
            .home_team
            .players
            .iter()
            .chain(plan.away_team.players.iter())
            .map(|p| SimPlayer {
                id: p.id,
                name: p.name.clone(),
                role: p.role,
                abilities: p.abilities,
                pos: p.position,
                home: p.position,
                stamina: p.abilities.stamina.clamp(0.0, p.abilities.max_stamina),
                lane_target: None,
                next_lane_recalc_ms: 0,
            })
            .collect();

        let mut rng = MatchRng::new(plan.seed);
        let kickoff_side = if rng.chance(0.5) {
            TeamSide::Home
        } else {
            TeamSide::Away
        };

        let mut engine = Self {
            cfg: plan.config,
            home_name: plan.home_team.name.clone(),
            away_name: plan.away_team.name.clone(),
            players,
            ball: Ball::default(),
            flight: None,
            rng,
            clock: MatchClock::new(plan.duration_s),
            phase: MatchPhase::Pregame,
            now_ms: 0,
            decision_acc_ms: 0,
            clock_acc_ms: 0,
            phase_wait_until_ms: 0,
            lock_until_ms: 0,
            owned_since_ms: 0,
            grace_until_ms: 0,
            first_kickoff: kickoff_side,
            kickoff_side,
            score: Score::default(),
            momentum: MomentumTracker::default(),
            stagnant_passes: 0,
            penalty_pending: false,
            is_running: true,
            stats: MatchStats::default(),
            events: Vec::new(),
            event_listeners: Vec::new(),
            state_listeners: Vec::new(),
        };

        engine.reset_formations();
        let winner = engine.team_name(kickoff_side).to_string();
        engine.emit(
            EventType::CoinToss,
            Some(kickoff_side),
            format!("{winner} win the coin toss and will kick off"),
            EventMeta::default().outcome(EventOutcome::Complete),
        );
        Ok(engine)
    }

    /// `startGame`: build an engine from two rosters with default tuning.
    pub fn start(home: Team, away: Team, duration_s: u32, seed: u64) -> Result<Self> {
        Self::new(MatchPlan {
            home_team: home,
            away_team: away,
            duration_s,
            seed,
            config: EngineConfig::default(),
        })
    }

    /// `stopGame`: halts all drivers. Idempotent.
    pub fn stop_game(&mut self) {
        if self.is_running {
            debug!(now_ms = self.now_ms, "match stopped");
        }
        self.is_running = false;
    }

    // ===========================================
    // Accessors
    // ===========================================

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.clock.time_remaining
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn team_name(&self, side: TeamSide) -> &str {
        match side {
            TeamSide::Home => &self.home_name,
            TeamSide::Away => &self.away_name,
        }
    }

    pub(crate) fn player_name(&self, idx: usize) -> &str {
        &self.players[idx].name
    }

    pub fn player_positions(&self) -> Vec<Vec2> {
        self.players.iter().map(|p| p.pos).collect()
    }

    pub fn player_staminas(&self) -> Vec<(f32, f32)> {
        self.players
            .iter()
            .map(|p| (p.stamina, p.abilities.max_stamina))
            .collect()
    }

    /// Whether `side` is attacking the +x goal in the current half.
    pub fn attacks_right(&self, side: TeamSide) -> bool {
        side.is_home() == (self.clock.half == 1)
    }

    /// Attack direction along x: +1.0 toward the right goal, -1.0 left.
    pub(crate) fn attack_dir(&self, side: TeamSide) -> f32 {
        if self.attacks_right(side) {
            1.0
        } else {
            -1.0
        }
    }

    pub(crate) fn grace_active(&self) -> bool {
        self.now_ms < self.grace_until_ms
    }

    // ===========================================
    // Subscriptions & snapshot publication
    // ===========================================

    pub fn on_event(&mut self, listener: EventListener) {
        self.event_listeners.push(listener);
    }

    pub fn on_state(&mut self, listener: StateListener) {
        self.state_listeners.push(listener);
    }

    /// Latest-value-wins snapshot of the whole match state.
    pub fn snapshot(&self) -> MatchState {
        MatchState {
            is_running: self.is_running,
            time_remaining: self.clock.time_remaining,
            score: self.score,
            ball_position: self.ball.pos,
            ball_velocity: self.ball.vel,
            current_ball_owner: self.ball.owner.map(|i| i as u8),
            phase: self.phase,
            kickoff_team_name: self.team_name(self.kickoff_side).to_string(),
            stats: self.stats,
            events: self.events.clone(),
        }
    }

    fn publish_state(&mut self) {
        if self.state_listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for listener in &mut self.state_listeners {
            listener(&snapshot);
        }
    }

    // ===========================================
    // Frame driver
    // ===========================================

    /// Advance the simulation by one frame. Physics runs before any due
    /// decision tick, decisions before the countdown.
    pub fn step_frame(&mut self, dt_ms: u64) {
        if !self.is_running || self.phase == MatchPhase::Finished {
            return;
        }
        self.now_ms += dt_ms;

        match self.phase {
            MatchPhase::Pregame => {
                if self.now_ms >= self.phase_wait_until_ms {
                    self.begin_kickoff();
                }
            }
            MatchPhase::Kickoff => {
                // Placement freeze: ball centered, nobody moves.
                if self.now_ms >= self.phase_wait_until_ms {
                    debug!(half = self.clock.half, "ball in play");
                    self.phase = MatchPhase::InPlay;
                }
            }
            MatchPhase::InPlay => {
                self.physics_tick(dt_ms);

                self.decision_acc_ms += dt_ms;
                let interval = self.cfg.decision.interval_ms.max(1);
                while self.decision_acc_ms >= interval {
                    self.decision_acc_ms -= interval;
                    if self.phase == MatchPhase::InPlay {
                        self.decision_tick();
                    }
                }

                self.clock_acc_ms += dt_ms;
                while self.clock_acc_ms >= 1_000 {
                    self.clock_acc_ms -= 1_000;
                    if self.phase != MatchPhase::InPlay {
                        break;
                    }
                    self.clock_second();
                }
            }
            MatchPhase::Finished => {}
        }

        self.publish_state();
    }

    /// Run the match to completion on a fixed frame step.
    pub fn simulate(&mut self) {
        // Generous cap: pauses and restarts stretch wall time past the
        // nominal countdown.
        let max_frames = (self.clock.duration_s as u64 * 1_000 / FRAME_DT_MS) * 4 + 10_000;
        for _ in 0..max_frames {
            if self.phase == MatchPhase::Finished || !self.is_running {
                break;
            }
            self.step_frame(FRAME_DT_MS);
        }
    }

    fn clock_second(&mut self) {
        match self.clock.tick_second() {
            ClockSignal::Running => {}
            ClockSignal::Halftime => {
                debug!(now_ms = self.now_ms, "halftime");
                self.emit(
                    EventType::HalfTime,
                    None,
                    "Halftime: the teams switch ends".to_string(),
                    EventMeta::default().outcome(EventOutcome::Restart),
                );
                self.flight = None;
                self.ball = Ball::default();
                self.kickoff_side = self.first_kickoff.opposite();
                self.reset_formations();
                self.phase = MatchPhase::Pregame;
                self.phase_wait_until_ms = self.now_ms + self.cfg.clock.halftime_pause_ms;
            }
            ClockSignal::FullTime => {
                debug!(
                    home = self.score.home,
                    away = self.score.away,
                    "full time"
                );
                self.emit(
                    EventType::FullTime,
                    None,
                    format!(
                        "Full time: {} {} - {} {}",
                        self.home_name, self.score.home, self.score.away, self.away_name
                    ),
                    EventMeta::default().outcome(EventOutcome::Complete),
                );
                self.phase = MatchPhase::Finished;
                self.is_running = false;
            }
        }
    }

    // ===========================================
    // Physics tick
    // ===========================================

    fn physics_tick(&mut self, dt_ms: u64) {
        let dt_s = dt_ms as f32 / 1_000.0;
        self.stamina_tick(dt_s);
        self.move_players(dt_s);

        if let Some(flight) = &self.flight {
            // Interception point reached before arrival?
            if let Some((idx, point, at_ms)) = flight.interceptor {
                if self.now_ms >= at_ms {
                    let flight = self.flight.take().expect("flight present");
                    self.ball.pos = pitch::clamp(point);
                    self.finish_interception(idx, &flight);
                    return;
                }
            }
            if flight.arrived(self.now_ms) {
                let flight = self.flight.take().expect("flight present");
                self.resolve_flight(flight);
            } else {
                self.ball.pos = self.flight.as_ref().expect("flight present").position_at(self.now_ms);
            }
            return;
        }

        if let Some(owner) = self.ball.owner {
            // Owned ball is derivative of the owner's position.
            self.ball.pos = self.players[owner].pos;
            self.ball.vel = Vec2::default();
            return;
        }

        let prev = integrate_loose(&mut self.ball, dt_s, &self.cfg.physics);
        if let Some(crossing) = classify_boundary(prev, self.ball.pos) {
            self.handle_boundary(crossing);
        } else {
            self.ball.pos = pitch::clamp(self.ball.pos);
        }
    }

    /// Off-ball movement: formation-return drift with lane jitter, one
    /// chaser on a loose ball, one presser on the owner, goalkeepers
    /// shadowing the ball along their line.
    fn move_players(&mut self, dt_s: f32) {
        let base_speed = self.cfg.physics.player_speed_mps;
        let drift = self.cfg.physics.offball_drift;
        let min_factor = self.cfg.stamina.min_speed_factor;
        let lane_recalc = self.cfg.decision.lane_recalc_ms;
        let ball_pos = self.ball.pos;
        let owner = self.ball.owner;

        let chaser = if owner.is_none() && self.flight.is_none() {
            self.nearest_player(ball_pos, None)
        } else {
            None
        };
        let presser = owner.and_then(|o| {
            let side = TeamSide::of_index(o).opposite();
            self.nearest_of_side(side, self.players[o].pos, true)
        });

        // Phase 1: decide targets without mutating anything.
        let mut moves: Vec<(Vec2, f32)> = Vec::with_capacity(self.players.len());
        for (idx, player) in self.players.iter().enumerate() {
            let side = TeamSide::of_index(idx);
            let dir = self.attack_dir(side);

            let (target, speed_frac) = if Some(idx) == owner {
                // Dribble: probe forward, bending gently toward the middle.
                let target = Vec2::new(
                    player.pos.x + dir * 6.0,
                    player.pos.y + 0.2 * (pitch::CENTER_Y - player.pos.y),
                );
                (target, 0.45)
            } else if Some(idx) == chaser {
                (ball_pos, 1.0)
            } else if Some(idx) == presser {
                (ball_pos, 0.9)
            } else if player.role.is_goalkeeper() {
                let line_x = if self.attacks_right(side) {
                    pitch::GOAL_LINE_INSET_M
                } else {
                    pitch::LENGTH_M - pitch::GOAL_LINE_INSET_M
                };
                let (lo, hi) = pitch::goal_mouth();
                let target = Vec2::new(line_x, ball_pos.y.clamp(lo - 2.0, hi + 2.0));
                (target, 0.8)
            } else {
                let target = player.lane_target.unwrap_or(player.home);
                (target, drift)
            };
            moves.push((pitch::clamp(target), speed_frac));
        }

        // Phase 2: apply movement and lane recalculation.
        let seed = self.rng.seed;
        let now = self.now_ms;
        for (idx, player) in self.players.iter_mut().enumerate() {
            let (target, speed_frac) = moves[idx];
            let speed = player.effective_speed(base_speed, min_factor) * speed_frac;
            let dist = player.pos.distance_to(target);
            if dist > 1e-3 {
                let step = (speed * dt_s).min(dist);
                let dir = player.pos.direction_to(target);
                player.pos = pitch::clamp(player.pos.plus(dir.scaled(step)));
            }

            if now >= player.next_lane_recalc_ms {
                let jitter_x =
                    rng::roll_range_f32(seed, player.next_lane_recalc_ms, idx, rng::subcase::LANE_DRIFT_X, -4.0, 4.0);
                let jitter_y =
                    rng::roll_range_f32(seed, player.next_lane_recalc_ms, idx, rng::subcase::LANE_DRIFT_Y, -5.0, 5.0);
                // Lanes lean toward the ball's end of the pitch.
                let pull_x = (ball_pos.x - player.home.x) * 0.25;
                player.lane_target = Some(pitch::clamp(Vec2::new(
                    player.home.x + pull_x + jitter_x,
                    player.home.y + jitter_y,
                )));
                player.next_lane_recalc_ms = now + lane_recalc;
            }
        }
    }

    // ===========================================
    // Flight resolution
    // ===========================================

    fn resolve_flight(&mut self, flight: BallFlight) {
        match flight.kind {
            FlightKind::Pass => {
                if let Some(receiver) = flight.receiver {
                    self.complete_pass(receiver, &flight);
                } else {
                    // No receiver recorded: ball runs loose at the target.
                    self.ball.pos = pitch::clamp(flight.end);
                    self.ball.vel = Vec2::default();
                }
            }
            FlightKind::Shot => self.resolve_shot(flight),
        }
    }

    fn complete_pass(&mut self, receiver: usize, flight: &BallFlight) {
        let side = TeamSide::of_index(receiver);
        let advance = (flight.end.x - flight.start.x) * self.attack_dir(side);
        if advance >= self.cfg.decision.forward_dx_m {
            self.stagnant_passes = 0;
        } else {
            self.stagnant_passes += 1;
        }
        self.give_possession(receiver);
    }

    pub(crate) fn finish_interception(&mut self, interceptor: usize, flight: &BallFlight) {
        let side = TeamSide::of_index(interceptor);
        let name = self.player_name(interceptor).to_string();
        let role = self.players[interceptor].role;
        let pos = self.players[interceptor].pos;
        let description = match flight.receiver {
            Some(target) => format!(
                "{name} steps in and cuts out the ball meant for {}",
                self.player_name(target)
            ),
            None => format!("{name} steps in and cuts out the pass"),
        };
        self.emit(
            EventType::Interception,
            Some(side),
            description,
            EventMeta::default()
                .player(interceptor, role)
                .at(pos)
                .outcome(EventOutcome::Complete),
        );
        self.stagnant_passes = 0;
        self.give_possession(interceptor);
    }

    fn resolve_shot(&mut self, flight: BallFlight) {
        let side = TeamSide::of_index(flight.kicker);
        let right_goal = self.attacks_right(side);
        let defending = side.opposite();

        self.ball.pos = pitch::clamp(flight.end);
        self.ball.vel = Vec2::default();

        if !pitch::in_goal_mouth(flight.end.y) {
            // Wide: last touch was the attacking side, so a goal kick.
            self.restart_goal_kick(defending);
            return;
        }

        let keeper = self.gk_index(defending);
        let xg = flight.xg.unwrap_or(0.1);
        let agility = self.players[keeper].abilities.agility;
        let keeper_ratio = self.players[keeper].stamina_ratio();
        let cfg = &self.cfg.decision;
        let save_p = (cfg.save_base + cfg.save_agility_coeff * agility * keeper_ratio
            - cfg.save_xg_coeff * xg)
            .clamp(0.05, 0.92);

        if rng::roll_f32(self.rng.seed, self.now_ms, keeper, rng::subcase::SAVE) < save_p {
            let keeper_name = self.player_name(keeper).to_string();
            let keeper_pos = self.players[keeper].pos;
            self.emit(
                EventType::Save,
                Some(defending),
                format!("{keeper_name} gets across and makes the save"),
                EventMeta::default()
                    .player(keeper, PlayerRole::Goalkeeper)
                    .at(keeper_pos)
                    .outcome(EventOutcome::Saved),
            );
            let parried = rng::roll_bool(
                self.rng.seed,
                self.now_ms,
                keeper,
                rng::subcase::PARRY_OUT,
                self.cfg.decision.parry_out_chance,
            );
            if parried {
                self.restart_corner(side, right_goal, flight.end.y < pitch::CENTER_Y);
            } else {
                self.give_possession(keeper);
            }
        } else {
            self.handle_goal(side, Some(flight.kicker), flight.xg);
        }
    }

    // ===========================================
    // Boundary handling & goals
    // ===========================================

    fn handle_boundary(&mut self, crossing: BoundaryCrossing) {
        match crossing {
            BoundaryCrossing::Touchline { exit_x, top } => {
                let to_side = self
                    .ball
                    .last_touch
                    .map(|s| s.opposite())
                    .unwrap_or(TeamSide::Home);
                self.restart_throw_in(exit_x, top, to_side);
            }
            BoundaryCrossing::GoalLine { right, y_at_cross } => {
                let attacking = if self.attacks_right(TeamSide::Home) == right {
                    TeamSide::Home
                } else {
                    TeamSide::Away
                };
                if pitch::in_goal_mouth(y_at_cross) {
                    self.handle_goal(attacking, None, None);
                } else {
                    match self.ball.last_touch {
                        // Attackers put it behind: goal kick for the defenders.
                        Some(side) if side == attacking => {
                            self.restart_goal_kick(attacking.opposite())
                        }
                        // Defenders put it behind: corner for the attackers.
                        Some(_) => {
                            self.restart_corner(attacking, right, y_at_cross < pitch::CENTER_Y)
                        }
                        None => self.restart_goal_kick(attacking.opposite()),
                    }
                }
            }
        }
    }

    pub(crate) fn handle_goal(&mut self, side: TeamSide, shooter: Option<usize>, xg: Option<f32>) {
        match side {
            TeamSide::Home => self.score.home = self.score.home.saturating_add(1),
            TeamSide::Away => self.score.away = self.score.away.saturating_add(1),
        }
        debug!(
            team = self.team_name(side),
            home = self.score.home,
            away = self.score.away,
            "goal"
        );

        let description = match shooter {
            Some(idx) => format!(
                "GOAL! {} scores for {}",
                self.player_name(idx),
                self.team_name(side)
            ),
            None => format!("GOAL for {}", self.team_name(side)),
        };
        let mut meta = EventMeta::default().at(self.ball.pos).outcome(EventOutcome::Goal);
        if let Some(idx) = shooter {
            meta = meta.player(idx, self.players[idx].role);
        }
        if let Some(xg) = xg {
            meta = meta.xg(xg);
        }
        self.emit(EventType::Goal, Some(side), description, meta);

        self.flight = None;
        self.ball = Ball::default();
        self.penalty_pending = false;
        self.kickoff_side = side.opposite();
        self.begin_kickoff();
    }

    // ===========================================
    // Lookups
    // ===========================================

    pub(crate) fn nearest_player(&self, pos: Vec2, exclude: Option<usize>) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, player) in self.players.iter().enumerate() {
            if Some(idx) == exclude {
                continue;
            }
            let dist = player.pos.distance_to(pos);
            if best.map(|(_, d)| dist < d).unwrap_or(true) {
                best = Some((idx, dist));
            }
        }
        best.map(|(idx, _)| idx)
    }

    pub(crate) fn nearest_of_side(
        &self,
        side: TeamSide,
        pos: Vec2,
        exclude_goalkeeper: bool,
    ) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for idx in side.range() {
            let player = &self.players[idx];
            if exclude_goalkeeper && player.role.is_goalkeeper() {
                continue;
            }
            let dist = player.pos.distance_to(pos);
            if best.map(|(_, d)| dist < d).unwrap_or(true) {
                best = Some((idx, dist));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Goalkeeper index for a side.
    pub fn gk_index(&self, side: TeamSide) -> usize {
        side.range()
            .find(|&idx| self.players[idx].role.is_goalkeeper())
            // Rosters are validated to carry a goalkeeper; fall back to the
            // deepest slot rather than panicking mid-match.
            .unwrap_or_else(|| side.range().start)
    }

    // ===========================================
    // Event emission
    // ===========================================

    pub(crate) fn emit(
        &mut self,
        event_type: EventType,
        team: Option<TeamSide>,
        description: String,
        meta: EventMeta,
    ) {
        self.momentum.apply(event_type);
        self.bump_stats(event_type, team);

        let zone = meta.start.or(meta.end).map(|pos| {
            let attacks_right = team.map(|s| self.attacks_right(s)).unwrap_or(true);
            PitchZone::of(pos, attacks_right)
        });

        let event = MatchEvent {
            event_type,
            elapsed_s: self.now_ms as f32 / 1_000.0,
            display_minute: events::display_minute(self.clock.elapsed_s(), self.clock.duration_s),
            team,
            player_idx: meta.player_idx.map(|i| i as u8),
            player_role: meta.player_role,
            description,
            start: meta.start,
            end: meta.end,
            zone,
            outcome: meta.outcome.unwrap_or(EventOutcome::Complete),
            subtype: meta.subtype.map(str::to_string),
            xg: meta.xg,
            momentum: self.momentum.value(),
        };

        debug!(?event_type, minute = event.display_minute, "{}", event.description);
        self.events.push(event);
        let event = self.events.last().expect("just pushed");
        for listener in &mut self.event_listeners {
            listener(event);
        }
    }

    fn bump_stats(&mut self, event_type: EventType, team: Option<TeamSide>) {
        let is_home = match team {
            Some(side) => side.is_home(),
            None => return,
        };
        // Counters saturate: absurd caller-supplied durations clamp rather
        // than trip the overflow check.
        let slot = |home: &mut u16, away: &mut u16| {
            if is_home {
                *home = home.saturating_add(1);
            } else {
                *away = away.saturating_add(1);
            }
        };
        // Destructure once to keep the borrow local.
        let stats = &mut self.stats;
        match event_type {
            EventType::Pass => slot(&mut stats.passes_home, &mut stats.passes_away),
            EventType::Shot => slot(&mut stats.shots_home, &mut stats.shots_away),
            EventType::Tackle => slot(&mut stats.tackles_home, &mut stats.tackles_away),
            EventType::Corner => slot(&mut stats.corners_home, &mut stats.corners_away),
            EventType::Offside => slot(&mut stats.offsides_home, &mut stats.offsides_away),
            EventType::Foul => slot(&mut stats.fouls_home, &mut stats.fouls_away),
            _ => {}
        }
    }

    // ===========================================
    // Test scaffolding
    // ===========================================

    /// Teleport a player (test scenarios).
    #[doc(hidden)]
    pub fn place_player(&mut self, idx: usize, pos: Vec2) {
        self.players[idx].pos = pitch::clamp(pos);
    }

    /// Drop a loose ball at `pos` (test scenarios).
    #[doc(hidden)]
    pub fn place_loose_ball(&mut self, pos: Vec2) {
        self.flight = None;
        self.ball.owner = None;
        self.ball.pos = pitch::clamp(pos);
        self.ball.vel = Vec2::default();
    }

    /// Set a loose ball rolling with a known last touch (test scenarios).
    #[doc(hidden)]
    pub fn place_rolling_ball(&mut self, pos: Vec2, vel: Vec2, last_touch: TeamSide) {
        self.flight = None;
        self.ball.owner = None;
        self.ball.pos = pitch::clamp(pos);
        self.ball.vel = vel;
        self.ball.last_touch = Some(last_touch);
    }

    /// Put a prepared flight in the air (test scenarios).
    #[doc(hidden)]
    pub fn inject_flight(&mut self, flight: BallFlight) {
        self.ball.owner = None;
        self.ball.last_touch = Some(TeamSide::of_index(flight.kicker));
        self.flight = Some(flight);
    }

    /// Current flight record, if the ball is in the air (test scenarios).
    #[doc(hidden)]
    pub fn flight_for_test(&self) -> Option<&BallFlight> {
        self.flight.as_ref()
    }

    /// Advance the engine clock without running any tick (test scenarios).
    #[doc(hidden)]
    pub fn advance_now_for_test(&mut self, dt_ms: u64) {
        self.now_ms += dt_ms;
    }

    /// Force the phase machine straight into open play (test scenarios).
    #[doc(hidden)]
    pub fn force_in_play(&mut self) {
        self.phase = MatchPhase::InPlay;
        self.phase_wait_until_ms = self.now_ms;
        self.grace_until_ms = self.now_ms;
        self.lock_until_ms = self.now_ms;
    }
}
