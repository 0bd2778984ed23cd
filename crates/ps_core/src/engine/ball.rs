//! Ball state, flight trajectories and boundary classification.
//!
//! An owned ball is derivative of its owner's position and carries no
//! velocity. A kicked ball is either a timed straight-line flight
//! ([`BallFlight`], consumed until it resolves) or a loose ball integrated
//! under friction until it stops, is picked up, or leaves the pitch.

use serde::{Deserialize, Serialize};

use super::config::PhysicsConfig;
use super::geometry::{lerp_position, Vec2};
use super::pitch;
use crate::models::TeamSide;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Flat index of the current owner, if any. At most one at all times.
    pub owner: Option<usize>,
    /// Which side last touched the ball; drives throw-in/corner awards.
    pub last_touch: Option<TeamSide>,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: pitch::CENTER,
            vel: Vec2::default(),
            owner: None,
            last_touch: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightKind {
    Pass,
    Shot,
}

/// A pass or shot in the air: one record shared by both, resolved by the
/// physics tick on arrival (or earlier, at the interception point).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallFlight {
    pub kind: FlightKind,
    /// Passer or shooter.
    pub kicker: usize,
    /// Intended receiver for passes.
    pub receiver: Option<usize>,
    /// Pre-computed interceptor: (player, point, absolute ms).
    pub interceptor: Option<(usize, Vec2, u64)>,
    pub start: Vec2,
    pub end: Vec2,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub xg: Option<f32>,
}

impl BallFlight {
    pub fn progress(&self, now_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        ((now_ms.saturating_sub(self.start_ms)) as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    pub fn position_at(&self, now_ms: u64) -> Vec2 {
        lerp_position(self.start, self.end, self.progress(now_ms))
    }

    pub fn arrived(&self, now_ms: u64) -> bool {
        now_ms >= self.start_ms + self.duration_ms
    }
}

/// Integrate a loose ball by `dt_s`: position from velocity, exponential
/// friction (weather-scaled), near-zero velocity snapped to rest. The
/// position is NOT clamped here; the caller classifies the boundary
/// crossing first.
pub fn integrate_loose(ball: &mut Ball, dt_s: f32, cfg: &PhysicsConfig) -> Vec2 {
    let prev = ball.pos;
    ball.pos = Vec2::new(ball.pos.x + ball.vel.x * dt_s, ball.pos.y + ball.vel.y * dt_s);

    let decay = (-cfg.friction_per_s * cfg.weather.friction_factor() * dt_s).exp();
    ball.vel = ball.vel.scaled(decay);
    if ball.vel.x.abs() < cfg.stop_epsilon {
        ball.vel.x = 0.0;
    }
    if ball.vel.y.abs() < cfg.stop_epsilon {
        ball.vel.y = 0.0;
    }
    prev
}

/// Raw out-of-bounds classification, before team attribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCrossing {
    /// Crossed a touchline; `top` is the y=0 line.
    Touchline { exit_x: f32, top: bool },
    /// Crossed a goal line; `right` is the x=LENGTH line. `y_at_cross` is
    /// the interpolated y where the ball crossed the line, used for the
    /// goal-mouth aperture check.
    GoalLine { right: bool, y_at_cross: f32 },
}

/// Classify a loose-ball move from `prev` to `next`. Touchline crossings
/// win over goal-line crossings for corner exits.
pub fn classify_boundary(prev: Vec2, next: Vec2) -> Option<BoundaryCrossing> {
    if next.y < 0.0 || next.y > pitch::WIDTH_M {
        return Some(BoundaryCrossing::Touchline {
            exit_x: next.x.clamp(0.0, pitch::LENGTH_M),
            top: next.y < 0.0,
        });
    }
    if next.x < 0.0 || next.x > pitch::LENGTH_M {
        let right = next.x > pitch::LENGTH_M;
        let line_x = if right { pitch::LENGTH_M } else { 0.0 };
        let dx = next.x - prev.x;
        let t = if dx.abs() < 1e-6 {
            1.0
        } else {
            ((line_x - prev.x) / dx).clamp(0.0, 1.0)
        };
        let y_at_cross = prev.y + (next.y - prev.y) * t;
        return Some(BoundaryCrossing::GoalLine { right, y_at_cross });
    }
    None
}
