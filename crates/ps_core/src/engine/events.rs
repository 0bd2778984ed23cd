//! Event taxonomy and the commentary stream record.
//!
//! Every emission carries the elapsed simulated time, a display minute
//! scaled to a 90-minute match, a pitch-zone label derived from the event
//! coordinates, and the running momentum index. Metadata travels through an
//! explicit [`EventMeta`] builder handed to the emit call; there is no
//! hidden scratch state between the decision logic and the emitter.

use serde::{Deserialize, Serialize};

use super::geometry::Vec2;
use super::pitch;
use crate::models::{PlayerRole, TeamSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    CoinToss,
    Kickoff,
    Pass,
    Shot,
    Tackle,
    Interception,
    Goal,
    Save,
    Corner,
    GoalKick,
    ThrowIn,
    Offside,
    Foul,
    YellowCard,
    Penalty,
    HalfTime,
    FullTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    Attempt,
    Complete,
    Intercepted,
    Goal,
    Saved,
    Restart,
}

/// Subtype tags attached to pass/shot events.
pub mod subtype {
    pub const LONG_PASS: &str = "long_pass";
    pub const FORWARD_PASS: &str = "forward_pass";
    pub const LATERAL_PASS: &str = "lateral_pass";
    pub const BACKWARD_PASS: &str = "backward_pass";
    pub const SHOT_ATTEMPT: &str = "shot_attempt";
    pub const PENALTY_SHOT: &str = "penalty_shot";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchThird {
    Defensive,
    Middle,
    Attacking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchFlank {
    Top,
    Central,
    Bottom,
}

/// Zone label: third along the acting team's attack direction, flank across
/// the pitch width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchZone {
    pub third: PitchThird,
    pub flank: PitchFlank,
}

impl PitchZone {
    /// Classify `pos` from the perspective of a team attacking toward
    /// `attacks_right`.
    pub fn of(pos: Vec2, attacks_right: bool) -> Self {
        let along = if attacks_right {
            pos.x
        } else {
            pitch::LENGTH_M - pos.x
        };
        let third = if along < pitch::LENGTH_M / 3.0 {
            PitchThird::Defensive
        } else if along < 2.0 * pitch::LENGTH_M / 3.0 {
            PitchThird::Middle
        } else {
            PitchThird::Attacking
        };
        let flank = if pos.y < pitch::WIDTH_M / 3.0 {
            PitchFlank::Top
        } else if pos.y < 2.0 * pitch::WIDTH_M / 3.0 {
            PitchFlank::Central
        } else {
            PitchFlank::Bottom
        };
        Self { third, flank }
    }

    pub fn label(&self) -> String {
        let third = match self.third {
            PitchThird::Defensive => "defensive",
            PitchThird::Middle => "middle",
            PitchThird::Attacking => "attacking",
        };
        let flank = match self.flank {
            PitchFlank::Top => "top",
            PitchFlank::Central => "central",
            PitchFlank::Bottom => "bottom",
        };
        format!("{third}_{flank}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Simulated seconds since the match started.
    pub elapsed_s: f32,
    /// Elapsed time rescaled onto a 90-minute display clock.
    pub display_minute: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamSide>,
    /// Flat player index (0..21) of the primary actor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_idx: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_role: Option<PlayerRole>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Vec2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Vec2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<PitchZone>,
    pub outcome: EventOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xg: Option<f32>,
    /// Running momentum index at emission time.
    pub momentum: u32,
}

/// Per-emission metadata, built at the decision site and passed straight
/// into the emit call.
#[derive(Debug, Clone, Default)]
pub struct EventMeta {
    pub player_idx: Option<usize>,
    pub player_role: Option<PlayerRole>,
    pub start: Option<Vec2>,
    pub end: Option<Vec2>,
    pub subtype: Option<&'static str>,
    pub xg: Option<f32>,
    pub outcome: Option<EventOutcome>,
}

impl EventMeta {
    pub fn player(mut self, idx: usize, role: PlayerRole) -> Self {
        self.player_idx = Some(idx);
        self.player_role = Some(role);
        self
    }

    pub fn at(mut self, pos: Vec2) -> Self {
        self.start = Some(pos);
        self
    }

    pub fn path(mut self, start: Vec2, end: Vec2) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn subtype(mut self, tag: &'static str) -> Self {
        self.subtype = Some(tag);
        self
    }

    pub fn xg(mut self, value: f32) -> Self {
        self.xg = Some(value);
        self
    }

    pub fn outcome(mut self, outcome: EventOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }
}

/// Momentum deltas per attacking action.
pub mod momentum_delta {
    pub const PASS: u32 = 1;
    pub const SHOT: u32 = 4;
}

/// Accumulating attacking-intensity index. Resets to zero on a goal.
#[derive(Debug, Clone, Copy, Default)]
pub struct MomentumTracker {
    value: u32,
}

impl MomentumTracker {
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn apply(&mut self, event_type: EventType) {
        match event_type {
            EventType::Pass => self.value += momentum_delta::PASS,
            EventType::Shot => self.value += momentum_delta::SHOT,
            EventType::Goal => self.value = 0,
            _ => {}
        }
    }
}

/// Rescale elapsed seconds onto a 90-minute display clock.
pub fn display_minute(elapsed_s: u32, duration_s: u32) -> u8 {
    if duration_s == 0 {
        return 0;
    }
    let minute = (elapsed_s as f32 / duration_s as f32) * 90.0;
    minute.clamp(0.0, 90.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_zone_attacking_right() {
        let zone = PitchZone::of(Vec2::new(95.0, 34.0), true);
        assert_eq!(zone.third, PitchThird::Attacking);
        assert_eq!(zone.flank, PitchFlank::Central);
        assert_eq!(zone.label(), "attacking_central");
    }

    #[test]
    fn test_zone_is_direction_aware() {
        let pos = Vec2::new(95.0, 5.0);
        assert_eq!(PitchZone::of(pos, true).third, PitchThird::Attacking);
        assert_eq!(PitchZone::of(pos, false).third, PitchThird::Defensive);
        assert_eq!(PitchZone::of(pos, true).flank, PitchFlank::Top);
    }

    #[test]
    fn test_display_minute_scaling() {
        assert_eq!(display_minute(0, 90), 0);
        assert_eq!(display_minute(45, 90), 45);
        assert_eq!(display_minute(45, 45), 90);
        assert_eq!(display_minute(30, 45), 60);
        assert_eq!(display_minute(10, 0), 0);
    }

    #[test]
    fn test_momentum_accumulates_and_resets() {
        let mut m = MomentumTracker::default();
        m.apply(EventType::Pass);
        m.apply(EventType::Pass);
        m.apply(EventType::Shot);
        assert_eq!(m.value(), 6);
        m.apply(EventType::Tackle);
        assert_eq!(m.value(), 6);
        m.apply(EventType::Goal);
        assert_eq!(m.value(), 0);
    }

    #[test]
    fn test_event_type_serde_is_snake_case() {
        for event_type in EventType::iter() {
            let json = serde_json::to_string(&event_type).unwrap();
            assert_eq!(json, json.to_lowercase(), "{json} should be snake_case");
            let back: EventType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, event_type);
        }
    }

    #[test]
    fn test_meta_builder_carries_fields() {
        let meta = EventMeta::default()
            .player(4, PlayerRole::Forward)
            .path(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0))
            .subtype(subtype::FORWARD_PASS)
            .xg(0.2)
            .outcome(EventOutcome::Complete);
        assert_eq!(meta.player_idx, Some(4));
        assert_eq!(meta.subtype, Some(subtype::FORWARD_PASS));
        assert_eq!(meta.outcome, Some(EventOutcome::Complete));
        assert!(meta.start.is_some() && meta.end.is_some());
    }
}
