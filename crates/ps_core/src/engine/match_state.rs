//! Published match-state snapshot.
//!
//! The engine mutates its own state synchronously within a tick and
//! publishes a fresh snapshot after every frame; subscribers never observe
//! a partially applied tick (latest-value-wins, no replay).

use serde::{Deserialize, Serialize};

use super::clock::MatchPhase;
use super::events::MatchEvent;
use super::geometry::Vec2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn total(&self) -> u16 {
        self.home as u16 + self.away as u16
    }
}

/// Aggregate counters, derivable from the event list but kept current for
/// cheap scoreboard rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub passes_home: u16,
    pub passes_away: u16,
    pub shots_home: u16,
    pub shots_away: u16,
    pub tackles_home: u16,
    pub tackles_away: u16,
    pub corners_home: u16,
    pub corners_away: u16,
    pub offsides_home: u16,
    pub offsides_away: u16,
    pub fouls_home: u16,
    pub fouls_away: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub is_running: bool,
    pub time_remaining: u32,
    pub score: Score,
    pub ball_position: Vec2,
    pub ball_velocity: Vec2,
    /// Flat index of the current ball owner, if any.
    pub current_ball_owner: Option<u8>,
    pub phase: MatchPhase,
    pub kickoff_team_name: String,
    pub stats: MatchStats,
    /// Append-only commentary stream; never reordered after insertion.
    pub events: Vec<MatchEvent>,
}
