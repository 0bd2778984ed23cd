//! Roster-facing player types, supplied by the external roster builder.

use serde::{Deserialize, Serialize};

use crate::engine::geometry::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl PlayerRole {
    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, PlayerRole::Goalkeeper)
    }
}

/// Numeric ability block. Skill values are normalized to 0..1, stamina is
/// an absolute pool the engine draws down during the match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Abilities {
    pub pass_power: f32,
    pub shot_power: f32,
    pub accuracy: f32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub speed_factor: f32,
    pub agility: f32,
}

impl Default for Abilities {
    fn default() -> Self {
        Self {
            pass_power: 0.7,
            shot_power: 0.7,
            accuracy: 0.7,
            stamina: 100.0,
            max_stamina: 100.0,
            speed_factor: 1.0,
            agility: 0.7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub role: PlayerRole,
    /// Roster position hint; overwritten by formation placement at kickoff.
    #[serde(default)]
    pub position: Vec2,
    #[serde(default)]
    pub abilities: Abilities,
}

impl Player {
    pub fn new(id: u32, name: impl Into<String>, role: PlayerRole) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            position: Vec2::default(),
            abilities: Abilities::default(),
        }
    }
}
