//! Roster-facing team type and the home/away side marker used throughout
//! the engine. Players are stored in one flat array of 22: home 0..11,
//! away 11..22.

use serde::{Deserialize, Serialize};

use super::player::Player;
use crate::error::{EngineError, Result};

pub const SQUAD_SIZE: usize = 11;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    /// Display color, adjusted for contrast by the rendering collaborator.
    pub color: String,
    pub players: Vec<Player>,
}

impl Team {
    pub fn validate(&self) -> Result<()> {
        if self.players.len() != SQUAD_SIZE {
            return Err(EngineError::InvalidTeamSize {
                team: self.name.clone(),
                expected: SQUAD_SIZE,
                found: self.players.len(),
            });
        }
        if !self.players.iter().any(|p| p.role.is_goalkeeper()) {
            return Err(EngineError::MissingGoalkeeper {
                team: self.name.clone(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opposite(&self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, TeamSide::Home)
    }

    /// Side owning flat player index `idx` (0..22).
    pub fn of_index(idx: usize) -> TeamSide {
        if idx < SQUAD_SIZE {
            TeamSide::Home
        } else {
            TeamSide::Away
        }
    }

    /// Flat index range of this side's players.
    pub fn range(&self) -> std::ops::Range<usize> {
        match self {
            TeamSide::Home => 0..SQUAD_SIZE,
            TeamSide::Away => SQUAD_SIZE..2 * SQUAD_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerRole;

    fn team_of(n: usize) -> Team {
        let mut players: Vec<Player> =
            (0..n).map(|i| Player::new(i as u32, format!("P{i}"), PlayerRole::Defender)).collect();
        if let Some(first) = players.first_mut() {
            first.role = PlayerRole::Goalkeeper;
        }
        Team { id: 1, name: "Test FC".into(), color: "#ff0000".into(), players }
    }

    #[test]
    fn test_validate_accepts_eleven() {
        assert!(team_of(11).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_wrong_size() {
        let err = team_of(9).validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidTeamSize { found: 9, .. }));
    }

    #[test]
    fn test_validate_rejects_missing_goalkeeper() {
        let mut team = team_of(11);
        team.players[0].role = PlayerRole::Defender;
        assert!(matches!(
            team.validate().unwrap_err(),
            EngineError::MissingGoalkeeper { .. }
        ));
    }

    #[test]
    fn test_side_of_index() {
        assert_eq!(TeamSide::of_index(0), TeamSide::Home);
        assert_eq!(TeamSide::of_index(10), TeamSide::Home);
        assert_eq!(TeamSide::of_index(11), TeamSide::Away);
        assert_eq!(TeamSide::Home.range(), 0..11);
        assert_eq!(TeamSide::Away.range(), 11..22);
    }
}
