//! Line-based formation placement.
//!
//! Players are arranged in role lines (goalkeeper, defense, midfield,
//! attack) inside their own half, spread evenly across the pitch width.
//! The computed coordinates double as the "home" anchors used for off-ball
//! drift; halftime mirroring is just a re-run with the attack direction
//! flipped.

use super::geometry::Vec2;
use super::pitch;
use crate::models::PlayerRole;

/// Line depth as a fraction of pitch length, measured from the own goal
/// line. All lines sit inside the own half so kickoff placement is legal.
fn line_depth(role: PlayerRole) -> f32 {
    match role {
        PlayerRole::Goalkeeper => 0.04,
        PlayerRole::Defender => 0.18,
        PlayerRole::Midfielder => 0.33,
        PlayerRole::Forward => 0.46,
    }
}

/// Formation anchors for one side, in roster order. `attacks_right` selects
/// which goal line the side defends.
pub fn formation_anchors(roles: &[PlayerRole], attacks_right: bool) -> Vec<Vec2> {
    let mut anchors = vec![Vec2::default(); roles.len()];

    for line_role in [
        PlayerRole::Goalkeeper,
        PlayerRole::Defender,
        PlayerRole::Midfielder,
        PlayerRole::Forward,
    ] {
        let members: Vec<usize> = roles
            .iter()
            .enumerate()
            .filter(|(_, r)| **r == line_role)
            .map(|(i, _)| i)
            .collect();
        if members.is_empty() {
            continue;
        }

        let depth = line_depth(line_role) * pitch::LENGTH_M;
        let x = if attacks_right {
            depth
        } else {
            pitch::LENGTH_M - depth
        };

        for (slot, &idx) in members.iter().enumerate() {
            let y = pitch::WIDTH_M * (slot as f32 + 1.0) / (members.len() as f32 + 1.0);
            anchors[idx] = Vec2::new(x, y);
        }
    }

    anchors
}
