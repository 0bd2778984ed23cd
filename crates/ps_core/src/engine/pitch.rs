//! Pitch dimensions and fixed field geometry.
//!
//! Standard 105 x 68 m pitch. Home attacks toward +x in the first half;
//! the engine flips attack directions at halftime rather than moving the
//! coordinate frame.

use super::geometry::Vec2;

pub const LENGTH_M: f32 = 105.0;
pub const WIDTH_M: f32 = 68.0;
pub const CENTER_X: f32 = LENGTH_M / 2.0;
pub const CENTER_Y: f32 = WIDTH_M / 2.0;
pub const CENTER: Vec2 = Vec2::new(CENTER_X, CENTER_Y);

/// Regulation goal mouth width.
pub const GOAL_WIDTH_M: f32 = 7.32;
pub const PENALTY_AREA_DEPTH_M: f32 = 16.5;
pub const PENALTY_AREA_WIDTH_M: f32 = 40.32;
pub const PENALTY_SPOT_DEPTH_M: f32 = 11.0;

/// Throw-ins are taken a short step inside the touchline.
pub const TOUCHLINE_INSET_M: f32 = 3.4;
/// Goal kicks and corner takers stand a short step inside the goal line.
pub const GOAL_LINE_INSET_M: f32 = 5.25;

/// y-range of the goal mouth (same for both goals).
pub fn goal_mouth() -> (f32, f32) {
    (CENTER_Y - GOAL_WIDTH_M / 2.0, CENTER_Y + GOAL_WIDTH_M / 2.0)
}

pub fn in_goal_mouth(y: f32) -> bool {
    let (lo, hi) = goal_mouth();
    y >= lo && y <= hi
}

/// Center of the goal a team attacking `toward_right` is shooting at.
pub fn attacked_goal_center(attacks_right: bool) -> Vec2 {
    if attacks_right {
        Vec2::new(LENGTH_M, CENTER_Y)
    } else {
        Vec2::new(0.0, CENTER_Y)
    }
}

/// Penalty spot in front of the goal a team attacking `attacks_right`
/// is shooting at.
pub fn penalty_spot(attacks_right: bool) -> Vec2 {
    if attacks_right {
        Vec2::new(LENGTH_M - PENALTY_SPOT_DEPTH_M, CENTER_Y)
    } else {
        Vec2::new(PENALTY_SPOT_DEPTH_M, CENTER_Y)
    }
}

/// Whether `pos` is inside the penalty area in front of the right (`true`)
/// or left (`false`) goal.
pub fn in_penalty_area(pos: Vec2, right_goal: bool) -> bool {
    let depth_ok = if right_goal {
        pos.x >= LENGTH_M - PENALTY_AREA_DEPTH_M
    } else {
        pos.x <= PENALTY_AREA_DEPTH_M
    };
    let half_w = PENALTY_AREA_WIDTH_M / 2.0;
    depth_ok && (pos.y - CENTER_Y).abs() <= half_w
}

pub fn contains(pos: Vec2) -> bool {
    pos.x >= 0.0 && pos.x <= LENGTH_M && pos.y >= 0.0 && pos.y <= WIDTH_M
}

pub fn clamp(pos: Vec2) -> Vec2 {
    Vec2::new(pos.x.clamp(0.0, LENGTH_M), pos.y.clamp(0.0, WIDTH_M))
}
