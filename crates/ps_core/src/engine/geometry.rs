//! Plain 2D vector math for the simulation.
//!
//! All coordinates are f32 meters on the bounded pitch plane. Flight paths
//! are straight segments, so the only non-trivial helper here is the
//! clamped point-to-segment distance used by the interception corridor.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Vec2) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector pointing at `other`. Falls back to +x for zero-length.
    pub fn direction_to(&self, other: Vec2) -> Vec2 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let len = (dx * dx + dy * dy).sqrt();
        if len < 1e-6 {
            Vec2::new(1.0, 0.0)
        } else {
            Vec2::new(dx / len, dy / len)
        }
    }

    pub fn dot(&self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn scaled(&self, factor: f32) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }

    pub fn plus(&self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

/// Linear interpolation between two positions, `t` clamped to [0, 1].
pub fn lerp_position(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    let t = t.clamp(0.0, 1.0);
    Vec2::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
}

/// Shortest distance from `point` to the segment `a`..`b`, plus the
/// projection ratio along the segment (clamped to [0, 1]).
pub fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> (f32, f32) {
    let seg_len_sq = (b.x - a.x).powi(2) + (b.y - a.y).powi(2);
    if seg_len_sq < 1e-4 {
        return (point.distance_to(a), 0.0);
    }

    let t = (((point.x - a.x) * (b.x - a.x) + (point.y - a.y) * (b.y - a.y)) / seg_len_sq)
        .clamp(0.0, 1.0);
    let closest = Vec2::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y));
    (point.distance_to(closest), t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_direction_to_zero_length_falls_back() {
        let a = Vec2::new(2.0, 2.0);
        assert_eq!(a.direction_to(a), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_lerp_position_clamps() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert_eq!(lerp_position(a, b, 1.5), b);
        assert_eq!(lerp_position(a, b, -0.5), a);
        assert_eq!(lerp_position(a, b, 0.5), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_distance_to_segment_perpendicular() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let (dist, t) = distance_to_segment(Vec2::new(5.0, 3.0), a, b);
        assert!((dist - 3.0).abs() < 1e-5);
        assert!((t - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_distance_to_segment_clamps_to_endpoint() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let (dist, t) = distance_to_segment(Vec2::new(14.0, 3.0), a, b);
        assert!((dist - 5.0).abs() < 1e-5);
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_distance_to_degenerate_segment() {
        let a = Vec2::new(1.0, 1.0);
        let (dist, t) = distance_to_segment(Vec2::new(4.0, 5.0), a, a);
        assert!((dist - 5.0).abs() < 1e-5);
        assert_eq!(t, 0.0);
    }
}
