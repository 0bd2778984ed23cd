//! Engine tuning parameters.
//!
//! These are heuristic game-feel values, not physical constants. Every
//! coefficient the simulation formulas use lives here as a named field so
//! variants can be tuned without touching the logic.

use serde::{Deserialize, Serialize};

/// Weather scales ball friction: wet turf slows the ball faster, a dry
/// windy day lets it run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Wind,
}

impl Weather {
    pub fn friction_factor(&self) -> f32 {
        match self {
            Weather::Clear => 1.0,
            Weather::Rain => 1.35,
            Weather::Wind => 0.85,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Exponential velocity decay rate for a loose ball (per second).
    pub friction_per_s: f32,
    /// Velocity components below this are snapped to zero (m/s).
    pub stop_epsilon: f32,
    /// Loose-ball pickup radius (m).
    pub pickup_radius_m: f32,
    /// Nominal pass flight speed (m/s), scaled by pass power.
    pub pass_speed_mps: f32,
    /// Nominal shot flight speed (m/s), scaled by shot power.
    pub shot_speed_mps: f32,
    /// Nominal player top speed (m/s), scaled by speed factor and stamina.
    pub player_speed_mps: f32,
    /// Off-ball players drift at this fraction of their effective speed.
    pub offball_drift: f32,
    /// Kick speed curve: nominal speed times
    /// `kick_power_base + kick_power_coeff * power attribute`.
    pub kick_power_base: f32,
    pub kick_power_coeff: f32,
    pub weather: Weather,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction_per_s: 1.1,
            stop_epsilon: 0.08,
            pickup_radius_m: 1.5,
            pass_speed_mps: 14.0,
            shot_speed_mps: 24.0,
            player_speed_mps: 7.0,
            offball_drift: 0.55,
            kick_power_base: 0.6,
            kick_power_coeff: 0.8,
            weather: Weather::Clear,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PossessionConfig {
    /// Steal checks are suppressed this long after an ownership change (ms).
    pub lock_ms: u64,
    /// Opponents farther than this cannot contest (m).
    pub contest_radius_m: f32,
    /// Base steal probability per contest.
    pub steal_base: f32,
    /// Weight of the stamina-ratio differential term.
    pub steal_stamina_coeff: f32,
    /// Turnover pressure: added per second of continuous possession.
    pub hold_bonus_per_s: f32,
    pub hold_bonus_cap: f32,
    /// Facing-angle term: scaled by how squarely the thief stands in the
    /// owner's attacking path.
    pub facing_bonus: f32,
    /// Chance a failed contest is whistled as a foul.
    pub foul_chance_on_fail: f32,
    /// Chance a whistled foul draws a yellow card.
    pub yellow_chance_on_foul: f32,
}

impl Default for PossessionConfig {
    fn default() -> Self {
        Self {
            lock_ms: 600,
            contest_radius_m: 2.2,
            steal_base: 0.16,
            steal_stamina_coeff: 0.18,
            hold_bonus_per_s: 0.02,
            hold_bonus_cap: 0.15,
            facing_bonus: 0.06,
            foul_chance_on_fail: 0.10,
            yellow_chance_on_foul: 0.22,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionConfig {
    /// Coarse AI cadence (ms), distinct from the per-frame physics tick.
    pub interval_ms: u64,
    /// Shots are not considered beyond this distance to goal (m).
    pub max_shot_distance_m: f32,
    /// Peak shot probability at point-blank central positions.
    pub shot_base: f32,
    /// Role eagerness multipliers for shooting.
    pub shot_eagerness_goalkeeper: f32,
    pub shot_eagerness_defender: f32,
    pub shot_eagerness_midfielder: f32,
    pub shot_eagerness_forward: f32,
    /// Aim spread at zero accuracy (m, half-width around goal center).
    pub shot_spread_m: f32,
    /// Shot quality curve: `base + coeff * accuracy attribute`.
    pub shot_quality_base: f32,
    pub shot_quality_accuracy_coeff: f32,
    /// Shot freshness curve: `base + coeff * stamina ratio`.
    pub shot_freshness_base: f32,
    pub shot_freshness_stamina_coeff: f32,
    /// Centrality shaping shared by shot probability and the xG model:
    /// `floor + coeff * centrality`.
    pub shot_centrality_floor: f32,
    pub shot_centrality_coeff: f32,
    /// Open-play xG: `base + distance_coeff * distance falloff * centrality`.
    pub xg_base: f32,
    pub xg_distance_coeff: f32,
    /// Fixed xG assigned to a penalty kick.
    pub penalty_xg: f32,
    /// Default pass lane weights (renormalized after biasing).
    pub forward_weight: f32,
    pub lateral_weight: f32,
    pub backward_weight: f32,
    /// Opponent closer than this puts the owner under pressure (m).
    pub pressure_radius_m: f32,
    /// Pressure bias: forward weight damped, safe lanes boosted, while an
    /// opponent is inside the pressure radius.
    pub pressed_forward_damp: f32,
    pub pressed_safe_boost: f32,
    /// Anti-stagnation bias once the sideways-pass threshold is hit.
    pub stagnation_forward_boost: f32,
    pub stagnation_backward_damp: f32,
    /// Consecutive non-advancing passes before the anti-stagnation bias
    /// kicks in.
    pub stagnation_threshold: u32,
    /// Backward passes are damped during the opening moments (ms).
    pub opening_ms: u64,
    pub opening_backward_damp: f32,
    /// A pass must advance the ball at least this far to count as forward (m).
    pub forward_dx_m: f32,
    /// Receivers are led by this much along the attack direction (m).
    pub lead_m: f32,
    /// Interception corridor half-width around the flight segment (m).
    pub corridor_width_m: f32,
    /// An opponent intercepts only if its travel time is below
    /// `ball_time * intercept_margin`.
    pub intercept_margin: f32,
    /// Passes longer than this are tagged as long balls regardless of lane (m).
    pub long_pass_threshold_m: f32,
    /// Save probability: `save_base + save_agility_coeff * agility * stamina
    /// ratio - save_xg_coeff * xG`.
    pub save_base: f32,
    pub save_agility_coeff: f32,
    pub save_xg_coeff: f32,
    /// Chance a save is parried over the goal line for a corner.
    pub parry_out_chance: f32,
    /// Off-ball lane targets are recomputed on this cadence (ms).
    pub lane_recalc_ms: u64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            interval_ms: 250,
            max_shot_distance_m: 30.0,
            shot_base: 0.55,
            shot_eagerness_goalkeeper: 0.02,
            shot_eagerness_defender: 0.35,
            shot_eagerness_midfielder: 0.75,
            shot_eagerness_forward: 1.2,
            shot_spread_m: 6.5,
            shot_quality_base: 0.5,
            shot_quality_accuracy_coeff: 0.5,
            shot_freshness_base: 0.6,
            shot_freshness_stamina_coeff: 0.4,
            shot_centrality_floor: 0.4,
            shot_centrality_coeff: 0.6,
            xg_base: 0.05,
            xg_distance_coeff: 0.75,
            penalty_xg: 0.76,
            forward_weight: 0.60,
            lateral_weight: 0.25,
            backward_weight: 0.15,
            pressure_radius_m: 4.0,
            pressed_forward_damp: 0.5,
            pressed_safe_boost: 1.3,
            stagnation_forward_boost: 2.0,
            stagnation_backward_damp: 0.5,
            stagnation_threshold: 3,
            opening_ms: 30_000,
            opening_backward_damp: 0.3,
            forward_dx_m: 2.0,
            lead_m: 1.5,
            corridor_width_m: 1.8,
            intercept_margin: 0.85,
            long_pass_threshold_m: 25.0,
            save_base: 0.38,
            save_agility_coeff: 0.35,
            save_xg_coeff: 0.5,
            parry_out_chance: 0.30,
            lane_recalc_ms: 3_000,
        }
    }
}

impl DecisionConfig {
    pub fn shot_eagerness(&self, role: crate::models::PlayerRole) -> f32 {
        use crate::models::PlayerRole::*;
        match role {
            Goalkeeper => self.shot_eagerness_goalkeeper,
            Defender => self.shot_eagerness_defender,
            Midfielder => self.shot_eagerness_midfielder,
            Forward => self.shot_eagerness_forward,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaminaConfig {
    /// Baseline drain per second of play.
    pub base_decay_per_s: f32,
    /// Additional drain per second while chasing or pressing.
    pub chase_decay_per_s: f32,
    /// Regeneration per second when drifting away from the ball.
    pub regen_per_s: f32,
    /// Players within this range of the ball never regenerate (m).
    pub near_ball_radius_m: f32,
    /// Role drain multipliers: engines in midfield run the most.
    pub role_mult_goalkeeper: f32,
    pub role_mult_defender: f32,
    pub role_mult_midfielder: f32,
    pub role_mult_forward: f32,
    /// Effective speed never drops below this fraction of nominal.
    pub min_speed_factor: f32,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            base_decay_per_s: 0.10,
            chase_decay_per_s: 0.45,
            regen_per_s: 0.30,
            near_ball_radius_m: 10.0,
            role_mult_goalkeeper: 0.4,
            role_mult_defender: 0.9,
            role_mult_midfielder: 1.15,
            role_mult_forward: 1.1,
            min_speed_factor: 0.55,
        }
    }
}

impl StaminaConfig {
    pub fn role_multiplier(&self, role: crate::models::PlayerRole) -> f32 {
        use crate::models::PlayerRole::*;
        match role {
            Goalkeeper => self.role_mult_goalkeeper,
            Defender => self.role_mult_defender,
            Midfielder => self.role_mult_midfielder,
            Forward => self.role_mult_forward,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Placement freeze after the ball is centered for kickoff (ms).
    pub kickoff_freeze_ms: u64,
    /// Pause between halves (ms).
    pub halftime_pause_ms: u64,
    /// Tackle/offside suppression window after any restart (ms).
    pub restart_grace_ms: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            kickoff_freeze_ms: 1_000,
            halftime_pause_ms: 2_200,
            restart_grace_ms: 1_200,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub physics: PhysicsConfig,
    pub possession: PossessionConfig,
    pub decision: DecisionConfig,
    pub stamina: StaminaConfig,
    pub clock: ClockConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_roundtrip_through_serde() {
        let cfg = EngineConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.decision.interval_ms, cfg.decision.interval_ms);
        assert_eq!(back.physics.weather, cfg.physics.weather);
        assert!((back.possession.steal_base - cfg.possession.steal_base).abs() < 1e-6);
    }

    #[test]
    fn test_weather_friction_ordering() {
        assert!(Weather::Rain.friction_factor() > Weather::Clear.friction_factor());
        assert!(Weather::Wind.friction_factor() < Weather::Clear.friction_factor());
    }

    #[test]
    fn test_pass_weights_sum_to_one() {
        let d = DecisionConfig::default();
        let sum = d.forward_weight + d.lateral_weight + d.backward_weight;
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_lane_biases_shift_the_expected_way() {
        let d = DecisionConfig::default();
        assert!(d.pressed_forward_damp < 1.0);
        assert!(d.pressed_safe_boost > 1.0);
        assert!(d.stagnation_forward_boost > 1.0);
        assert!(d.stagnation_backward_damp < 1.0);
        assert!(d.opening_backward_damp < 1.0);
    }

    #[test]
    fn test_attribute_curves_stay_positive_at_zero() {
        // A zero-attribute player still kicks, shoots and gets saved against.
        let d = DecisionConfig::default();
        let p = PhysicsConfig::default();
        assert!(p.kick_power_base > 0.0);
        assert!(d.shot_quality_base > 0.0);
        assert!(d.shot_freshness_base > 0.0);
        assert!(d.shot_centrality_floor > 0.0);
        assert!(d.save_base - d.save_xg_coeff * d.penalty_xg < 1.0);
    }
}
