use serde::{Deserialize, Serialize};

use crate::course::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::physics::{
    BUMPER_BOOST, BUMPER_CAP_FACTOR, BUMPER_MIN_IMPULSE, FRICTION, MAX_SPEED, MIN_SPEED,
    OUT_OF_BOUNDS_MARGIN, RAMP_FORCE_SCALE, SINK_DISTANCE, SPEED_SCALE, SPIN_FACTOR, SWEEP_SCALE,
};
use crate::scoring::MAX_STROKES;

/// Tunable physics parameters. Ball radius and collision damping are fixed
/// constants and not part of this table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Velocity kept per nominal tick (`v *= friction^dt`).
    pub friction: f32,
    /// Below this speed the ball comes to rest.
    pub min_speed: f32,
    /// Speed ceiling applied before and after integration.
    pub max_speed: f32,
    /// Launch speed per unit of shot power.
    pub speed_scale: f32,
    /// Visual roll per unit of distance travelled.
    pub spin_factor: f32,
    /// Ball-center to cup distance that counts as holed.
    pub sink_distance: f32,
    /// Bumper relaunch multiplier on the reflected speed.
    pub bumper_boost: f32,
    /// Minimum bumper relaunch speed.
    pub bumper_min_impulse: f32,
    /// Bumper relaunch cap as a multiple of `max_speed`.
    pub bumper_cap_factor: f32,
    /// Ramp acceleration per unit of ramp force per tick.
    pub ramp_force_scale: f32,
    /// Multiplier on rotating-blade surface velocity.
    pub sweep_scale: f32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// How far outside the canvas the ball may go before it is reset.
    pub out_of_bounds_margin: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            friction: FRICTION,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            speed_scale: SPEED_SCALE,
            spin_factor: SPIN_FACTOR,
            sink_distance: SINK_DISTANCE,
            bumper_boost: BUMPER_BOOST,
            bumper_min_impulse: BUMPER_MIN_IMPULSE,
            bumper_cap_factor: BUMPER_CAP_FACTOR,
            ramp_force_scale: RAMP_FORCE_SCALE,
            sweep_scale: SWEEP_SCALE,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            out_of_bounds_margin: OUT_OF_BOUNDS_MARGIN,
        }
    }
}

/// Top-level mini-golf configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GolfConfig {
    pub physics: PhysicsTuning,
    /// Stroke limit reported to the scoring collaborator.
    pub max_strokes: u32,
}

impl Default for GolfConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsTuning::default(),
            max_strokes: MAX_STROKES,
        }
    }
}

impl GolfConfig {
    /// Load config from a TOML file. Checks `FAIRWAY_GOLF_CONFIG`, then
    /// `config/golf.toml`. Falls back to defaults if the file is missing or
    /// unparseable.
    pub fn load() -> Self {
        let path = std::env::var("FAIRWAY_GOLF_CONFIG")
            .unwrap_or_else(|_| "config/golf.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(GolfConfig::from_toml("").unwrap(), GolfConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let cfg = GolfConfig::from_toml(
            r#"
            max_strokes = 6

            [physics]
            friction = 0.97
            max_speed = 12.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.max_strokes, 6);
        assert_eq!(cfg.physics.friction, 0.97);
        assert_eq!(cfg.physics.max_speed, 12.0);
        assert_eq!(cfg.physics.min_speed, MIN_SPEED);
        assert_eq!(cfg.physics.sink_distance, SINK_DISTANCE);
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let shipped = include_str!("../../../../config/golf.toml");
        assert_eq!(GolfConfig::from_toml(shipped).unwrap(), GolfConfig::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(GolfConfig::from_toml("physics = 3").is_err());
    }

    #[test]
    fn defaults_keep_bumper_floor_below_cap() {
        let t = PhysicsTuning::default();
        assert!(t.bumper_min_impulse <= t.max_speed * t.bumper_cap_factor);
        assert!(t.min_speed < t.max_speed);
    }
}
