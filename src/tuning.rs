//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads goes through [`Tuning`], so a
//! page can override balance without a rebuild.

use serde::Deserialize;
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning document is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning validation error: {0}")]
    Invalid(String),
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_speed: f32,
    pub player_start_y: f32,
    pub weapon_speed: f32,
    pub weapon_spacing: f32,
    pub ship_fallback_width: f32,
    pub ship_fallback_height: f32,

    // === Background ===
    pub bg_speed_initial: f32,
    pub bg_speed_min: f32,
    pub bg_speed_max: f32,
    pub bg_speed_step: f32,

    // === Buggers ===
    pub bugger_target_count: usize,
    pub bugger_speed: f32,
    pub bugger_amplitude: f32,
    pub bugger_phase_divisor: f32,
    pub bugger_floor_margin: f32,

    // === Bomb ===
    /// Ticks after the centre explosion before another bomb is allowed
    pub bomb_cooldown_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            player_start_y: PLAYER_START_Y,
            weapon_speed: WEAPON_SPEED,
            weapon_spacing: WEAPON_SPACING,
            ship_fallback_width: SHIP_FALLBACK_SIZE.0,
            ship_fallback_height: SHIP_FALLBACK_SIZE.1,

            bg_speed_initial: BG_SPEED_INITIAL,
            bg_speed_min: BG_SPEED_MIN,
            bg_speed_max: BG_SPEED_MAX,
            bg_speed_step: BG_SPEED_STEP,

            bugger_target_count: BUGGER_TARGET_COUNT,
            bugger_speed: BUGGER_SPEED,
            bugger_amplitude: BUGGER_AMPLITUDE,
            bugger_phase_divisor: BUGGER_PHASE_DIVISOR,
            bugger_floor_margin: BUGGER_FLOOR_MARGIN,

            bomb_cooldown_ticks: BOMB_COOLDOWN_TICKS,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    fn float_fields(&self) -> [(&'static str, f32); 14] {
        [
            ("player_speed", self.player_speed),
            ("player_start_y", self.player_start_y),
            ("weapon_speed", self.weapon_speed),
            ("weapon_spacing", self.weapon_spacing),
            ("ship_fallback_width", self.ship_fallback_width),
            ("ship_fallback_height", self.ship_fallback_height),
            ("bg_speed_initial", self.bg_speed_initial),
            ("bg_speed_min", self.bg_speed_min),
            ("bg_speed_max", self.bg_speed_max),
            ("bg_speed_step", self.bg_speed_step),
            ("bugger_speed", self.bugger_speed),
            ("bugger_amplitude", self.bugger_amplitude),
            ("bugger_phase_divisor", self.bugger_phase_divisor),
            ("bugger_floor_margin", self.bugger_floor_margin),
        ]
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), TuningError> {
        for (name, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(TuningError::Invalid(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        if self.bg_speed_min > self.bg_speed_max {
            return Err(TuningError::Invalid(format!(
                "bg_speed_min ({}) exceeds bg_speed_max ({})",
                self.bg_speed_min, self.bg_speed_max
            )));
        }
        if self.bg_speed_step <= 0.0 {
            return Err(TuningError::Invalid("bg_speed_step must be positive".into()));
        }
        if !(self.bg_speed_min..=self.bg_speed_max).contains(&self.bg_speed_initial) {
            return Err(TuningError::Invalid(format!(
                "bg_speed_initial ({}) outside [{}, {}]",
                self.bg_speed_initial, self.bg_speed_min, self.bg_speed_max
            )));
        }
        if self.bugger_target_count == 0 {
            return Err(TuningError::Invalid("bugger_target_count must be at least 1".into()));
        }
        if self.bugger_phase_divisor <= 0.0 {
            return Err(TuningError::Invalid("bugger_phase_divisor must be positive".into()));
        }
        if self.weapon_speed <= 0.0 {
            return Err(TuningError::Invalid("weapon_speed must be positive".into()));
        }
        // Buggers only leave on the left, so they must keep moving that way
        if self.bugger_speed <= 0.0 {
            return Err(TuningError::Invalid("bugger_speed must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "bugger_target_count": 5 }"#).unwrap();
        assert_eq!(tuning.bugger_target_count, 5);
        assert_eq!(tuning.weapon_speed, WEAPON_SPEED);
        assert_eq!(tuning.bg_speed_max, BG_SPEED_MAX);
    }

    #[test]
    fn test_inverted_speed_range_rejected() {
        let err = Tuning::from_json(r#"{ "bg_speed_min": 40, "bg_speed_max": 30 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_stalled_buggers_rejected() {
        for speed in ["0", "-5"] {
            let json = format!(r#"{{ "bugger_speed": {} }}"#, speed);
            let err = Tuning::from_json(&json).unwrap_err();
            assert!(matches!(err, TuningError::Invalid(ref msg) if msg.contains("bugger_speed")));
        }
    }

    #[test]
    fn test_non_finite_fields_rejected() {
        let tuning = Tuning {
            bugger_amplitude: f32::NAN,
            ..Tuning::default()
        };
        let err = tuning.validate().unwrap_err();
        assert!(matches!(err, TuningError::Invalid(ref msg) if msg.contains("bugger_amplitude")));

        let tuning = Tuning {
            player_speed: f32::INFINITY,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }
}
