//! Game balance values
//!
//! Defaults come from `consts`. A JSON override can be placed in LocalStorage
//! under `streamyTuning`; missing fields keep their defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON, or a field had the wrong type
    Parse(serde_json::Error),
    /// Parsed, but a value is out of range
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {}", e),
            TuningError::Invalid(field) => write!(f, "tuning value out of range: {}", field),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Balance values read by the simulation and world generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Droplet ===
    pub droplet_radius: f32,
    /// Horizontal speed at 1x (pixels/s)
    pub droplet_speed: f32,
    /// Fall speed at 1x (pixels/s)
    pub fall_speed: f32,
    pub wall_margin: f32,

    // === Difficulty ===
    /// Speed multiplier gained per second of play
    pub speed_ramp: f32,
    pub max_speed_multiplier: f32,
    /// Viewport width per obstacle
    pub pixels_per_shape: f32,
    pub min_shapes: usize,
    pub shapes_per_wrap: usize,

    // === Pickups ===
    pub golden_count: usize,
    /// Inset from the viewport edge (added to the circle radius)
    pub golden_padding: f32,

    // === Timing ===
    pub game_over_reset_ms: f64,
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            droplet_radius: DROPLET_RADIUS,
            droplet_speed: DROPLET_SPEED,
            fall_speed: DROPLET_FALL_SPEED,
            wall_margin: WALL_MARGIN,

            speed_ramp: SPEED_RAMP,
            max_speed_multiplier: MAX_SPEED_MULTIPLIER,
            pixels_per_shape: PIXELS_PER_SHAPE,
            min_shapes: MIN_SHAPES,
            shapes_per_wrap: SHAPES_PER_WRAP,

            golden_count: GOLDEN_COUNT,
            golden_padding: GOLDEN_PADDING,

            game_over_reset_ms: GAME_OVER_RESET_MS,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.droplet_radius > 0.0) {
            return Err(TuningError::Invalid("droplet_radius"));
        }
        if !(self.droplet_speed > 0.0) {
            return Err(TuningError::Invalid("droplet_speed"));
        }
        if !(self.fall_speed > 0.0) {
            return Err(TuningError::Invalid("fall_speed"));
        }
        if !(self.wall_margin >= 0.0) {
            return Err(TuningError::Invalid("wall_margin"));
        }
        if !(self.speed_ramp >= 0.0) {
            return Err(TuningError::Invalid("speed_ramp"));
        }
        if !(self.max_speed_multiplier >= 1.0) {
            return Err(TuningError::Invalid("max_speed_multiplier"));
        }
        if !(self.pixels_per_shape >= 1.0) {
            return Err(TuningError::Invalid("pixels_per_shape"));
        }
        if self.min_shapes > MAX_SHAPES {
            return Err(TuningError::Invalid("min_shapes"));
        }
        if self.shapes_per_wrap > MAX_SHAPES {
            return Err(TuningError::Invalid("shapes_per_wrap"));
        }
        if self.golden_count > MAX_GOLDEN_COUNT {
            return Err(TuningError::Invalid("golden_count"));
        }
        if !(self.golden_padding >= 0.0) {
            return Err(TuningError::Invalid("golden_padding"));
        }
        if !(self.game_over_reset_ms >= 0.0) {
            return Err(TuningError::Invalid("game_over_reset_ms"));
        }
        if !(self.max_frame_dt > 0.0) {
            return Err(TuningError::Invalid("max_frame_dt"));
        }
        Ok(())
    }

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(TUNING_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning overrides from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.droplet_radius, 18.0);
        assert_eq!(t.droplet_speed, 320.0);
        assert_eq!(t.fall_speed, 220.0);
        assert_eq!(t.golden_count, 4);
        assert_eq!(t.game_over_reset_ms, 4000.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "fall_speed": 300.0, "golden_count": 6 }"#).unwrap();
        assert_eq!(t.fall_speed, 300.0);
        assert_eq!(t.golden_count, 6);
        assert_eq!(t.droplet_radius, DROPLET_RADIUS);
        assert_eq!(t.min_shapes, MIN_SHAPES);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "fall_speed": "fast" }"#),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = Tuning::from_json(r#"{ "max_speed_multiplier": 0.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid("max_speed_multiplier")));
        assert!(err.to_string().contains("max_speed_multiplier"));

        let err = Tuning::from_json(r#"{ "droplet_radius": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid("droplet_radius")));

        let err = Tuning::from_json(r#"{ "droplet_speed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid("droplet_speed")));
    }

    #[test]
    fn test_rejects_oversized_counts() {
        let cases = [
            (r#"{ "shapes_per_wrap": 18446744073709551615 }"#, "shapes_per_wrap"),
            (r#"{ "min_shapes": 1000000000 }"#, "min_shapes"),
            (r#"{ "golden_count": 1000000 }"#, "golden_count"),
            (r#"{ "pixels_per_shape": 0.001 }"#, "pixels_per_shape"),
        ];
        for (json, field) in cases {
            match Tuning::from_json(json) {
                Err(TuningError::Invalid(name)) => assert_eq!(name, field),
                other => panic!("{} accepted: {:?}", field, other.map(|_| ())),
            }
        }

        // Limits themselves are fine
        let t = Tuning::from_json(&format!(
            r#"{{ "min_shapes": {}, "shapes_per_wrap": {}, "golden_count": {}, "pixels_per_shape": 1.0 }}"#,
            MAX_SHAPES, MAX_SHAPES, MAX_GOLDEN_COUNT
        ))
        .unwrap();
        assert_eq!(t.golden_count, MAX_GOLDEN_COUNT);
    }
}
