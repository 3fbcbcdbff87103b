use serde::{Deserialize, Serialize};

use crate::LEVEL_COUNT;

/// Physical properties of a launched ball.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BallConfig {
    /// Ball radius as a fraction of the canvas width.
    pub radius_fraction: f32,
    pub mass: f32,
    pub linear_damping: f32,
    pub restitution: f32,
    pub friction: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius_fraction: 0.03,
            mass: 0.1,
            linear_damping: 0.3,
            restitution: 0.3,
            friction: 0.2,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Vertical gravity in pixels/s^2 (Y-up, so negative pulls down)
    pub gravity: f32,
    /// Seconds allowed per attempt
    pub level_time_limit: f32,
    pub three_star_secs: f32,
    pub two_star_secs: f32,
    /// Remaining seconds at which the timer starts blinking
    pub low_time_warning_secs: f32,
    /// Drag length (pixels) that yields a full-strength launch
    pub max_drag_distance: f32,
    /// Launch speed (pixels/s) at full strength
    pub launch_speed: f32,
    pub aim_dash_length: f32,
    pub aim_gap_length: f32,
    /// Balls below `-offscreen_margin * canvas_height` are removed
    pub offscreen_margin: f32,
    pub start_level: u32,
    pub ball: BallConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 960.0,
            canvas_height: 540.0,
            gravity: -750.0,         // 5 m/s^2 at 150 px per meter
            level_time_limit: 90.0,  // 1:30
            three_star_secs: 10.0,
            two_star_secs: 20.0,
            low_time_warning_secs: 10.0,
            max_drag_distance: 150.0,
            launch_speed: 1200.0,
            aim_dash_length: 10.0,
            aim_gap_length: 5.0,
            offscreen_margin: 0.1,
            start_level: 1,
            ball: BallConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("invalid config json: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.canvas_width.is_finite() || self.canvas_width <= 0.0 {
            return Err("canvas_width must be finite and > 0".to_string());
        }
        if !self.canvas_height.is_finite() || self.canvas_height <= 0.0 {
            return Err("canvas_height must be finite and > 0".to_string());
        }
        if !self.gravity.is_finite() {
            return Err("gravity must be finite".to_string());
        }
        if !self.level_time_limit.is_finite() || self.level_time_limit <= 0.0 {
            return Err("level_time_limit must be finite and > 0".to_string());
        }
        if !self.three_star_secs.is_finite() || self.three_star_secs < 0.0 {
            return Err("three_star_secs must be finite and >= 0".to_string());
        }
        if !self.two_star_secs.is_finite() || self.two_star_secs < self.three_star_secs {
            return Err("two_star_secs must be finite and >= three_star_secs".to_string());
        }
        if !self.max_drag_distance.is_finite() || self.max_drag_distance <= 0.0 {
            return Err("max_drag_distance must be finite and > 0".to_string());
        }
        if !self.launch_speed.is_finite() || self.launch_speed < 0.0 {
            return Err("launch_speed must be finite and >= 0".to_string());
        }
        if self.aim_dash_length <= 0.0 || self.aim_gap_length < 0.0 {
            return Err("aim_dash_length must be > 0 and aim_gap_length >= 0".to_string());
        }
        if !self.offscreen_margin.is_finite() || self.offscreen_margin < 0.0 {
            return Err("offscreen_margin must be finite and >= 0".to_string());
        }
        if self.start_level == 0 || self.start_level > LEVEL_COUNT {
            return Err(format!("start_level must be in 1..={LEVEL_COUNT}"));
        }
        let ball = &self.ball;
        if !ball.radius_fraction.is_finite() || ball.radius_fraction <= 0.0 {
            return Err("ball.radius_fraction must be finite and > 0".to_string());
        }
        if !ball.mass.is_finite() || ball.mass <= 0.0 {
            return Err("ball.mass must be finite and > 0".to_string());
        }
        if ball.linear_damping < 0.0 || ball.restitution < 0.0 || ball.friction < 0.0 {
            return Err("ball damping, restitution and friction must be >= 0".to_string());
        }
        Ok(())
    }

    pub fn ball_radius(&self) -> f32 {
        self.canvas_width * self.ball.radius_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_game_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn two_star_threshold_below_three_star_invalid() {
        let mut config = GameConfig::default();
        config.three_star_secs = 30.0;
        config.two_star_secs = 20.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn start_level_out_of_range_invalid() {
        let mut config = GameConfig::default();
        config.start_level = 0;
        assert!(config.validate().is_err());
        config.start_level = LEVEL_COUNT + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json_str(r#"{"levelTimeLimit": 45.0, "ball": {"mass": 0.5}}"#)
            .unwrap();
        assert_eq!(config.level_time_limit, 45.0);
        assert_eq!(config.ball.mass, 0.5);
        assert_eq!(config.ball.restitution, BallConfig::default().restitution);
        assert_eq!(config.max_drag_distance, 150.0);
    }

    #[test]
    fn json_with_invalid_values_is_rejected() {
        let err = GameConfig::from_json_str(r#"{"maxDragDistance": 0.0}"#).unwrap_err();
        assert!(err.contains("max_drag_distance"));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(GameConfig::from_json_str("{ not json").is_err());
    }

    #[test]
    fn ball_radius_scales_with_canvas_width() {
        let config = GameConfig::default();
        assert!((config.ball_radius() - 28.8).abs() < 1e-4);
    }
}
