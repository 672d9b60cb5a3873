//! Data-driven scene constants
//!
//! Everything the simulation needs to know about the canvas, the obstacles
//! and the bull lives in [`SceneTuning`]. Defaults reproduce the shipped
//! scene; a JSON override can be loaded with [`SceneTuning::from_json`].

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the player is pushed out when it overlaps several obstacles at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveOrder {
    /// Deepest overlap first, ties by obstacle id. Each later check sees
    /// the already-corrected position.
    #[default]
    DeepestFirst,
    /// Obstacle id order; a later obstacle may override an earlier snap.
    PlacementOrder,
}

/// Errors produced while loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("`{field}` must be finite and greater than 0, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("`{field}` must be finite and at least 0, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("`max_placement_attempts` must be at least 1")]
    NoPlacementAttempts,
    #[error("the playfield is too small for a player of radius {radius}")]
    PlayfieldTooSmall { radius: f32 },
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Scene constants for a single run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneTuning {
    /// Canvas size in pixels
    pub width: f32,
    pub height: f32,
    /// Band at the top of the canvas kept free of obstacles and the player
    pub top_margin: f32,

    /// Number of obstacles to place
    pub obstacle_count: usize,
    /// Placement attempt ceiling
    pub max_placement_attempts: u32,
    /// Extra gap required between obstacles beyond their radii
    pub obstacle_spacing: f32,
    pub obstacle_radius: f32,
    pub obstacle_sprite_width: f32,
    pub obstacle_sprite_height: f32,
    /// Sprite is drawn this far above the collision center
    pub obstacle_sprite_lift: f32,

    pub player_radius: f32,
    /// Maximum displacement per tick
    pub player_speed: f32,
    pub player_sprite_width: f32,
    pub player_sprite_height: f32,
    pub player_sprite_lift: f32,

    pub resolve_order: ResolveOrder,
}

impl Default for SceneTuning {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            top_margin: 260.0,

            obstacle_count: 4,
            max_placement_attempts: 500,
            obstacle_spacing: 145.0,
            obstacle_radius: 55.0,
            obstacle_sprite_width: 250.0,
            obstacle_sprite_height: 250.0,
            obstacle_sprite_lift: 70.0,

            player_radius: 30.0,
            player_speed: 2.0,
            player_sprite_width: 255.0,
            player_sprite_height: 255.0,
            player_sprite_lift: 100.0,

            resolve_order: ResolveOrder::DeepestFirst,
        }
    }
}

impl SceneTuning {
    /// Parse and validate tuning from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the constants describe a playable scene
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("obstacle_radius", self.obstacle_radius),
            ("obstacle_sprite_width", self.obstacle_sprite_width),
            ("obstacle_sprite_height", self.obstacle_sprite_height),
            ("player_radius", self.player_radius),
            ("player_speed", self.player_speed),
            ("player_sprite_width", self.player_sprite_width),
            ("player_sprite_height", self.player_sprite_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("top_margin", self.top_margin),
            ("obstacle_spacing", self.obstacle_spacing),
            ("obstacle_sprite_lift", self.obstacle_sprite_lift),
            ("player_sprite_lift", self.player_sprite_lift),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Negative { field, value });
            }
        }

        if self.max_placement_attempts == 0 {
            return Err(TuningError::NoPlacementAttempts);
        }

        let (min, max) = self.player_bounds();
        if min.x > max.x || min.y > max.y {
            return Err(TuningError::PlayfieldTooSmall {
                radius: self.player_radius,
            });
        }

        Ok(())
    }

    /// Canvas center, where the bull and the pointer start
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Range of positions the player's collision center may occupy
    pub fn player_bounds(&self) -> (Vec2, Vec2) {
        let r = self.player_radius;
        (
            Vec2::new(r, self.top_margin + r),
            Vec2::new(self.width - r, self.height - r),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SceneTuning::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_partial_override() {
        let tuning = SceneTuning::from_json(
            r#"{ "obstacle_count": 10, "obstacle_spacing": 150.0, "resolve_order": "placement_order" }"#,
        )
        .unwrap();
        assert_eq!(tuning.obstacle_count, 10);
        assert_eq!(tuning.obstacle_spacing, 150.0);
        assert_eq!(tuning.resolve_order, ResolveOrder::PlacementOrder);
        // Untouched fields keep their defaults
        assert_eq!(tuning.width, 1280.0);
        assert_eq!(tuning.max_placement_attempts, 500);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = SceneTuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let tuning = SceneTuning {
            obstacle_radius: 0.0,
            ..Default::default()
        };
        let err = tuning.validate().unwrap_err();
        assert!(matches!(
            err,
            TuningError::NotPositive {
                field: "obstacle_radius",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_nan_speed() {
        let tuning = SceneTuning {
            player_speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NotPositive {
                field: "player_speed",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_negative_spacing() {
        let tuning = SceneTuning {
            obstacle_spacing: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Negative {
                field: "obstacle_spacing",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let tuning = SceneTuning {
            max_placement_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NoPlacementAttempts)
        ));
    }

    #[test]
    fn test_rejects_top_margin_covering_canvas() {
        let tuning = SceneTuning {
            top_margin: 700.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::PlayfieldTooSmall { .. })
        ));
    }

    #[test]
    fn test_error_message_names_field() {
        let err = TuningError::NotPositive {
            field: "width",
            value: -3.0,
        };
        assert_eq!(err.to_string(), "`width` must be finite and greater than 0, got -3");
    }
}
