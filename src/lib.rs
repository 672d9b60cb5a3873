//! Bull Chase - a bull chases the pointer through a field of obstacles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (placement, collisions, scene state)
//! - `tuning`: Data-driven scene constants
//! - `platform`: Browser input translation
//! - `renderer`: Sprite-sheet math and Canvas2D drawing
//! - `settings`: Persisted user preferences

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{ResolveOrder, SceneTuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Columns on the bull sprite sheet (animation frames per direction)
    pub const PLAYER_SHEET_COLUMNS: u32 = 59;
    /// Rows on the bull sprite sheet (one per compass direction)
    pub const PLAYER_SHEET_ROWS: u32 = 8;

    /// Obstacle sprite sheet layout
    pub const OBSTACLE_SHEET_COLUMNS: u32 = 4;
    pub const OBSTACLE_SHEET_ROWS: u32 = 3;

    /// Distance the player is pushed past contact when resolving an overlap
    pub const CONTACT_CLEARANCE: f32 = 1.0;
}

/// Vector from `from` to `to`
#[inline]
pub fn displacement(from: Vec2, to: Vec2) -> Vec2 {
    to - from
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    displacement(a, b).length()
}

/// Unit vector pointing from `from` toward `to`
///
/// Coincident points yield `Vec2::ZERO` rather than NaN.
#[inline]
pub fn unit_vector(from: Vec2, to: Vec2) -> Vec2 {
    displacement(from, to).normalize_or_zero()
}

/// Screen-space heading of a vector in radians, in (-π, π]
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}
