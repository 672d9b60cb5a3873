//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (obstacles by id)
//! - No rendering or platform dependencies

pub mod collision;
pub mod placement;
pub mod state;
pub mod tick;

pub use collision::{Circle, CollisionResult, check_collision, push_out, resolve_overlaps};
pub use placement::{Placement, PlacementRules, place_obstacles};
pub use state::{Facing, MoveContext, Obstacle, Player, SceneState};
pub use tick::{TickInput, tick};
