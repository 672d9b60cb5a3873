//! Scene state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Circle, resolve_overlaps};
use super::placement::{PlacementRules, place_obstacles};
use crate::consts::PLAYER_SHEET_COLUMNS;
use crate::tuning::{ResolveOrder, SceneTuning};
use crate::{displacement, heading};

/// Facing of the bull, one per sprite-sheet row
///
/// Screen y grows downward, so "Up" is toward the top of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Up,
    UpRight,
    #[default]
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Facing {
    /// Bucket a screen-space heading (radians, from `atan2(dy, dx)`) into
    /// one of eight compass directions
    pub fn from_angle(angle: f32) -> Self {
        if angle < -2.74 {
            Facing::Left
        } else if angle < -1.96 {
            Facing::UpLeft
        } else if angle < -1.17 {
            Facing::Up
        } else if angle < -0.39 {
            Facing::UpRight
        } else if angle < 0.39 {
            Facing::Right
        } else if angle < 1.17 {
            Facing::DownRight
        } else if angle < 1.96 {
            Facing::Down
        } else if angle < 2.74 {
            Facing::DownLeft
        } else {
            Facing::Left
        }
    }

    /// Row on the bull sprite sheet
    pub fn sheet_row(self) -> u32 {
        match self {
            Facing::Up => 0,
            Facing::UpRight => 1,
            Facing::Right => 2,
            Facing::DownRight => 3,
            Facing::Down => 4,
            Facing::DownLeft => 5,
            Facing::Left => 6,
            Facing::UpLeft => 7,
        }
    }
}

/// Everything the player needs from the scene to take one step
#[derive(Debug, Clone, Copy)]
pub struct MoveContext<'a> {
    /// Point the bull is heading for (None holds it in place)
    pub target: Option<Vec2>,
    /// Min/max for the collision center
    pub bounds: (Vec2, Vec2),
    pub obstacles: &'a [Obstacle],
    pub resolve_order: ResolveOrder,
}

/// The bull
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Circle,
    /// Unit direction of travel, or zero at rest
    pub velocity: Vec2,
    /// Maximum displacement per tick
    pub speed: f32,
    pub facing: Facing,
    /// Animation column on the sprite sheet
    pub frame: u32,
}

impl Player {
    pub fn new(center: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            body: Circle::new(center, radius),
            velocity: Vec2::ZERO,
            speed,
            facing: Facing::default(),
            frame: 0,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.center
    }

    /// Move at most `speed` toward the target without overshooting
    pub fn step_toward(&mut self, target: Vec2) {
        let to_target = displacement(self.body.center, target);
        let distance = to_target.length();

        if to_target != Vec2::ZERO {
            self.facing = Facing::from_angle(heading(to_target));
        }

        self.velocity = if distance > self.speed {
            to_target.normalize_or_zero()
        } else {
            Vec2::ZERO
        };
        self.body.center += self.velocity * self.speed;
    }

    /// Keep the collision center inside `[min, max]`
    pub fn clamp_to(&mut self, (min, max): (Vec2, Vec2)) {
        self.body.center = self.body.center.max(min).min(max);
    }

    /// Advance the animation column, wrapping at the end of the sheet
    pub fn animate(&mut self) {
        self.frame = (self.frame % PLAYER_SHEET_COLUMNS + 1) % PLAYER_SHEET_COLUMNS;
    }

    /// Full per-tick update. Returns how many obstacles pushed the bull out.
    pub fn update(&mut self, ctx: &MoveContext<'_>) -> u32 {
        match ctx.target {
            Some(target) => self.step_toward(target),
            None => self.velocity = Vec2::ZERO,
        }
        self.clamp_to(ctx.bounds);
        let contacts = resolve_overlaps(&mut self.body, ctx.obstacles, ctx.resolve_order);
        self.animate();
        contacts
    }
}

/// A static obstacle placed at scene start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Placement order, starting at 1
    pub id: u32,
    pub body: Circle,
    /// Sprite-sheet cell (column, row)
    pub sheet_cell: (u32, u32),
}

impl AsRef<Circle> for Obstacle {
    fn as_ref(&self) -> &Circle {
        &self.body
    }
}

/// Complete scene state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneState {
    /// Layout seed
    pub seed: u64,
    pub tuning: SceneTuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Obstacles sorted by id
    pub obstacles: Vec<Obstacle>,
    /// Obstacles the bull was pushed out of on the last tick
    #[serde(skip)]
    pub contacts: u32,
}

impl SceneState {
    /// Build a scene: bull at the canvas center, obstacles packed by seed
    pub fn new(seed: u64, tuning: SceneTuning) -> Self {
        let player = Player::new(tuning.center(), tuning.player_radius, tuning.player_speed);

        let mut state = Self {
            seed,
            tuning,
            time_ticks: 0,
            player,
            obstacles: Vec::new(),
            contacts: 0,
        };
        state.place_obstacles();
        state
    }

    /// Rebuild the scene with a new seed, keeping the tuning
    pub fn restart(&mut self, seed: u64) {
        *self = Self::new(seed, self.tuning.clone());
    }

    fn place_obstacles(&mut self) {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        let rules = PlacementRules::from(&self.tuning);
        let placement = place_obstacles(&mut rng, &rules);

        if placement.obstacles.len() < rules.count {
            log::warn!(
                "Placed {}/{} obstacles after {} attempts (seed {})",
                placement.obstacles.len(),
                rules.count,
                placement.attempts,
                self.seed
            );
        } else {
            log::debug!(
                "Placed {} obstacles in {} attempts",
                placement.obstacles.len(),
                placement.attempts
            );
        }

        self.obstacles = placement.obstacles;
    }
}
