//! Obstacle placement by bounded random retry (circle packing)
//!
//! Candidates are sampled uniformly over the whole canvas and kept only if
//! they clear every accepted obstacle by the spacing buffer and their sprite
//! fits the drawable region. The attempt ceiling bounds the work; running
//! out of attempts simply yields a sparser scene.

use glam::Vec2;
use rand::Rng;

use super::collision::Circle;
use super::state::Obstacle;
use crate::consts::{OBSTACLE_SHEET_COLUMNS, OBSTACLE_SHEET_ROWS};
use crate::distance;
use crate::tuning::SceneTuning;

/// Constraints for one placement run
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRules {
    /// Target number of obstacles
    pub count: usize,
    /// Attempt ceiling
    pub max_attempts: u32,
    /// Extra gap required between obstacles
    pub spacing: f32,
    pub radius: f32,
    pub sprite_width: f32,
    /// Obstacle-free band at the top of the canvas
    pub top_margin: f32,
    pub width: f32,
    pub height: f32,
}

impl From<&SceneTuning> for PlacementRules {
    fn from(tuning: &SceneTuning) -> Self {
        Self {
            count: tuning.obstacle_count,
            max_attempts: tuning.max_placement_attempts,
            spacing: tuning.obstacle_spacing,
            radius: tuning.obstacle_radius,
            sprite_width: tuning.obstacle_sprite_width,
            top_margin: tuning.top_margin,
            width: tuning.width,
            height: tuning.height,
        }
    }
}

impl PlacementRules {
    /// Whether a candidate center keeps the sprite on the canvas and the
    /// collision circle clear of the top band and bottom edge
    pub fn in_drawable_region(&self, center: Vec2) -> bool {
        let sprite_x = center.x - self.sprite_width * 0.5;
        let margin = self.radius * 2.0;

        sprite_x > 0.0
            && sprite_x < self.width - self.sprite_width
            && center.y > self.top_margin + margin
            && center.y < self.height - margin
    }

    /// Whether a candidate center keeps the spacing buffer to `other`
    pub fn clears(&self, center: Vec2, other: &Circle) -> bool {
        distance(center, other.center) >= self.radius + other.radius + self.spacing
    }
}

/// Outcome of a placement run
#[derive(Debug, Clone)]
pub struct Placement {
    /// Accepted obstacles, ids in acceptance order starting at 1
    pub obstacles: Vec<Obstacle>,
    /// Candidates drawn
    pub attempts: u32,
}

/// Place up to `rules.count` obstacles
pub fn place_obstacles<R: Rng + ?Sized>(rng: &mut R, rules: &PlacementRules) -> Placement {
    // Each attempt accepts at most one obstacle
    let capacity = rules.count.min(rules.max_attempts as usize);
    let mut obstacles: Vec<Obstacle> = Vec::with_capacity(capacity);
    let mut attempts = 0;

    while obstacles.len() < rules.count && attempts < rules.max_attempts {
        attempts += 1;

        let center = Vec2::new(
            rng.random::<f32>() * rules.width,
            rng.random::<f32>() * rules.height,
        );

        let fits = rules.in_drawable_region(center)
            && obstacles.iter().all(|o| rules.clears(center, &o.body));
        if !fits {
            continue;
        }

        let sheet_cell = (
            rng.random_range(0..OBSTACLE_SHEET_COLUMNS),
            rng.random_range(0..OBSTACLE_SHEET_ROWS),
        );
        obstacles.push(Obstacle {
            id: obstacles.len() as u32 + 1,
            body: Circle::new(center, rules.radius),
            sheet_cell,
        });
    }

    Placement {
        obstacles,
        attempts,
    }
}
