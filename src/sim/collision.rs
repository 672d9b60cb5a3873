//! Circle-circle collision detection and push-out response
//!
//! Obstacles are static, so the response is a hard snap: the moving body is
//! placed just outside the obstacle along the line between the centers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::CONTACT_CLEARANCE;
use crate::tuning::ResolveOrder;

/// A collision circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl AsRef<Circle> for Circle {
    fn as_ref(&self) -> &Circle {
        self
    }
}

/// Result of a collision check between `a` and `b`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Center distance is strictly less than the summed radii
    pub overlap: bool,
    /// Distance between the centers
    pub distance: f32,
    /// `a.radius + b.radius`
    pub sum_radii: f32,
    /// Raw displacement `a.center - b.center`
    pub delta: Vec2,
}

impl CollisionResult {
    /// How far the circles interpenetrate (0 when apart)
    #[inline]
    pub fn penetration(&self) -> f32 {
        (self.sum_radii - self.distance).max(0.0)
    }
}

/// Check whether two circles overlap
pub fn check_collision(a: &Circle, b: &Circle) -> CollisionResult {
    let delta = a.center - b.center;
    let distance = delta.length();
    let sum_radii = a.radius + b.radius;

    CollisionResult {
        overlap: distance < sum_radii,
        distance,
        sum_radii,
        delta,
    }
}

/// Position that puts `a` just outside `b`, given their collision result
///
/// Coincident centers have no separating direction; `a` is pushed along +x.
pub fn push_out(b_center: Vec2, hit: &CollisionResult) -> Vec2 {
    let unit = hit.delta.try_normalize().unwrap_or(Vec2::X);
    b_center + unit * (hit.sum_radii + CONTACT_CLEARANCE)
}

/// Snap `body` out of every obstacle it overlaps
///
/// Each obstacle is resolved at most once per call and every check uses the
/// position produced by the previous snap. Returns the number of snaps.
pub fn resolve_overlaps<T: AsRef<Circle>>(
    body: &mut Circle,
    obstacles: &[T],
    order: ResolveOrder,
) -> u32 {
    let mut snaps = 0;

    match order {
        ResolveOrder::PlacementOrder => {
            for obstacle in obstacles.iter().map(AsRef::<Circle>::as_ref) {
                let hit = check_collision(body, obstacle);
                if hit.overlap {
                    body.center = push_out(obstacle.center, &hit);
                    snaps += 1;
                }
            }
        }
        ResolveOrder::DeepestFirst => {
            let mut resolved = vec![false; obstacles.len()];
            loop {
                let mut deepest: Option<(usize, CollisionResult)> = None;
                for (i, obstacle) in obstacles.iter().map(AsRef::<Circle>::as_ref).enumerate() {
                    if resolved[i] {
                        continue;
                    }
                    let hit = check_collision(body, obstacle);
                    if !hit.overlap {
                        continue;
                    }
                    // Strict comparison keeps the lowest index on ties
                    let deeper = deepest
                        .map(|(_, best)| hit.penetration() > best.penetration())
                        .unwrap_or(true);
                    if deeper {
                        deepest = Some((i, hit));
                    }
                }

                let Some((i, hit)) = deepest else {
                    break;
                };
                body.center = push_out(obstacles[i].as_ref().center, &hit);
                resolved[i] = true;
                snaps += 1;
            }
        }
    }

    snaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_overlapping_pair() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 10.0);
        let b = Circle::new(Vec2::new(15.0, 0.0), 10.0);

        let hit = check_collision(&a, &b);
        assert!(hit.overlap);
        assert!((hit.distance - 15.0).abs() < EPS);
        assert!((hit.sum_radii - 20.0).abs() < EPS);
        assert_eq!(hit.delta, Vec2::new(-15.0, 0.0));
        assert!((hit.penetration() - 5.0).abs() < EPS);
    }

    #[test]
    fn test_push_out_example() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 10.0);
        let b = Circle::new(Vec2::new(15.0, 0.0), 10.0);

        let hit = check_collision(&a, &b);
        let pos = push_out(b.center, &hit);
        assert!((pos - Vec2::new(-6.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 10.0);
        let b = Circle::new(Vec2::new(20.0, 0.0), 10.0);

        let hit = check_collision(&a, &b);
        assert!(!hit.overlap);
        assert_eq!(hit.penetration(), 0.0);
    }

    #[test]
    fn test_push_out_coincident_centers() {
        let a = Circle::new(Vec2::new(50.0, 50.0), 30.0);
        let b = Circle::new(Vec2::new(50.0, 50.0), 55.0);

        let hit = check_collision(&a, &b);
        assert!(hit.overlap);
        let pos = push_out(b.center, &hit);
        assert!(pos.is_finite());
        assert!((pos - Vec2::new(136.0, 50.0)).length() < EPS);
    }

    #[test]
    fn test_resolve_no_overlap_leaves_body() {
        let mut body = Circle::new(Vec2::new(0.0, 0.0), 30.0);
        let obstacles = [Circle::new(Vec2::new(200.0, 0.0), 55.0)];

        let snaps = resolve_overlaps(&mut body, &obstacles, ResolveOrder::DeepestFirst);
        assert_eq!(snaps, 0);
        assert_eq!(body.center, Vec2::ZERO);
    }

    #[test]
    fn test_resolve_orders_diverge() {
        // Body overlaps both; the second obstacle is much deeper
        let start = Circle::new(Vec2::new(0.0, 0.0), 30.0);
        let obstacles = [
            Circle::new(Vec2::new(-80.0, 0.0), 55.0), // penetration 5
            Circle::new(Vec2::new(0.0, 40.0), 55.0),  // penetration 45
        ];

        // Deep obstacle first: straight up to y = 40 - 86, which already
        // clears the shallow one
        let mut deepest = start;
        let snaps = resolve_overlaps(&mut deepest, &obstacles, ResolveOrder::DeepestFirst);
        assert_eq!(snaps, 1);
        assert!((deepest.center - Vec2::new(0.0, -46.0)).length() < EPS);

        // Shallow obstacle first: out to (6, 0), still inside the deep one,
        // then along (6, -40) from (0, 40)
        let mut in_order = start;
        let snaps = resolve_overlaps(&mut in_order, &obstacles, ResolveOrder::PlacementOrder);
        assert_eq!(snaps, 2);
        assert!((in_order.center - Vec2::new(12.757, -45.049)).length() < 1e-2);
    }

    #[test]
    fn test_squeeze_leaves_earlier_overlap() {
        // Gap between the obstacles is narrower than the body
        let mut body = Circle::new(Vec2::new(0.0, 0.0), 30.0);
        let obstacles = [
            Circle::new(Vec2::new(0.0, 40.0), 55.0),
            Circle::new(Vec2::new(0.0, -60.0), 55.0),
        ];

        // Deepest (first) snaps to y = -46, right into the second, which
        // snaps back down to y = 26
        let snaps = resolve_overlaps(&mut body, &obstacles, ResolveOrder::DeepestFirst);
        assert_eq!(snaps, 2);
        assert!((body.center - Vec2::new(0.0, 26.0)).length() < EPS);
        let hit = check_collision(&body, &obstacles[0]);
        assert!(hit.overlap);
        assert!((hit.distance - 14.0).abs() < EPS);
    }

    #[test]
    fn test_placement_order_last_snap_wins() {
        let mut body = Circle::new(Vec2::new(0.0, 0.0), 30.0);
        let obstacles = [
            Circle::new(Vec2::new(0.0, 40.0), 55.0),
            Circle::new(Vec2::new(0.0, -60.0), 55.0),
        ];

        let snaps = resolve_overlaps(&mut body, &obstacles, ResolveOrder::PlacementOrder);
        assert_eq!(snaps, 2);
        // Second snap pushes the body back down from y = -46
        // to sum_radii + 1 from the second obstacle
        let d = (body.center - obstacles[1].center).length();
        assert!((d - 86.0).abs() < EPS);
    }

    proptest! {
        #[test]
        fn prop_detection_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, ar in 1.0f32..100.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, br in 1.0f32..100.0,
        ) {
            let a = Circle::new(Vec2::new(ax, ay), ar);
            let b = Circle::new(Vec2::new(bx, by), br);
            let ab = check_collision(&a, &b);
            let ba = check_collision(&b, &a);
            prop_assert_eq!(ab.overlap, ba.overlap);
            prop_assert!((ab.distance - ba.distance).abs() < 1e-3);
            prop_assert_eq!(ab.delta, -ba.delta);
        }

        #[test]
        fn prop_single_snap_lands_one_past_contact(
            angle in 0.0f32..std::f32::consts::TAU,
            depth in 1.0f32..80.0,
        ) {
            let obstacle = Circle::new(Vec2::new(400.0, 400.0), 55.0);
            let center = obstacle.center + Vec2::from_angle(angle) * depth;
            let mut body = Circle::new(center, 30.0);

            let snaps = resolve_overlaps(
                &mut body,
                std::slice::from_ref(&obstacle),
                ResolveOrder::DeepestFirst,
            );
            prop_assert_eq!(snaps, 1);
            let d = (body.center - obstacle.center).length();
            prop_assert!((d - (85.0 + CONTACT_CLEARANCE)).abs() < 1e-2);
        }
    }
}
