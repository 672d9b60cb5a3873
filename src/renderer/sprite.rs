//! Sprite-sheet cells and on-canvas placement

use crate::sim::{Obstacle, Player};
use crate::tuning::SceneTuning;

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Source cell on a sheet and where it lands on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub source: SpriteRect,
    pub dest: SpriteRect,
}

/// Rectangle of sheet cell `(column, row)` for cells of `w` x `h`
#[inline]
pub fn sheet_source((column, row): (u32, u32), w: f32, h: f32) -> SpriteRect {
    SpriteRect {
        x: column as f32 * w,
        y: row as f32 * h,
        w,
        h,
    }
}

/// Sprite centered on the collision circle, lifted by `lift`
#[inline]
fn lifted_dest(cx: f32, cy: f32, w: f32, h: f32, lift: f32) -> SpriteRect {
    SpriteRect {
        x: cx - w * 0.5,
        y: cy - h * 0.5 - lift,
        w,
        h,
    }
}

pub fn obstacle_sprite(obstacle: &Obstacle, tuning: &SceneTuning) -> SpriteDraw {
    let (w, h) = (tuning.obstacle_sprite_width, tuning.obstacle_sprite_height);
    let c = obstacle.body.center;
    SpriteDraw {
        source: sheet_source(obstacle.sheet_cell, w, h),
        dest: lifted_dest(c.x, c.y, w, h, tuning.obstacle_sprite_lift),
    }
}

/// Bull sprite: column is the animation frame, row is the facing
pub fn player_sprite(player: &Player, tuning: &SceneTuning, reduced_motion: bool) -> SpriteDraw {
    let (w, h) = (tuning.player_sprite_width, tuning.player_sprite_height);
    let column = if reduced_motion { 0 } else { player.frame };
    let c = player.pos();
    SpriteDraw {
        source: sheet_source((column, player.facing.sheet_row()), w, h),
        dest: lifted_dest(c.x, c.y, w, h, tuning.player_sprite_lift),
    }
}

/// Obstacles back to front: lower on screen draws later
pub fn draw_order(obstacles: &[Obstacle]) -> Vec<&Obstacle> {
    let mut ordered: Vec<&Obstacle> = obstacles.iter().collect();
    ordered.sort_by(|a, b| a.body.center.y.total_cmp(&b.body.center.y));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Circle, Facing};
    use glam::Vec2;

    fn obstacle(id: u32, x: f32, y: f32, cell: (u32, u32)) -> Obstacle {
        Obstacle {
            id,
            body: Circle::new(Vec2::new(x, y), 55.0),
            sheet_cell: cell,
        }
    }

    #[test]
    fn test_obstacle_sprite_cell_and_lift() {
        let tuning = SceneTuning::default();
        let draw = obstacle_sprite(&obstacle(1, 400.0, 500.0, (3, 2)), &tuning);

        assert_eq!(
            draw.source,
            SpriteRect {
                x: 750.0,
                y: 500.0,
                w: 250.0,
                h: 250.0
            }
        );
        assert_eq!(draw.dest.x, 275.0);
        assert_eq!(draw.dest.y, 500.0 - 125.0 - 70.0);
    }

    #[test]
    fn test_player_sprite_uses_facing_row() {
        let tuning = SceneTuning::default();
        let mut player = Player::new(Vec2::new(640.0, 360.0), 30.0, 2.0);
        player.facing = Facing::Down;
        player.frame = 10;

        let draw = player_sprite(&player, &tuning, false);
        assert_eq!(draw.source.x, 10.0 * 255.0);
        assert_eq!(draw.source.y, 4.0 * 255.0);
        assert_eq!(draw.dest.x, 640.0 - 127.5);
        assert_eq!(draw.dest.y, 360.0 - 127.5 - 100.0);

        let still = player_sprite(&player, &tuning, true);
        assert_eq!(still.source.x, 0.0);
    }

    #[test]
    fn test_draw_order_by_depth() {
        let obstacles = [
            obstacle(1, 100.0, 600.0, (0, 0)),
            obstacle(2, 500.0, 400.0, (0, 0)),
            obstacle(3, 900.0, 500.0, (0, 0)),
        ];
        let ids: Vec<u32> = draw_order(&obstacles).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
