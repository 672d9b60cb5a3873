//! Canvas2D drawing
//!
//! Obstacles first, bull on top. The debug overlay adds translucent
//! collision circles and a line from the bull to the pointer.

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::sprite::{SpriteDraw, draw_order, obstacle_sprite, player_sprite};
use crate::Settings;
use crate::platform::PointerState;
use crate::sim::{Circle, SceneState};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    bull: HtmlImageElement,
    obstacles: HtmlImageElement,
    size: (f64, f64),
}

impl CanvasRenderer {
    pub fn new(
        canvas: &HtmlCanvasElement,
        bull: HtmlImageElement,
        obstacles: HtmlImageElement,
    ) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        // Set once instead of on every draw
        ctx.set_fill_style_str("white");
        ctx.set_stroke_style_str("white");
        ctx.set_line_width(1.0);

        Ok(Self {
            ctx,
            bull,
            obstacles,
            size: (canvas.width() as f64, canvas.height() as f64),
        })
    }

    pub fn render(&self, state: &SceneState, pointer: &PointerState, settings: &Settings) {
        self.ctx.clear_rect(0.0, 0.0, self.size.0, self.size.1);

        for obstacle in draw_order(&state.obstacles) {
            self.draw_sprite(&self.obstacles, &obstacle_sprite(obstacle, &state.tuning));
            if settings.debug_overlay {
                self.draw_hitbox(&obstacle.body);
            }
        }

        let player = &state.player;
        self.draw_sprite(
            &self.bull,
            &player_sprite(player, &state.tuning, settings.reduced_motion),
        );
        if settings.debug_overlay {
            self.draw_hitbox(&player.body);
            self.draw_line(player.pos(), pointer.position);
        }
    }

    fn draw_sprite(&self, sheet: &HtmlImageElement, sprite: &SpriteDraw) {
        let (s, d) = (&sprite.source, &sprite.dest);
        if let Err(e) = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                sheet,
                s.x as f64,
                s.y as f64,
                s.w as f64,
                s.h as f64,
                d.x as f64,
                d.y as f64,
                d.w as f64,
                d.h as f64,
            )
        {
            log::warn!("drawImage failed: {:?}", e);
        }
    }

    fn draw_hitbox(&self, circle: &Circle) {
        let ctx = &self.ctx;
        ctx.begin_path();
        let _ = ctx.arc(
            circle.center.x as f64,
            circle.center.y as f64,
            circle.radius as f64,
            0.0,
            TAU,
        );
        ctx.save();
        ctx.set_global_alpha(0.5);
        ctx.fill();
        ctx.restore();
        ctx.stroke();
    }

    fn draw_line(&self, from: Vec2, to: Vec2) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(from.x as f64, from.y as f64);
        ctx.line_to(to.x as f64, to.y as f64);
        ctx.stroke();
    }
}
