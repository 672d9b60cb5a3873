//! Drawing layer
//!
//! `sprite` holds the sheet math and is testable on native; `canvas` issues
//! the Canvas2D calls in the browser build.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod sprite;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use sprite::{SpriteDraw, SpriteRect, draw_order, obstacle_sprite, player_sprite};
