//! Pointer tracking
//!
//! The bull chases the last stored pointer position. The position only
//! follows the mouse while a button is held; a press or release always
//! records where it happened.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// A pointer event in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Up(Vec2),
    Move(Vec2),
}

/// Latest pointer position and button state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub position: Vec2,
    pub pressed: bool,
}

impl PointerState {
    /// Pointer resting at `position` with no button held
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            pressed: false,
        }
    }

    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(pos) => {
                self.position = pos;
                self.pressed = true;
            }
            PointerEvent::Up(pos) => {
                self.position = pos;
                self.pressed = false;
            }
            PointerEvent::Move(pos) => {
                if self.pressed {
                    self.position = pos;
                }
            }
        }
    }

    /// Simulation input for the next tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            target: Some(self.position),
        }
    }
}
