//! Fixed timestep simulation tick
//!
//! Advances the scene by one step. The host calls this at `SIM_DT` with the
//! latest pointer target.

use glam::Vec2;

use super::state::{MoveContext, SceneState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Where the bull should head (last pointer position)
    pub target: Option<Vec2>,
}

/// Advance the scene by one fixed timestep
pub fn tick(state: &mut SceneState, input: &TickInput) {
    state.time_ticks += 1;

    let ctx = MoveContext {
        target: input.target,
        bounds: state.tuning.player_bounds(),
        obstacles: &state.obstacles,
        resolve_order: state.tuning.resolve_order,
    };
    state.contacts = state.player.update(&ctx);

    if state.contacts > 1 {
        log::trace!(
            "tick {}: resolved {} simultaneous obstacle overlaps",
            state.time_ticks,
            state.contacts
        );
    }
}
