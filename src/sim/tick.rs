//! Per-frame simulation tick
//!
//! One call per animation frame. The step order is fixed: entities draw in
//! back-to-front order, the HUD lands on top, and input is applied last so
//! its effects show up on the next frame.

use super::input::{InputFrame, apply_actions};
use super::state::SimulationState;
use crate::renderer::hud::draw_hud;
use crate::renderer::{Sprite, Surface, draw_centered};

/// Advance the game by one frame and present it
pub fn tick(state: &mut SimulationState, input: &InputFrame, surface: &mut impl Surface) {
    surface.clear();
    state.time_ticks += 1;
    state.tick_bomb_cooldown();

    // Background
    state.background.scroll(state.bg_speed);
    for layer in &state.background.layers {
        surface.draw_image(layer.sprite, layer.pos_x, 0.0);
    }

    // Shots
    state
        .shots
        .update(state.player.weapon.speed, state.viewport.x, surface);

    // Buggers
    if state.bugger_mode {
        let canvas_width = state.viewport.x;
        let bg_height = state.background.height();
        if !state.buggers.is_empty() {
            state
                .buggers
                .update(&state.tuning, canvas_width, bg_height, surface);
        }
        if !state.player.bombing {
            state
                .buggers
                .top_up(&state.tuning, canvas_width, bg_height, &mut state.rng);
        }
    }

    draw_centered(surface, Sprite::Ship, state.player.pos, state.player.size);

    state.particles.advance_and_draw(surface);

    draw_hud(surface, state.score);

    apply_actions(state, input);

    surface.present();
}
