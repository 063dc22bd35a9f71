//! Per-entity position updates
//!
//! None of these clamp against the screen; callers guard bounds where needed.

use std::f32::consts::PI;

use super::buggers::Bugger;
use super::shots::Shot;
use super::state::{Background, Player};

impl Background {
    /// Scroll both layers left by `speed`, wrapping a layer that has fully left the screen
    pub fn scroll(&mut self, speed: f32) {
        for layer in &mut self.layers {
            let width = layer.size.x;
            layer.pos_x = if layer.pos_x <= -width {
                // Overlap by 2 * speed so no seam shows between the layers
                width - speed * 2.0
            } else {
                layer.pos_x - speed
            };
        }
    }
}

impl Player {
    pub fn move_up(&mut self) {
        self.pos.y -= self.speed;
    }

    pub fn move_down(&mut self) {
        self.pos.y += self.speed;
    }

    pub fn move_left(&mut self) {
        self.pos.x -= self.speed;
    }

    pub fn move_right(&mut self) {
        self.pos.x += self.speed;
    }
}

impl Shot {
    /// Shots always travel at the gun's current speed, not the speed at firing time
    pub fn advance(&mut self, weapon_speed: f32) {
        self.pos.x += weapon_speed;
    }
}

/// Shape of the bugger wave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuggerMotion {
    pub amplitude: f32,
    pub phase_divisor: f32,
    /// Lowest allowed `y` is `floor - floor_margin`
    pub floor: f32,
    pub floor_margin: f32,
}

impl Bugger {
    /// Drift left and bob on a sine wave whose phase advances every tick
    pub fn advance(&mut self, motion: &BuggerMotion) {
        self.pos.x -= self.speed;
        self.pos.y -= motion.amplitude * (self.phase * PI / motion.phase_divisor).sin();
        self.phase += 1.0;

        // Sequential bounds: the floor may sit above zero before the background loads
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
        }
        let lowest = motion.floor - motion.floor_margin;
        if self.pos.y > lowest {
            self.pos.y = lowest;
        }
    }
}
