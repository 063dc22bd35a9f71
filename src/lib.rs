//! Bugger Blaster - A side-scrolling canvas shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collections, particles, input)
//! - `renderer`: Drawing surface contract and Canvas 2D backend
//! - `platform`: Browser glue (viewport sizing, asset loading)
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal frame rate used to convert wall-clock delays into ticks
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_START_Y: f32 = 120.0;
    pub const WEAPON_SPEED: f32 = 10.0;
    pub const WEAPON_SPACING: f32 = 1.0;
    /// Ship sprite size used until `ship.png` has decoded
    pub const SHIP_FALLBACK_SIZE: (f32, f32) = (64.0, 40.0);

    /// Shot spawn offsets relative to the ship
    pub const SHOT_OFFSET_X: f32 = 10.0;
    pub const SHOT_OFFSET_Y: f32 = -7.0;

    /// Background scroll speed (pixels per tick)
    pub const BG_SPEED_INITIAL: f32 = 10.0;
    pub const BG_SPEED_MIN: f32 = 10.0;
    pub const BG_SPEED_MAX: f32 = 30.0;
    pub const BG_SPEED_STEP: f32 = 2.0;

    /// Bugger defaults
    pub const BUGGER_TARGET_COUNT: usize = 20;
    pub const BUGGER_SPEED: f32 = 5.0;
    pub const BUGGER_AMPLITUDE: f32 = 3.0;
    pub const BUGGER_PHASE_DIVISOR: f32 = 64.0;
    /// Buggers never sink lower than this far above the background's bottom edge
    pub const BUGGER_FLOOR_MARGIN: f32 = 100.0;
    /// Spawn band (phase seed) keeps this far from the top and bottom
    pub const BUGGER_SPAWN_MARGIN: f32 = 60.0;

    /// Bomb lockout after the final explosion (1500 ms)
    pub const BOMB_COOLDOWN_TICKS: u32 = 90;

    /// Opacity numerator for particle fade (`alpha = FADE / age`)
    pub const PARTICLE_FADE: f32 = 5.0;
    /// Particles per ring index
    pub const PARTICLES_PER_RING: u32 = 10;

    /// Canvas covers this fraction of the window on each axis
    pub const VIEWPORT_FRACTION: f64 = 0.85;
}
