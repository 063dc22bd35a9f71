//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`SimulationState`], which the
//! frame loop owns and lends out mutably once per frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::buggers::BuggerPool;
use super::particles::{ExplosionSpec, ParticleEngine};
use super::shots::ShotQueue;
use crate::renderer::Sprite;
use crate::tuning::Tuning;

/// Stable identity for a pooled entity (never reused within a session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

/// The player's gun
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weapon {
    /// Pixels per tick for every live shot
    pub speed: f32,
    /// Extra gap past the ship's nose the last shot must clear before the next
    pub spacing: f32,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Sprite centre
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub weapon: Weapon,
    /// A bomb is in progress; blocks new bombs and bugger top-up
    pub bombing: bool,
    /// Ticks left until `bombing` clears (0 while the bomb is still arming)
    pub bomb_cooldown: u32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.ship_fallback_width, tuning.ship_fallback_height);
        Self {
            pos: Vec2::new(size.x, tuning.player_start_y),
            size,
            speed: tuning.player_speed,
            weapon: Weapon {
                speed: tuning.weapon_speed,
                spacing: tuning.weapon_spacing,
            },
            bombing: false,
            bomb_cooldown: 0,
        }
    }
}

/// One horizontally scrolling background band
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundLayer {
    pub sprite: Sprite,
    pub pos_x: f32,
    /// Natural image size; zero until the image loads
    pub size: Vec2,
}

impl BackgroundLayer {
    fn new(sprite: Sprite) -> Self {
        Self {
            sprite,
            pos_x: 0.0,
            size: Vec2::ZERO,
        }
    }
}

/// Two layers drawn side by side for a seamless loop
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    pub layers: [BackgroundLayer; 2],
    /// First layer has loaded
    pub loaded: bool,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            layers: [
                BackgroundLayer::new(Sprite::Background1),
                BackgroundLayer::new(Sprite::Background2),
            ],
            loaded: false,
        }
    }
}

impl Background {
    /// Width of the first layer, which frames the playfield
    pub fn width(&self) -> f32 {
        self.layers[0].size.x
    }

    /// Height of the first layer; buggers and the ship stay above it
    pub fn height(&self) -> f32 {
        self.layers[0].size.y
    }

    /// A layer image decoded. The first layer also parks the second right after it.
    pub fn on_layer_loaded(&mut self, sprite: Sprite, width: f32, height: f32) {
        let Some(index) = self.layers.iter().position(|l| l.sprite == sprite) else {
            return;
        };
        self.layers[index].size = Vec2::new(width, height);
        if index == 0 {
            self.layers[1].pos_x = width;
            self.loaded = true;
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Balance in effect
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Drawing surface size
    pub viewport: Vec2,
    /// Ticks run so far
    pub time_ticks: u64,
    pub background: Background,
    /// Background scroll speed (pixels per tick)
    pub bg_speed: f32,
    pub player: Player,
    pub shots: ShotQueue,
    pub buggers: BuggerPool,
    /// Visual particles
    pub particles: ParticleEngine,
    /// Buggers spawn and move only while this is on
    pub bugger_mode: bool,
    /// Displayed, never incremented
    pub score: u64,
}

impl SimulationState {
    pub fn new(tuning: Tuning, viewport: Vec2, seed: u64) -> Self {
        Self {
            player: Player::new(&tuning),
            bg_speed: tuning.bg_speed_initial,
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            time_ticks: 0,
            background: Background::default(),
            shots: ShotQueue::new(),
            buggers: BuggerPool::new(),
            particles: ParticleEngine::new(),
            bugger_mode: false,
            score: 0,
        }
    }

    /// Canvas was resized
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// A sprite finished decoding with the given natural size
    pub fn on_sprite_loaded(&mut self, sprite: Sprite, width: f32, height: f32) {
        match sprite {
            Sprite::Background1 | Sprite::Background2 => {
                self.background.on_layer_loaded(sprite, width, height)
            }
            Sprite::Ship => self.player.size = Vec2::new(width, height),
            _ => {}
        }
    }

    /// Fire one shot if spacing allows. Returns whether a shot was created.
    pub fn fire(&mut self) -> bool {
        let fired = self.shots.try_fire(&self.player);
        if !fired {
            log::debug!("Fire rejected: last shot too close to the ship");
        }
        fired
    }

    /// Detonate a screen-clearing bomb. Returns false while a bomb is in progress.
    pub fn throw_bomb(&mut self) -> bool {
        if self.player.bombing {
            log::debug!("Bomb rejected: already bombing");
            return false;
        }
        self.player.bombing = true;

        let width = self.viewport.x;
        let height = self.background.height();
        let corners = [
            Vec2::new(0.0, 0.0),
            Vec2::new(width, 0.0),
            Vec2::new(0.0, height),
            Vec2::new(width, height),
        ];
        for corner in corners {
            self.particles
                .spawn_explosion(ExplosionSpec::corner_blast(corner), &mut self.rng);
        }

        let cooldown = self.tuning.bomb_cooldown_ticks.max(1);
        let player = &mut self.player;
        self.particles.spawn_explosion_then(
            ExplosionSpec::centre_blast(Vec2::new(width / 2.0, height / 2.0)),
            &mut self.rng,
            |_| player.bomb_cooldown = cooldown,
        );

        let destroyed = self.buggers.destroy_all();
        log::info!(
            "Bomb! {} particles, {} buggers destroyed",
            self.particles.len(),
            destroyed
        );
        true
    }

    /// Count down the bomb lockout; clears `bombing` when it expires
    pub fn tick_bomb_cooldown(&mut self) {
        if self.player.bombing && self.player.bomb_cooldown > 0 {
            self.player.bomb_cooldown -= 1;
            if self.player.bomb_cooldown == 0 {
                self.player.bombing = false;
                log::debug!("Bomb ready");
            }
        }
    }

    /// Turn bugger mode on and spawn the first wave. No-op if already on.
    pub fn enable_bugger_mode(&mut self) {
        if self.bugger_mode {
            return;
        }
        self.bugger_mode = true;
        let spawned = self.buggers.top_up(
            &self.tuning,
            self.viewport.x,
            self.background.height(),
            &mut self.rng,
        );
        log::info!("Bugger mode on ({} spawned)", spawned);
    }

    /// Turn bugger mode off and drop every bugger. No-op if already off.
    pub fn disable_bugger_mode(&mut self) {
        if !self.bugger_mode {
            return;
        }
        self.bugger_mode = false;
        let destroyed = self.buggers.destroy_all();
        log::info!("Bugger mode off ({} cleared)", destroyed);
    }
}
