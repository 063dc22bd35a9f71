//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - One tick per frame, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (spawn order, stable entity IDs)
//! - Drawing only through the `Surface` trait, never a platform API

pub mod buggers;
pub mod input;
pub mod kinematics;
pub mod particles;
pub mod shots;
pub mod state;
pub mod tick;

pub use buggers::{Bugger, BuggerPool};
pub use input::{Action, ActionSet, InputFrame, InputState, apply_actions};
pub use kinematics::BuggerMotion;
pub use particles::{ExplosionSpec, Particle, ParticleEngine};
pub use shots::{Shot, ShotQueue};
pub use state::{Background, BackgroundLayer, EntityId, Player, SimulationState, Weapon};
pub use tick::tick;
