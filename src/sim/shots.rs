//! Player projectiles
//!
//! Shots are created in firing order and all move at the same speed, so the
//! front of the queue is always the oldest and furthest-right shot. Pruning
//! only ever pops from the front.

use std::collections::VecDeque;

use glam::Vec2;

use super::state::Player;
use crate::consts::{SHOT_OFFSET_X, SHOT_OFFSET_Y};
use crate::renderer::{Sprite, Surface};

/// A single projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub pos: Vec2,
}

/// Live shots, oldest first
#[derive(Debug, Clone, Default)]
pub struct ShotQueue {
    shots: VecDeque<Shot>,
}

impl ShotQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shot> {
        self.shots.iter()
    }

    /// Newest shot, if any
    pub fn last(&self) -> Option<&Shot> {
        self.shots.back()
    }

    /// Spawn a shot at the ship's nose unless the previous one is still too close.
    pub fn try_fire(&mut self, player: &Player) -> bool {
        let clearance = player.pos.x + player.size.x + player.weapon.spacing;
        if self.last().is_some_and(|last| last.pos.x < clearance) {
            return false;
        }

        self.shots.push_back(Shot {
            pos: Vec2::new(
                player.pos.x + player.size.x / 2.0 + SHOT_OFFSET_X,
                player.pos.y + SHOT_OFFSET_Y,
            ),
        });
        true
    }

    /// Advance and draw every shot, then drop the ones past the right edge
    pub fn update(&mut self, weapon_speed: f32, canvas_width: f32, surface: &mut impl Surface) {
        for shot in &mut self.shots {
            shot.advance(weapon_speed);
            surface.draw_image(Sprite::Shot, shot.pos.x, shot.pos.y);
        }
        while self.shots.front().is_some_and(|s| s.pos.x > canvas_width) {
            self.shots.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn player() -> Player {
        let mut player = Player::new(&Tuning::default());
        player.pos = Vec2::new(100.0, 200.0);
        player
    }

    #[test]
    fn test_shot_spawns_at_nose() {
        let mut shots = ShotQueue::new();
        assert!(shots.try_fire(&player()));
        // x = 100 + 64 / 2 + 10, y = 200 - 7
        assert_eq!(shots.last().unwrap().pos, Vec2::new(142.0, 193.0));
    }

    #[test]
    fn test_second_fire_same_tick_rejected() {
        let mut shots = ShotQueue::new();
        let player = player();
        assert!(shots.try_fire(&player));
        assert!(!shots.try_fire(&player));
        assert_eq!(shots.len(), 1);
    }

    #[test]
    fn test_fire_allowed_once_last_shot_clears_nose() {
        let mut shots = ShotQueue::new();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let player = player();
        shots.try_fire(&player);

        // Clearance is 100 + 64 + 1 = 165; shot starts at 142 and moves 10 per tick
        for _ in 0..2 {
            shots.update(10.0, 800.0, &mut surface);
            assert!(!shots.try_fire(&player));
        }
        shots.update(10.0, 800.0, &mut surface);
        assert!(shots.try_fire(&player));
        assert_eq!(shots.len(), 2);
    }

    #[test]
    fn test_offscreen_shots_pruned_from_front() {
        let mut shots = ShotQueue::new();
        let mut surface = RecordingSurface::new(200.0, 600.0);
        let player = player();
        shots.try_fire(&player);

        let mut ticks = 0;
        while !shots.is_empty() {
            shots.update(10.0, 200.0, &mut surface);
            ticks += 1;
        }
        // 142 -> 202 takes 6 ticks
        assert_eq!(ticks, 6);
    }

    #[test]
    fn test_shots_track_current_weapon_speed() {
        let mut shots = ShotQueue::new();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        shots.try_fire(&player());
        shots.update(10.0, 800.0, &mut surface);
        shots.update(25.0, 800.0, &mut surface);
        assert_eq!(shots.last().unwrap().pos.x, 142.0 + 35.0);
    }

    proptest! {
        #[test]
        fn continuous_fire_respects_spacing(speed in 1.0f32..40.0, ticks in 1usize..300) {
            let mut shots = ShotQueue::new();
            let mut surface = RecordingSurface::new(800.0, 600.0);
            let mut player = player();
            player.weapon.speed = speed;

            for _ in 0..ticks {
                shots.update(speed, 800.0, &mut surface);
                shots.try_fire(&player);
            }

            let gap = player.size.x / 2.0 + player.weapon.spacing - SHOT_OFFSET_X;
            let xs: Vec<f32> = shots.iter().map(|s| s.pos.x).collect();
            for pair in xs.windows(2) {
                prop_assert!(pair[0] - pair[1] >= gap - 0.05);
            }
            let start = player.pos.x + player.size.x / 2.0 + SHOT_OFFSET_X;
            let bound = ((800.0 - start) / gap).floor() as usize + 2;
            prop_assert!(shots.len() <= bound);
        }
    }
}
