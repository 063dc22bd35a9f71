//! Enemy population
//!
//! Buggers get a stable [`EntityId`] at spawn. Removal marks a tombstone and
//! compacts after the pass, so iteration never sees shifted indices.

use glam::Vec2;
use rand::Rng;

use super::kinematics::BuggerMotion;
use super::state::EntityId;
use crate::consts::BUGGER_SPAWN_MARGIN;
use crate::renderer::{Sprite, Surface};
use crate::tuning::Tuning;

/// A sine-wave enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Bugger {
    pub id: EntityId,
    pub pos: Vec2,
    /// Sine phase accumulator, incremented every tick
    pub phase: f32,
    pub speed: f32,
    /// Tombstone; compacted away at the end of the pass
    pub culled: bool,
}

impl Bugger {
    /// Outside the canvas horizontally
    pub fn is_offscreen(&self, canvas_width: f32) -> bool {
        self.pos.x < 0.0 || self.pos.x > canvas_width
    }
}

/// Live buggers in spawn order
#[derive(Debug, Clone)]
pub struct BuggerPool {
    buggers: Vec<Bugger>,
    next_id: u64,
}

impl Default for BuggerPool {
    fn default() -> Self {
        Self::new()
    }
}

impl BuggerPool {
    pub fn new() -> Self {
        Self {
            buggers: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.buggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buggers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bugger> {
        self.buggers.iter()
    }

    /// 64-bit ids cannot run out at one spawn per tick
    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn one bugger just beyond the right edge at a random height
    pub fn spawn(
        &mut self,
        tuning: &Tuning,
        canvas_width: f32,
        bg_height: f32,
        rng: &mut impl Rng,
    ) -> EntityId {
        let id = self.next_entity_id();
        let phase = rng.random::<f32>() * (bg_height - BUGGER_SPAWN_MARGIN * 2.0)
            + BUGGER_SPAWN_MARGIN;
        let x = canvas_width + rng.random::<f32>() * (canvas_width / 2.0) + 1.0;
        self.buggers.push(Bugger {
            id,
            pos: Vec2::new(x, phase),
            phase,
            speed: tuning.bugger_speed,
            culled: false,
        });
        id
    }

    /// Spawn until the population reaches the tuning target. Returns how many were added.
    pub fn top_up(
        &mut self,
        tuning: &Tuning,
        canvas_width: f32,
        bg_height: f32,
        rng: &mut impl Rng,
    ) -> usize {
        let missing = tuning.bugger_target_count.saturating_sub(self.buggers.len());
        for _ in 0..missing {
            self.spawn(tuning, canvas_width, bg_height, rng);
        }
        missing
    }

    /// Move every bugger, cull the ones that left the screen, draw the rest.
    /// Returns how many were culled.
    pub fn update(
        &mut self,
        tuning: &Tuning,
        canvas_width: f32,
        bg_height: f32,
        surface: &mut impl Surface,
    ) -> usize {
        let motion = BuggerMotion {
            amplitude: tuning.bugger_amplitude,
            phase_divisor: tuning.bugger_phase_divisor,
            floor: bg_height,
            floor_margin: tuning.bugger_floor_margin,
        };

        let mut culled = 0;
        for bugger in &mut self.buggers {
            bugger.advance(&motion);
            if bugger.is_offscreen(canvas_width) {
                bugger.culled = true;
                culled += 1;
                continue;
            }
            surface.draw_image(Sprite::Bugger, bugger.pos.x, bugger.pos.y);
        }

        if culled > 0 {
            self.buggers.retain(|b| !b.culled);
        }
        culled
    }

    /// Drop every bugger. Returns how many there were.
    pub fn destroy_all(&mut self) -> usize {
        let count = self.buggers.len();
        self.buggers.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const CANVAS_W: f32 = 800.0;
    const BG_H: f32 = 600.0;

    fn pool_with(count: usize) -> (BuggerPool, Tuning, Pcg32) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pool = BuggerPool::new();
        for _ in 0..count {
            pool.spawn(&tuning, CANVAS_W, BG_H, &mut rng);
        }
        (pool, tuning, rng)
    }

    #[test]
    fn test_spawn_position_ranges() {
        let (pool, _, _) = pool_with(200);
        for b in pool.iter() {
            assert!(b.pos.x > CANVAS_W && b.pos.x <= CANVAS_W * 1.5 + 1.0);
            assert!(b.phase >= 60.0 && b.phase < BG_H - 60.0);
            assert_eq!(b.pos.y, b.phase);
            assert_eq!(b.speed, 5.0);
        }
    }

    #[test]
    fn test_top_up_reaches_target() {
        let (mut pool, tuning, mut rng) = pool_with(7);
        assert_eq!(pool.top_up(&tuning, CANVAS_W, BG_H, &mut rng), 13);
        assert_eq!(pool.len(), 20);
        assert_eq!(pool.top_up(&tuning, CANVAS_W, BG_H, &mut rng), 0);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let (mut pool, tuning, mut rng) = pool_with(3);
        let first: Vec<_> = pool.iter().map(|b| b.id).collect();
        pool.destroy_all();
        pool.top_up(&tuning, CANVAS_W, BG_H, &mut rng);
        assert!(pool.iter().all(|b| !first.contains(&b.id)));
    }

    #[test]
    fn test_ids_continue_past_u32_range() {
        let (mut pool, tuning, mut rng) = pool_with(0);
        pool.next_id = u64::from(u32::MAX);
        let a = pool.spawn(&tuning, CANVAS_W, BG_H, &mut rng);
        let b = pool.spawn(&tuning, CANVAS_W, BG_H, &mut rng);
        assert_eq!(a, EntityId(u64::from(u32::MAX)));
        assert_eq!(b, EntityId(u64::from(u32::MAX) + 1));
    }

    #[test]
    fn test_spawn_past_right_edge_culled_on_first_update() {
        let (mut pool, tuning, _) = pool_with(2);
        let mut surface = RecordingSurface::new(CANVAS_W, BG_H);
        let ids: Vec<_> = pool.iter().map(|b| b.id).collect();
        pool.buggers[0].pos.x = 950.0;
        pool.buggers[1].pos.x = CANVAS_W + 4.0;

        // 945 is still right of the canvas; 799 has moved in
        assert_eq!(pool.update(&tuning, CANVAS_W, BG_H, &mut surface), 1);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.iter().next().unwrap().id, ids[1]);
        assert_eq!(surface.count(Sprite::Bugger), 1);
    }

    #[test]
    fn test_bugger_leaves_on_the_left() {
        let (mut pool, tuning, _) = pool_with(1);
        let mut surface = RecordingSurface::new(CANVAS_W, BG_H);
        pool.buggers[0].pos.x = CANVAS_W;

        let mut ticks = 0;
        while !pool.is_empty() {
            pool.update(&tuning, CANVAS_W, BG_H, &mut surface);
            ticks += 1;
            assert!(ticks < 1000);
        }
        // 800 / 5 ticks to reach zero, one more to drop below it
        assert_eq!(ticks, 161);
    }

    #[test]
    fn test_cull_removes_only_offscreen_by_identity() {
        let (mut pool, tuning, _) = pool_with(3);
        let mut surface = RecordingSurface::new(CANVAS_W, BG_H);
        let ids: Vec<_> = pool.iter().map(|b| b.id).collect();

        pool.buggers[0].pos.x = 2.0;
        pool.buggers[1].pos.x = 400.0;
        pool.buggers[2].pos.x = 3.0;

        assert_eq!(pool.update(&tuning, CANVAS_W, BG_H, &mut surface), 2);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.iter().next().unwrap().id, ids[1]);
        assert_eq!(surface.count(Sprite::Bugger), 1);
    }

    #[test]
    fn test_canvas_shrink_culls_buggers_past_new_edge() {
        let (mut pool, tuning, _) = pool_with(1);
        let mut surface = RecordingSurface::new(CANVAS_W, BG_H);
        pool.buggers[0].pos.x = 500.0;
        assert_eq!(pool.update(&tuning, CANVAS_W, BG_H, &mut surface), 0);

        assert_eq!(pool.update(&tuning, 300.0, BG_H, &mut surface), 1);
        assert!(pool.is_empty());
    }
}
