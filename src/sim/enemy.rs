//! Enemy patrol behavior
//!
//! Constant-speed back-and-forth between the bounds fixed at spawn, plus a
//! cheap "don't walk off a ledge" check. Not full ground-following: enemies
//! never fall.

use super::collision::{LevelBounds, is_supported};
use super::state::Enemy;

impl Enemy {
    /// Advance one frame of patrol. Dead enemies are inert.
    pub fn patrol(&mut self, level: &LevelBounds, support_tolerance: f32) {
        if !self.alive {
            return;
        }

        let bottom = self.pos.y + self.size.y;
        let was_supported = is_supported(self.center().x, bottom, level, support_tolerance);

        let prev_x = self.pos.x;
        self.pos.x += self.vel.x;

        if self.pos.x <= self.left_bound {
            self.pos.x = self.left_bound;
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x >= self.right_bound {
            self.pos.x = self.right_bound;
            self.vel.x = -self.vel.x.abs();
        }

        // Stepped off a ledge: step back and turn around. An enemy that was
        // already unsupported keeps walking so it doesn't jitter in place.
        let supported = is_supported(self.center().x, bottom, level, support_tolerance);
        if was_supported && !supported {
            let moved = self.pos.x - prev_x;
            self.pos.x = prev_x;
            if moved > 0.0 {
                self.vel.x = -self.vel.x.abs();
            } else if moved < 0.0 {
                self.vel.x = self.vel.x.abs();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Pit;
    use crate::sim::state::Platform;
    use glam::Vec2;

    const GROUND: f32 = 550.0;

    fn bounds<'a>(platforms: &'a [Platform], pits: &'a [Pit]) -> LevelBounds<'a> {
        LevelBounds {
            platforms,
            pits,
            ground_y: GROUND,
            min_x: 0.0,
            level_width: 5000.0,
            fall_limit: 800.0,
        }
    }

    fn ground_enemy(x: f32) -> Enemy {
        Enemy::new(1, Vec2::new(x, GROUND - 32.0), Vec2::splat(32.0), 2.0, 100.0)
    }

    #[test]
    fn test_patrol_reverses_at_bounds() {
        let level = bounds(&[], &[]);
        let mut enemy = ground_enemy(100.0);
        let mut max_x: f32 = 0.0;
        let mut min_x: f32 = f32::MAX;
        for _ in 0..300 {
            enemy.patrol(&level, 4.0);
            max_x = max_x.max(enemy.pos.x);
            min_x = min_x.min(enemy.pos.x);
        }
        assert_eq!(max_x, 200.0);
        assert_eq!(min_x, 100.0);
    }

    #[test]
    fn test_turns_at_platform_edge() {
        let platforms = [Platform::new(0.0, 400.0, 150.0, 20.0)];
        let level = bounds(&platforms, &[]);
        // Patrol range runs past the platform's right edge
        let mut enemy = Enemy::new(1, Vec2::new(60.0, 368.0), Vec2::splat(32.0), 2.0, 200.0);
        for _ in 0..200 {
            enemy.patrol(&level, 4.0);
            assert!(enemy.center().x <= 150.0, "walked off at x={}", enemy.pos.x);
        }
    }

    #[test]
    fn test_turns_at_pit_edge() {
        let pits = [Pit { start: 200.0, end: 300.0 }];
        let level = bounds(&[], &pits);
        let mut enemy = ground_enemy(120.0);
        for _ in 0..200 {
            enemy.patrol(&level, 4.0);
            assert!(enemy.center().x < 200.0);
        }
    }

    #[test]
    fn test_ledge_at_patrol_bound_stays_in_range() {
        // Right bound (110) and the platform edge are reached on the same step
        let platforms = [Platform::new(0.0, 400.0, 120.0, 20.0)];
        let level = bounds(&platforms, &[]);
        let mut enemy = Enemy::new(1, Vec2::new(60.0, 368.0), Vec2::splat(32.0), 10.0, 50.0);
        for _ in 0..40 {
            enemy.patrol(&level, 4.0);
            assert!(
                (enemy.left_bound..=enemy.right_bound).contains(&enemy.pos.x),
                "left patrol range at x={}",
                enemy.pos.x
            );
        }
    }

    #[test]
    fn test_unsupported_spawn_keeps_walking() {
        let level = bounds(&[], &[]);
        // Hovering above the ground with nothing underneath
        let mut enemy = Enemy::new(1, Vec2::new(100.0, 300.0), Vec2::splat(32.0), 2.0, 100.0);
        for _ in 0..10 {
            enemy.patrol(&level, 4.0);
        }
        assert_eq!(enemy.pos.x, 120.0);
    }

    #[test]
    fn test_dead_enemy_is_inert() {
        let level = bounds(&[], &[]);
        let mut enemy = ground_enemy(100.0);
        enemy.alive = false;
        enemy.patrol(&level, 4.0);
        assert_eq!(enemy.pos.x, 100.0);
    }
}
