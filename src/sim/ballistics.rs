//! Laser and fireball trajectories
//!
//! Lasers fly straight with no gravity. Fireballs are aimed once at launch and
//! then arc under reduced gravity; they are never re-aimed in flight.
//! Neither type is removed here: inactive shots are purged at end of frame.

use glam::Vec2;

use super::aabb::{Aabb, Bounded};
use super::state::{Fireball, Player, Projectile};
use crate::config::BallisticsConfig;

/// Horizontal slice of the level currently on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl View {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Whether `rect` is entirely outside the view grown by `margin` on every side
    pub fn is_outside(&self, rect: &Aabb, margin: f32) -> bool {
        rect.right() < self.left - margin
            || rect.left() > self.right() + margin
            || rect.top() > self.height + margin
            || rect.bottom() < -margin
    }
}

impl Projectile {
    /// Laser leaving the player's front edge at chest height
    pub fn laser(player: &Player, config: &BallisticsConfig) -> Self {
        let size = Vec2::new(config.laser_width, config.laser_height);
        let dir = player.facing.sign();
        let center = player.center();
        let front_x = if dir > 0.0 {
            player.pos.x + player.size.x
        } else {
            player.pos.x - size.x
        };
        Self {
            pos: Vec2::new(front_x, center.y - size.y * 0.5),
            vel: Vec2::new(dir * config.laser_speed, 0.0),
            size,
            active: true,
        }
    }

    pub fn advance(&mut self, view: &View, margin: f32) {
        if !self.active {
            return;
        }
        self.pos += self.vel;
        if view.is_outside(&self.bounds(), margin) {
            self.active = false;
        }
    }
}

impl Fireball {
    /// Aim from `origin` (a center point) at `target` with a small upward bias
    pub fn launch(origin: Vec2, target: Vec2, config: &BallisticsConfig) -> Self {
        let size = Vec2::splat(config.fireball_size);
        let dir = (target - origin).normalize_or_zero();
        let vel = dir * config.fireball_speed - Vec2::new(0.0, config.fireball_upward_bias);
        Self {
            pos: origin - size * 0.5,
            vel,
            size,
            active: true,
        }
    }

    /// Integrate one frame and deactivate on ground, platform, or leaving view
    pub fn advance<B: Bounded>(
        &mut self,
        gravity: f32,
        ground_y: f32,
        platforms: &[B],
        view: &View,
        config: &BallisticsConfig,
    ) {
        if !self.active {
            return;
        }
        self.vel.y += gravity * config.fireball_gravity_scale;
        self.pos += self.vel;

        let bounds = self.bounds();
        if bounds.bottom() >= ground_y
            || platforms.iter().any(|p| bounds.overlaps(&p.bounds()))
            || view.is_outside(&bounds, config.fireball_view_margin)
        {
            self.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;
    use crate::sim::state::{Facing, Platform};

    fn view() -> View {
        View {
            left: 0.0,
            width: 800.0,
            height: 600.0,
        }
    }

    #[test]
    fn test_laser_follows_facing() {
        let config = BallisticsConfig::default();
        let mut player = Player::new(Vec2::new(100.0, 500.0), &PlayerConfig::default());

        let right = Projectile::laser(&player, &config);
        assert!(right.vel.x > 0.0);
        assert_eq!(right.vel.y, 0.0);
        assert!(right.pos.x >= player.pos.x + player.size.x);

        player.facing = Facing::Left;
        let left = Projectile::laser(&player, &config);
        assert!(left.vel.x < 0.0);
        assert!(left.pos.x + left.size.x <= player.pos.x);
    }

    #[test]
    fn test_laser_flies_straight_and_expires_off_view() {
        let config = BallisticsConfig::default();
        let player = Player::new(Vec2::new(700.0, 500.0), &PlayerConfig::default());
        let mut laser = Projectile::laser(&player, &config);
        let y = laser.pos.y;
        let mut frames = 0;
        while laser.active {
            laser.advance(&view(), config.laser_view_margin);
            assert_eq!(laser.pos.y, y);
            frames += 1;
            assert!(frames < 100);
        }
        assert!(laser.pos.x > 800.0 + config.laser_view_margin);
    }

    #[test]
    fn test_fireball_aimed_down_left_moves_left() {
        let config = BallisticsConfig::default();
        let origin = Vec2::new(500.0, 300.0);
        let target = Vec2::new(300.0, 520.0);
        let fb = Fireball::launch(origin, target, &config);
        assert!(fb.vel.x < 0.0);
        // Centered on the origin
        assert_eq!(fb.pos + fb.size * 0.5, origin);
    }

    #[test]
    fn test_fireball_has_upward_bias() {
        let config = BallisticsConfig::default();
        // Level shot: only the bias moves it vertically
        let fb = Fireball::launch(Vec2::new(500.0, 300.0), Vec2::new(100.0, 300.0), &config);
        assert_eq!(fb.vel.y, -config.fireball_upward_bias);
        assert_eq!(fb.vel.x, -config.fireball_speed);
    }

    #[test]
    fn test_fireball_arcs_and_lands() {
        let config = BallisticsConfig::default();
        let mut fb = Fireball::launch(Vec2::new(600.0, 300.0), Vec2::new(300.0, 300.0), &config);
        let platforms: [Platform; 0] = [];
        let mut peak = fb.pos.y;
        let mut frames = 0;
        while fb.active {
            fb.advance(0.5, 550.0, &platforms, &view(), &config);
            peak = peak.min(fb.pos.y);
            frames += 1;
            assert!(frames < 500);
        }
        // Rose first, then came down to the ground
        assert!(peak < 290.0);
        assert!(fb.pos.y + fb.size.y >= 550.0);
    }

    #[test]
    fn test_fireball_stops_on_platform() {
        let config = BallisticsConfig::default();
        let platforms = [Platform::new(380.0, 200.0, 100.0, 200.0)];
        let mut fb = Fireball::launch(Vec2::new(600.0, 300.0), Vec2::new(300.0, 300.0), &config);
        while fb.active {
            fb.advance(0.5, 550.0, &platforms, &view(), &config);
        }
        assert!(fb.bounds().overlaps(&platforms[0].bounds()));
    }

    #[test]
    fn test_fireball_expires_far_off_view() {
        let config = BallisticsConfig::default();
        let mut fb = Fireball::launch(Vec2::new(100.0, 100.0), Vec2::new(-500.0, 100.0), &config);
        fb.vel = Vec2::new(-50.0, -20.0);
        let platforms: [Platform; 0] = [];
        for _ in 0..20 {
            fb.advance(0.0, 550.0, &platforms, &view(), &config);
        }
        assert!(!fb.active);
    }
}
