//! Player physics and collision resolution against static level geometry
//!
//! Discrete per-frame AABB checks only: a fast enough body can tunnel through
//! thin geometry. Platform overlaps are resolved one by one in container order,
//! so adjacent platforms can produce order-dependent corrections.

use glam::Vec2;

use super::aabb::{Aabb, Bounded};
use super::state::{Enemy, Facing, Platform, Player};
use crate::config::{PhysicsConfig, Pit};
use crate::input::FrameInput;

/// How an overlapping platform is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformContact {
    /// Falling onto the top surface
    Landing,
    /// Rising into the bottom surface
    Underside,
    /// Everything else, pushed out along x
    Side,
}

/// Static geometry the resolver needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct LevelBounds<'a> {
    pub platforms: &'a [Platform],
    pub pits: &'a [Pit],
    pub ground_y: f32,
    /// Leftmost x the player may occupy (arena edge during the boss fight)
    pub min_x: f32,
    pub level_width: f32,
    /// Player top below this means they fell into a pit
    pub fall_limit: f32,
}

impl LevelBounds<'_> {
    /// Whether the ground plane exists under `x`
    pub fn has_ground_at(&self, x: f32) -> bool {
        !self.pits.iter().any(|pit| pit.contains(x))
    }
}

/// Outcome of resolving the player for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveReport {
    pub landed: bool,
    pub clamped: bool,
    pub fell_out: bool,
}

/// Translate held/pressed intents into velocity. Returns true if a jump started.
///
/// Horizontal motion is velocity-set (no acceleration or friction).
pub fn apply_player_input(
    player: &mut Player,
    input: &FrameInput,
    physics: &PhysicsConfig,
    jump_allowed: bool,
) -> bool {
    let dir = input.horizontal();
    player.vel.x = dir * physics.move_speed;
    if dir < 0.0 {
        player.facing = Facing::Left;
    } else if dir > 0.0 {
        player.facing = Facing::Right;
    }

    if !jump_allowed || !input.jump_pressed {
        return false;
    }

    if player.on_ground {
        player.vel.y = -physics.jump_impulse;
        player.on_ground = false;
        player.can_double_jump = true;
        player.has_double_jumped = false;
        true
    } else if player.can_double_jump && !player.has_double_jumped {
        player.vel.y = -physics.double_jump_impulse;
        player.can_double_jump = false;
        player.has_double_jumped = true;
        true
    } else {
        false
    }
}

/// Euler step: gravity always applies, then position follows velocity
pub fn integrate(player: &mut Player, gravity: f32) {
    player.vel.y += gravity;
    player.pos += player.vel;
}

/// Which way an overlapping platform pushes the player.
///
/// Precedence is landing, then underside, then side. A rising player whose
/// lower edge is not below the platform's underside gets a side push.
pub fn classify_platform_contact(player: &Aabb, vel_y: f32, platform: &Aabb) -> PlatformContact {
    if vel_y > 0.0 && player.top() < platform.top() {
        PlatformContact::Landing
    } else if vel_y < 0.0 && player.bottom() > platform.bottom() {
        PlatformContact::Underside
    } else {
        PlatformContact::Side
    }
}

fn land(player: &mut Player, surface_y: f32) {
    player.pos.y = surface_y - player.size.y;
    player.vel.y = 0.0;
    player.on_ground = true;
    player.can_double_jump = false;
    player.has_double_jumped = false;
}

/// Snap onto the ground plane unless over a pit. Returns true on landing.
///
/// `prev_bottom` is the player's lower edge before this frame's move; a player
/// already below ground level (inside a pit) is kept between the pit walls instead.
pub fn resolve_ground(player: &mut Player, prev_bottom: f32, level: &LevelBounds) -> bool {
    let center_x = player.center().x;
    let bottom = player.pos.y + player.size.y;

    if level.has_ground_at(center_x) {
        if bottom >= level.ground_y && prev_bottom <= level.ground_y {
            land(player, level.ground_y);
            return true;
        }
        player.on_ground = false;
        return false;
    }

    player.on_ground = false;
    contain_in_pit(player, center_x, level);
    false
}

/// Below ground level the walls of the pit under `pit_x` are solid
fn contain_in_pit(player: &mut Player, pit_x: f32, level: &LevelBounds) {
    if player.pos.y + player.size.y <= level.ground_y {
        return;
    }
    if let Some(pit) = level.pits.iter().find(|pit| pit.contains(pit_x)) {
        let max_x = (pit.end - player.size.x).max(pit.start);
        player.pos.x = player.pos.x.clamp(pit.start, max_x);
    }
}

/// Push the player out of every overlapping platform, in container order.
/// Returns true if any platform was landed on.
pub fn resolve_platforms(player: &mut Player, platforms: &[Platform]) -> bool {
    let mut landed = false;
    for platform in platforms {
        let rect = platform.bounds();
        let bounds = player.bounds();
        if !bounds.overlaps(&rect) {
            continue;
        }
        match classify_platform_contact(&bounds, player.vel.y, &rect) {
            PlatformContact::Landing => {
                land(player, rect.top());
                landed = true;
            }
            PlatformContact::Underside => {
                player.pos.y = rect.bottom();
                player.vel.y = 0.0;
            }
            PlatformContact::Side => {
                if player.vel.x > 0.0 {
                    player.pos.x = rect.left() - player.size.x;
                } else if player.vel.x < 0.0 {
                    player.pos.x = rect.right();
                }
            }
        }
    }
    landed
}

/// Keep the player inside `[min_x, level_width - width]`. Returns true if moved.
pub fn clamp_horizontal(player: &mut Player, min_x: f32, level_width: f32) -> bool {
    let max_x = (level_width - player.size.x).max(min_x);
    let clamped = player.pos.x.clamp(min_x, max_x);
    let moved = clamped != player.pos.x;
    player.pos.x = clamped;
    moved
}

/// Full per-frame resolution: ground, platforms, horizontal clamp, pit check.
///
/// A pit fall does not remove the life here; it marks the life as spent so
/// the regular life-loss check handles it.
pub fn resolve_player(
    player: &mut Player,
    prev_pos: Vec2,
    level: &LevelBounds,
    hits_per_life: u32,
) -> ResolveReport {
    let prev_bottom = prev_pos.y + player.size.y;
    let on_ground = resolve_ground(player, prev_bottom, level);
    let on_platform = resolve_platforms(player, level.platforms);
    if prev_bottom > level.ground_y {
        // A side push must not carry a player out through a pit wall
        contain_in_pit(player, prev_pos.x + player.size.x * 0.5, level);
    }
    let clamped = clamp_horizontal(player, level.min_x, level.level_width);

    let fell_out = player.pos.y > level.fall_limit;
    if fell_out {
        player.spend_life(hits_per_life);
    }

    ResolveReport {
        landed: on_ground || on_platform,
        clamped,
        fell_out,
    }
}

/// A stomp needs the player falling with their top edge above the enemy's midline
pub fn is_stomp(player: &Player, enemy: &Enemy) -> bool {
    player.vel.y > 0.0 && player.pos.y < enemy.center().y
}

/// Whether a body whose lower edge is at `bottom` stands on something at `x`
pub fn is_supported(x: f32, bottom: f32, level: &LevelBounds, tolerance: f32) -> bool {
    let on_ground = (bottom - level.ground_y).abs() <= tolerance && level.has_ground_at(x);
    on_ground
        || level.platforms.iter().any(|p| {
            let rect = p.bounds();
            rect.spans_x(x) && (bottom - rect.top()).abs() <= tolerance
        })
}
