//! Sushi Quest - a side-scrolling platformer with a boss arena
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (physics, AI, ballistics, game modes)
//! - `config`: Data-driven tunables and level layout
//! - `input`: Per-frame input intent snapshot
//! - `renderer`: Ordered draw list consumed by an external renderer

pub mod config;
pub mod error;
pub mod input;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use error::{ConfigError, SimError};
pub use input::{EdgeDetector, FrameInput, HeldControls};
pub use sim::{GameMode, World, tick};

/// Default tunables (all distances in pixels, all times in frames at 60 Hz)
pub mod consts {
    /// Display refresh the simulation is tuned for
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Level extents
    pub const LEVEL_WIDTH: f32 = 6000.0;
    /// Top edge of the implicit ground plane
    pub const GROUND_Y: f32 = 550.0;
    /// Left edge of the fixed boss arena
    pub const BOSS_ARENA_X: f32 = 5200.0;

    /// Vertical acceleration per frame (screen y grows downward)
    pub const GRAVITY: f32 = 0.5;
    pub const MOVE_SPEED: f32 = 5.0;
    pub const JUMP_IMPULSE: f32 = 12.0;
    pub const DOUBLE_JUMP_IMPULSE: f32 = 9.0;
    /// How far below the viewport the player may fall before losing a life
    pub const PIT_FALL_MARGIN: f32 = 200.0;

    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const HITS_PER_LIFE: u32 = 7;
    pub const MAX_LIVES: u32 = 3;
    pub const INVINCIBILITY_FRAMES: u32 = 60;
    pub const STOMP_BOUNCE: f32 = 8.0;

    pub const ENEMY_WIDTH: f32 = 32.0;
    pub const ENEMY_HEIGHT: f32 = 32.0;
    pub const ENEMY_SPEED: f32 = 1.5;
    pub const ENEMY_PATROL_DISTANCE: f32 = 120.0;
    /// Vertical slack when checking whether an enemy stands on something
    pub const ENEMY_SUPPORT_TOLERANCE: f32 = 4.0;

    pub const BOSS_WIDTH: f32 = 96.0;
    pub const BOSS_HEIGHT: f32 = 96.0;
    pub const BOSS_MAX_HP: u32 = 20;
    pub const BOSS_ATTACK_INTERVAL: u32 = 180;
    /// Attack interval once the boss is at or below half health
    pub const BOSS_ENRAGED_INTERVAL: u32 = 120;
    pub const BOSS_FLASH_LEAD: u32 = 30;
    pub const BOSS_FLASH_DURATION: u32 = 30;
    /// Frames between the boss dying and the Victory screen
    pub const BOSS_DEFEAT_DELAY: u32 = 60;

    pub const LASER_SPEED: f32 = 10.0;
    pub const LASER_WIDTH: f32 = 16.0;
    pub const LASER_HEIGHT: f32 = 4.0;
    pub const LASER_COOLDOWN_FRAMES: u32 = 15;
    pub const LASER_VIEW_MARGIN: f32 = 50.0;

    pub const FIREBALL_SPEED: f32 = 6.0;
    pub const FIREBALL_UPWARD_BIAS: f32 = 3.0;
    pub const FIREBALL_SIZE: f32 = 20.0;
    /// Fireballs fall at this fraction of player gravity
    pub const FIREBALL_GRAVITY_SCALE: f32 = 0.5;
    pub const FIREBALL_VIEW_MARGIN: f32 = 200.0;

    pub const SPAWN_LEAD_DISTANCE: f32 = 400.0;
    pub const SPAWN_SEARCH_WINDOW: f32 = 600.0;
    pub const SPAWN_SPACING: f32 = 40.0;
    pub const DESPAWN_DISTANCE: f32 = 800.0;

    pub const COLLECTIBLE_SIZE: f32 = 24.0;
    pub const CHECKPOINT_WIDTH: f32 = 20.0;
    pub const CHECKPOINT_HEIGHT: f32 = 64.0;
}
