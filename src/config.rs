//! Game tunables and level layout
//!
//! Supplied once at initialization and treated as immutable for the session.
//! Every section falls back to the built-in defaults, so a JSON file only needs
//! the fields it wants to change.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::state::Platform;

/// Visible window into the level
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

/// Player movement constants (per-frame units)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub move_speed: f32,
    pub jump_impulse: f32,
    pub double_jump_impulse: f32,
    pub pit_fall_margin: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            move_speed: MOVE_SPEED,
            jump_impulse: JUMP_IMPULSE,
            double_jump_impulse: DOUBLE_JUMP_IMPULSE,
            pit_fall_margin: PIT_FALL_MARGIN,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub hits_per_life: u32,
    pub max_lives: u32,
    pub invincibility_frames: u32,
    pub stomp_bounce: f32,
    pub laser_cooldown_frames: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            hits_per_life: HITS_PER_LIFE,
            max_lives: MAX_LIVES,
            invincibility_frames: INVINCIBILITY_FRAMES,
            stomp_bounce: STOMP_BOUNCE,
            laser_cooldown_frames: LASER_COOLDOWN_FRAMES,
        }
    }
}

/// Enemy size, patrol, and population control
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub patrol_distance: f32,
    pub support_tolerance: f32,
    pub spawn_lead_distance: f32,
    pub spawn_search_window: f32,
    pub spawn_spacing: f32,
    pub despawn_distance: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            speed: ENEMY_SPEED,
            patrol_distance: ENEMY_PATROL_DISTANCE,
            support_tolerance: ENEMY_SUPPORT_TOLERANCE,
            spawn_lead_distance: SPAWN_LEAD_DISTANCE,
            spawn_search_window: SPAWN_SEARCH_WINDOW,
            spawn_spacing: SPAWN_SPACING,
            despawn_distance: DESPAWN_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub width: f32,
    pub height: f32,
    pub max_hp: u32,
    pub attack_interval: u32,
    pub enraged_interval: u32,
    pub flash_lead: u32,
    pub flash_duration: u32,
    pub defeat_delay: u32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            width: BOSS_WIDTH,
            height: BOSS_HEIGHT,
            max_hp: BOSS_MAX_HP,
            attack_interval: BOSS_ATTACK_INTERVAL,
            enraged_interval: BOSS_ENRAGED_INTERVAL,
            flash_lead: BOSS_FLASH_LEAD,
            flash_duration: BOSS_FLASH_DURATION,
            defeat_delay: BOSS_DEFEAT_DELAY,
        }
    }
}

/// Laser and fireball trajectories
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallisticsConfig {
    pub laser_speed: f32,
    pub laser_width: f32,
    pub laser_height: f32,
    pub laser_view_margin: f32,
    pub fireball_speed: f32,
    pub fireball_upward_bias: f32,
    pub fireball_size: f32,
    pub fireball_gravity_scale: f32,
    pub fireball_view_margin: f32,
}

impl Default for BallisticsConfig {
    fn default() -> Self {
        Self {
            laser_speed: LASER_SPEED,
            laser_width: LASER_WIDTH,
            laser_height: LASER_HEIGHT,
            laser_view_margin: LASER_VIEW_MARGIN,
            fireball_speed: FIREBALL_SPEED,
            fireball_upward_bias: FIREBALL_UPWARD_BIAS,
            fireball_size: FIREBALL_SIZE,
            fireball_gravity_scale: FIREBALL_GRAVITY_SCALE,
            fireball_view_margin: FIREBALL_VIEW_MARGIN,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub coin: u64,
    pub sushi: u64,
    pub enemy_kill: u64,
    pub boss_hit: u64,
    pub boss_defeat: u64,
    /// Awarded per remaining life on victory
    pub life_bonus: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            coin: 10,
            sushi: 50,
            enemy_kill: 100,
            boss_hit: 25,
            boss_defeat: 1000,
            life_bonus: 500,
        }
    }
}

/// A gap in the ground plane, `[start, end)` in level x
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pit {
    pub start: f32,
    pub end: f32,
}

impl Pit {
    pub fn contains(&self, x: f32) -> bool {
        x >= self.start && x < self.end
    }
}

/// Enemy trigger: fires once when the player approaches `x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnZone {
    pub id: u32,
    pub x: f32,
    pub count: u32,
}

/// Static level content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub width: f32,
    pub ground_y: f32,
    pub boss_arena_x: f32,
    pub player_start: Vec2,
    pub boss_position: Vec2,
    pub platforms: Vec<Platform>,
    pub pits: Vec<Pit>,
    pub coins: Vec<Vec2>,
    pub sushi: Vec<Vec2>,
    pub checkpoints: Vec<Vec2>,
    pub boss_checkpoint: Vec2,
    pub spawn_zones: Vec<SpawnZone>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        let platform = |x: f32, y: f32, w: f32| Platform::new(x, y, w, 20.0);
        let checkpoint_y = GROUND_Y - CHECKPOINT_HEIGHT;
        Self {
            width: LEVEL_WIDTH,
            ground_y: GROUND_Y,
            boss_arena_x: BOSS_ARENA_X,
            player_start: Vec2::new(100.0, GROUND_Y - PLAYER_HEIGHT),
            boss_position: Vec2::new(5800.0, GROUND_Y - BOSS_HEIGHT - 14.0),
            platforms: vec![
                platform(300.0, 450.0, 160.0),
                platform(550.0, 380.0, 140.0),
                platform(800.0, 450.0, 200.0),
                platform(1150.0, 400.0, 160.0),
                platform(1400.0, 330.0, 120.0),
                platform(1650.0, 430.0, 200.0),
                platform(2000.0, 380.0, 180.0),
                platform(2300.0, 300.0, 140.0),
                platform(2550.0, 420.0, 220.0),
                platform(2900.0, 360.0, 160.0),
                platform(3200.0, 440.0, 200.0),
                platform(3500.0, 350.0, 150.0),
                platform(3800.0, 420.0, 220.0),
                platform(4150.0, 380.0, 180.0),
                platform(4500.0, 440.0, 200.0),
                platform(4800.0, 360.0, 160.0),
                // Fireball cover inside the arena, above head height
                platform(5400.0, 440.0, 120.0),
            ],
            pits: vec![
                Pit { start: 1050.0, end: 1130.0 },
                Pit { start: 2800.0, end: 2880.0 },
                Pit { start: 4380.0, end: 4460.0 },
            ],
            coins: vec![
                Vec2::new(340.0, 410.0),
                Vec2::new(380.0, 410.0),
                Vec2::new(600.0, 340.0),
                Vec2::new(880.0, 410.0),
                Vec2::new(1200.0, 360.0),
                Vec2::new(1440.0, 290.0),
                Vec2::new(2060.0, 340.0),
                Vec2::new(2340.0, 260.0),
                Vec2::new(2950.0, 320.0),
                Vec2::new(3550.0, 310.0),
                Vec2::new(4200.0, 340.0),
                Vec2::new(4850.0, 320.0),
            ],
            sushi: vec![
                Vec2::new(1700.0, 390.0),
                Vec2::new(3250.0, 400.0),
                Vec2::new(4900.0, 320.0),
            ],
            checkpoints: vec![
                Vec2::new(1800.0, checkpoint_y),
                Vec2::new(3600.0, checkpoint_y),
            ],
            boss_checkpoint: Vec2::new(BOSS_ARENA_X + 40.0, checkpoint_y),
            spawn_zones: vec![
                SpawnZone { id: 1, x: 600.0, count: 2 },
                SpawnZone { id: 2, x: 1300.0, count: 2 },
                SpawnZone { id: 3, x: 2100.0, count: 3 },
                SpawnZone { id: 4, x: 2700.0, count: 2 },
                SpawnZone { id: 5, x: 3400.0, count: 3 },
                SpawnZone { id: 6, x: 4200.0, count: 3 },
            ],
        }
    }
}

/// Complete set of named tunables for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the spawn-platform RNG
    pub seed: u64,
    pub viewport: ViewportConfig,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub boss: BossConfig,
    pub ballistics: BallisticsConfig,
    pub scoring: ScoringConfig,
    pub level: LevelConfig,
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: {} platforms, {} spawn zones, seed {}",
            config.level.platforms.len(),
            config.level.spawn_zones.len(),
            config.seed
        );
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Reading config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the contracts the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player.hits_per_life == 0 {
            return Err(ConfigError::HitsPerLifeZero);
        }
        if self.player.max_lives == 0 {
            return Err(ConfigError::MaxLivesZero);
        }
        if self.boss.max_hp == 0 {
            return Err(ConfigError::BossMaxHpZero);
        }
        let boss = &self.boss;
        if boss.enraged_interval >= boss.attack_interval {
            return Err(ConfigError::EnragedIntervalNotShorter {
                attack: boss.attack_interval,
                enraged: boss.enraged_interval,
            });
        }
        // Both cycles need room for the wind-up flash
        if boss.flash_lead >= boss.enraged_interval {
            return Err(ConfigError::FlashLeadTooLong {
                flash_lead: boss.flash_lead,
                interval: boss.enraged_interval,
            });
        }

        let dimensions = [
            ("viewport.width", self.viewport.width),
            ("viewport.height", self.viewport.height),
            ("player.width", self.player.width),
            ("player.height", self.player.height),
            ("enemy.width", self.enemy.width),
            ("enemy.height", self.enemy.height),
            ("boss.width", self.boss.width),
            ("boss.height", self.boss.height),
            ("ballistics.laser_width", self.ballistics.laser_width),
            ("ballistics.laser_height", self.ballistics.laser_height),
            ("ballistics.fireball_size", self.ballistics.fireball_size),
            ("level.width", self.level.width),
        ];
        for (what, value) in dimensions {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveDimension { what });
            }
        }

        if self.level.platforms.is_empty() {
            return Err(ConfigError::NoPlatforms);
        }

        let mut seen = std::collections::HashSet::new();
        for zone in &self.level.spawn_zones {
            if !seen.insert(zone.id) {
                return Err(ConfigError::DuplicateZoneId { zone_id: zone.id });
            }
            let window = self.enemy.spawn_search_window;
            let has_candidate = self
                .level
                .platforms
                .iter()
                .any(|p| p.x >= zone.x && p.x <= zone.x + window);
            if !has_candidate {
                return Err(ConfigError::NoPlatformNearZone { zone_id: zone.id });
            }
        }

        Ok(())
    }
}
