//! Game state and core simulation types
//!
//! Everything mutable about a session lives in `World`; nothing is global.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::{Aabb, Bounded};
use crate::config::{GameConfig, PlayerConfig};
use crate::consts::{CHECKPOINT_HEIGHT, CHECKPOINT_WIDTH, COLLECTIBLE_SIZE};
use crate::error::ConfigError;

/// Top-level game mode; exactly one is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, waiting for confirm
    Menu,
    /// Side-scrolling section
    Playing,
    /// Fixed-arena boss encounter
    Boss,
    Paused,
    Victory,
    GameOver,
}

/// Liveness shared by every dynamic entity so containers can be purged uniformly
pub trait Entity: Bounded {
    fn is_active(&self) -> bool;
}

/// Static level rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Platform {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl Bounded for Platform {
    fn bounds(&self) -> Aabb {
        Aabb::new(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
    /// Set by a grounded jump, consumed by the airborne one
    pub can_double_jump: bool,
    pub has_double_jumped: bool,
    /// Damage taken in the current life, `0..hits_per_life`
    pub hits: u32,
    pub lives: u32,
    pub invincible: bool,
    pub invincible_timer: u32,
    pub laser_cooldown: u32,
    pub facing: Facing,
}

impl Player {
    pub fn new(pos: Vec2, config: &PlayerConfig) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(config.width, config.height),
            on_ground: false,
            can_double_jump: false,
            has_double_jumped: false,
            hits: 0,
            lives: config.max_lives,
            invincible: false,
            invincible_timer: 0,
            laser_cooldown: 0,
            facing: Facing::Right,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Count down invincibility and laser cooldown
    pub fn tick_timers(&mut self) {
        if self.invincible {
            self.invincible_timer = self.invincible_timer.saturating_sub(1);
            if self.invincible_timer == 0 {
                self.invincible = false;
            }
        }
        self.laser_cooldown = self.laser_cooldown.saturating_sub(1);
    }

    pub fn grant_invincibility(&mut self, frames: u32) {
        if frames > 0 {
            self.invincible = true;
            self.invincible_timer = frames;
        }
    }

    /// Apply one point of damage unless invincible. Returns true if it landed.
    pub fn take_hit(&mut self, invincibility_frames: u32) -> bool {
        if self.invincible {
            return false;
        }
        self.hits += 1;
        self.grant_invincibility(invincibility_frames);
        true
    }

    /// Force the current life to end on the next life-loss check
    pub fn spend_life(&mut self, hits_per_life: u32) {
        self.hits = hits_per_life;
    }

    /// If the life is spent, reset `hits` and take away one life.
    /// Returns true exactly once per threshold crossing.
    pub fn consume_spent_life(&mut self, hits_per_life: u32) -> bool {
        if self.hits < hits_per_life {
            return false;
        }
        self.hits = 0;
        self.lives = self.lives.saturating_sub(1);
        true
    }

    /// Put the player back on its feet at `pos`
    pub fn respawn_at(&mut self, pos: Vec2, invincibility_frames: u32) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.can_double_jump = false;
        self.has_double_jumped = false;
        self.grant_invincibility(invincibility_frames);
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A patrolling ground enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Patrol bounds for the left edge, fixed at spawn
    pub left_bound: f32,
    pub right_bound: f32,
    pub alive: bool,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, size: Vec2, speed: f32, patrol_distance: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(speed, 0.0),
            size,
            left_bound: pos.x,
            right_bound: pos.x + patrol_distance,
            alive: true,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

impl Entity for Enemy {
    fn is_active(&self) -> bool {
        self.alive
    }
}

/// The arena boss; created once per session and never recreated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: u32,
    pub max_hp: u32,
    /// Frames into the current attack cycle
    pub attack_timer: u32,
    /// Remaining frames of the pre-attack tell
    pub flash_timer: u32,
    pub alive: bool,
    /// One-way switch to the shorter attack interval
    pub enraged: bool,
    /// Interval latched at the start of the current cycle
    pub cycle_interval: u32,
    /// Frames since death, drives the Victory delay
    pub defeat_timer: u32,
    /// Cosmetic vertical bob, never used for collision
    pub bob_offset: f32,
}

impl Boss {
    pub fn new(pos: Vec2, size: Vec2, max_hp: u32, attack_interval: u32) -> Self {
        Self {
            pos,
            size,
            hp: max_hp,
            max_hp,
            attack_timer: 0,
            flash_timer: 0,
            alive: true,
            enraged: false,
            cycle_interval: attack_interval,
            defeat_timer: 0,
            bob_offset: 0.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_timer > 0
    }
}

impl Bounded for Boss {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Player laser shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub active: bool,
}

impl Bounded for Projectile {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

impl Entity for Projectile {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Boss attack; velocity is fixed at launch and then bent by gravity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fireball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub active: bool,
}

impl Bounded for Fireball {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

impl Entity for Fireball {
    fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    /// Restores health in addition to scoring
    Sushi,
}

/// A pickup placed at level load; stays in its container once collected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub collected: bool,
    /// Cosmetic animation phase (radians)
    pub anim_phase: f32,
}

impl Collectible {
    pub fn new(kind: CollectibleKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            size: Vec2::splat(COLLECTIBLE_SIZE),
            collected: false,
            // Stagger so neighbouring coins don't bob in lockstep
            anim_phase: pos.x * 0.01,
        }
    }
}

impl Bounded for Collectible {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Respawn marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub pos: Vec2,
    pub size: Vec2,
    pub activated: bool,
}

impl Checkpoint {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::new(CHECKPOINT_WIDTH, CHECKPOINT_HEIGHT),
            activated: false,
        }
    }

    /// Where a player of `player_size` reappears: bottom-aligned with the marker
    pub fn respawn_point(&self, player_size: Vec2) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y + self.size.y - player_size.y)
    }
}

impl Bounded for Checkpoint {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Session-wide counters, reset on every new game
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Progress {
    pub score: u64,
    pub enemies_spawned: u32,
    pub enemies_killed: u32,
    /// Spawn zones that already fired this session
    pub triggered_zones: BTreeSet<u32>,
}

/// Something that happened this frame, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ModeChanged { from: GameMode, to: GameMode },
    CoinCollected { index: usize },
    SushiEaten { index: usize },
    EnemyStomped { id: u32 },
    EnemyShot { id: u32 },
    PlayerHit { hits: u32 },
    LifeLost { lives: u32 },
    ExtraLife { lives: u32 },
    CheckpointReached { index: usize },
    ZoneTriggered { zone_id: u32, spawned: u32 },
    LaserFired,
    FireballLaunched,
    BossHit { hp: u32 },
    BossEnraged,
    BossDefeated,
}

/// Complete session state, advanced by `tick`
#[derive(Debug, Clone)]
pub struct World {
    pub config: GameConfig,
    pub mode: GameMode,
    /// Mode to return to when unpausing, captured at pause time
    pub resume_mode: GameMode,
    /// Active-play frames simulated this session
    pub frame: u64,
    pub camera_x: f32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub boss: Boss,
    pub lasers: Vec<Projectile>,
    pub fireballs: Vec<Fireball>,
    pub collectibles: Vec<Collectible>,
    pub checkpoints: Vec<Checkpoint>,
    /// Index into `checkpoints` of the arena checkpoint
    pub boss_checkpoint: usize,
    pub respawn_point: Vec2,
    pub progress: Progress,
    /// Events recorded during the last tick
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Validate `config` and build a world sitting in the menu
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, GameMode::Menu))
    }

    fn build(config: GameConfig, mode: GameMode) -> Self {
        let level = &config.level;
        let player = Player::new(level.player_start, &config.player);
        let boss = Boss::new(
            level.boss_position,
            Vec2::new(config.boss.width, config.boss.height),
            config.boss.max_hp,
            config.boss.attack_interval,
        );

        let collectibles = level
            .coins
            .iter()
            .map(|&pos| Collectible::new(CollectibleKind::Coin, pos))
            .chain(
                level
                    .sushi
                    .iter()
                    .map(|&pos| Collectible::new(CollectibleKind::Sushi, pos)),
            )
            .collect();

        let mut checkpoints: Vec<Checkpoint> =
            level.checkpoints.iter().map(|&pos| Checkpoint::new(pos)).collect();
        checkpoints.push(Checkpoint::new(level.boss_checkpoint));
        let boss_checkpoint = checkpoints.len() - 1;

        let respawn_point = level.player_start;
        let rng = Pcg32::seed_from_u64(config.seed);

        Self {
            mode,
            resume_mode: GameMode::Playing,
            frame: 0,
            camera_x: 0.0,
            player,
            enemies: Vec::new(),
            boss,
            lasers: Vec::new(),
            fireballs: Vec::new(),
            collectibles,
            checkpoints,
            boss_checkpoint,
            respawn_point,
            progress: Progress::default(),
            events: Vec::new(),
            rng,
            next_id: 1,
            config,
        }
    }

    /// Reinitialize every mutable piece of state and enter `mode`
    pub fn reset(&mut self, mode: GameMode) {
        let config = self.config.clone();
        *self = Self::build(config, mode);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reserve `count` consecutive IDs, returning the first
    pub fn reserve_ids(&mut self, count: u32) -> u32 {
        let first = self.next_id;
        self.next_id += count;
        first
    }

    /// Switch mode and record the transition
    pub fn set_mode(&mut self, to: GameMode) {
        if self.mode != to {
            log::info!("Mode {:?} -> {:?}", self.mode, to);
            self.events.push(GameEvent::ModeChanged {
                from: self.mode,
                to,
            });
            self.mode = to;
        }
    }

    /// Read-only view for renderers and debugging tools
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            mode: self.mode,
            frame: self.frame,
            camera_x: self.camera_x,
            player: &self.player,
            enemies: &self.enemies,
            boss: &self.boss,
            lasers: &self.lasers,
            fireballs: &self.fireballs,
            collectibles: &self.collectibles,
            checkpoints: &self.checkpoints,
            platforms: &self.config.level.platforms,
            progress: &self.progress,
            events: &self.events,
        }
    }
}

/// Borrowed, serializable view of a `World`
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub mode: GameMode,
    pub frame: u64,
    pub camera_x: f32,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub boss: &'a Boss,
    pub lasers: &'a [Projectile],
    pub fireballs: &'a [Fireball],
    pub collectibles: &'a [Collectible],
    pub checkpoints: &'a [Checkpoint],
    pub platforms: &'a [Platform],
    pub progress: &'a Progress,
    pub events: &'a [GameEvent],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(Vec2::new(50.0, 0.0), &PlayerConfig::default())
    }

    #[test]
    fn test_new_world_starts_in_menu() {
        let world = World::new(GameConfig::default()).unwrap();
        assert_eq!(world.mode, GameMode::Menu);
        assert!(world.enemies.is_empty());
        assert_eq!(world.boss.hp, world.config.boss.max_hp);
        // Coins then sushi, plus the arena checkpoint last
        let level = &world.config.level;
        assert_eq!(world.collectibles.len(), level.coins.len() + level.sushi.len());
        assert_eq!(world.boss_checkpoint, level.checkpoints.len());
    }

    #[test]
    fn test_new_world_rejects_bad_config() {
        let mut config = GameConfig::default();
        config.player.hits_per_life = 0;
        assert!(World::new(config).is_err());
    }

    #[test]
    fn test_take_hit_respects_invincibility() {
        let mut p = player();
        assert!(p.take_hit(60));
        assert_eq!(p.hits, 1);
        assert!(p.invincible);

        assert!(!p.take_hit(60));
        assert_eq!(p.hits, 1);

        for _ in 0..60 {
            p.tick_timers();
        }
        assert!(!p.invincible);
        assert!(p.take_hit(60));
        assert_eq!(p.hits, 2);
    }

    #[test]
    fn test_consume_spent_life_fires_once() {
        let mut p = player();
        p.hits = 6;
        assert!(!p.consume_spent_life(7));

        p.hits = 7;
        assert!(p.consume_spent_life(7));
        assert_eq!(p.hits, 0);
        assert_eq!(p.lives, 2);
        assert!(!p.consume_spent_life(7));
        assert_eq!(p.lives, 2);
    }

    #[test]
    fn test_lives_never_underflow() {
        let mut p = player();
        p.lives = 0;
        p.spend_life(7);
        assert!(p.consume_spent_life(7));
        assert_eq!(p.lives, 0);
    }

    #[test]
    fn test_zero_invincibility_frames_leave_player_vulnerable() {
        let mut p = player();
        assert!(p.take_hit(0));
        assert!(!p.invincible);
        assert!(p.take_hit(0));
        assert_eq!(p.hits, 2);
    }

    #[test]
    fn test_checkpoint_respawn_point_is_bottom_aligned() {
        let cp = Checkpoint::new(Vec2::new(100.0, 486.0));
        let size = Vec2::new(32.0, 48.0);
        let spawn = cp.respawn_point(size);
        assert_eq!(spawn.x, 100.0);
        assert_eq!(spawn.y + size.y, cp.pos.y + cp.size.y);
    }

    #[test]
    fn test_reset_clears_progress() {
        let mut world = World::new(GameConfig::default()).unwrap();
        world.progress.score = 500;
        world.progress.triggered_zones.insert(1);
        world.next_entity_id();
        world.reset(GameMode::Playing);
        assert_eq!(world.mode, GameMode::Playing);
        assert_eq!(world.progress.score, 0);
        assert!(world.progress.triggered_zones.is_empty());
        assert_eq!(world.next_entity_id(), 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let world = World::new(GameConfig::default()).unwrap();
        let json = serde_json::to_string(&world.snapshot()).unwrap();
        assert!(json.contains("\"mode\":\"Menu\""));
    }
}
