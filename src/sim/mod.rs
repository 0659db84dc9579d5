//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call per display frame)
//! - Seeded RNG only, owned by the `World`
//! - Stable iteration order (container order, IDs allocated monotonically)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod ballistics;
pub mod boss;
pub mod camera;
pub mod collision;
pub mod enemy;
pub mod spawn;
pub mod state;
pub mod tick;

pub use aabb::{Aabb, Bounded};
pub use ballistics::View;
pub use boss::{BossAction, BossHit};
pub use collision::{LevelBounds, PlatformContact, ResolveReport};
pub use state::{
    Boss, Checkpoint, Collectible, CollectibleKind, Enemy, Entity, Facing, Fireball, GameEvent,
    GameMode, Platform, Player, Progress, Projectile, Snapshot, World,
};
pub use tick::{tick, to_screen};
