//! Error types for configuration and simulation

use thiserror::Error;

/// Invalid tunables or level layout, reported once at initialization.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("hits_per_life must be greater than zero")]
    HitsPerLifeZero,

    #[error("max_lives must be greater than zero")]
    MaxLivesZero,

    #[error("boss max_hp must be greater than zero")]
    BossMaxHpZero,

    #[error("boss enraged_interval ({enraged}) must be shorter than attack_interval ({attack})")]
    EnragedIntervalNotShorter { attack: u32, enraged: u32 },

    #[error("boss flash_lead ({flash_lead}) must be shorter than enraged_interval ({interval})")]
    FlashLeadTooLong { flash_lead: u32, interval: u32 },

    #[error("{what} must be a positive dimension")]
    NonPositiveDimension { what: &'static str },

    #[error("level has no platforms")]
    NoPlatforms,

    #[error("spawn zone {zone_id} has no platform within its search window")]
    NoPlatformNearZone { zone_id: u32 },

    #[error("spawn zone id {zone_id} is used more than once")]
    DuplicateZoneId { zone_id: u32 },

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Conditions that stop a frame from being simulated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("no platform available to spawn enemies for zone {zone_id}")]
    NoSpawnPlatform { zone_id: u32 },
}
