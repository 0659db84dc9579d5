//! Ordered draw list built from a read-only `World`
//!
//! Layering is explicit: commands come out sorted by `DrawLayer`, and the
//! renderer draws them in that order. Building a list never mutates the world.

use glam::Vec2;
use serde::Serialize;

use super::instance::{DrawInstance, colors};
use crate::sim::{Aabb, Bounded, CollectibleKind, GameMode, World, to_screen};

/// Back-to-front draw layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DrawLayer {
    Background = 0,
    Level = 1,
    Pickups = 2,
    Actors = 3,
    Projectiles = 4,
    Player = 5,
    Hud = 6,
    Overlay = 7,
}

/// What to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DrawKind {
    Sky,
    Ground,
    Platform,
    Checkpoint { activated: bool },
    Coin,
    Sushi,
    Enemy,
    Boss { flashing: bool },
    Laser,
    Fireball,
    Player { blinking: bool },
    Score(u64),
    Lives(u32),
    /// Damage taken in the current life
    Health { hits: u32, hits_per_life: u32 },
    BossHealth { hp: u32, max_hp: u32 },
    /// Full-screen dimmer behind a banner
    Dim,
    Banner(GameMode),
}

impl DrawKind {
    /// Stable numeric id for the shader
    pub fn code(&self) -> u32 {
        match self {
            DrawKind::Sky => 0,
            DrawKind::Ground => 1,
            DrawKind::Platform => 2,
            DrawKind::Checkpoint { .. } => 3,
            DrawKind::Coin => 4,
            DrawKind::Sushi => 5,
            DrawKind::Enemy => 6,
            DrawKind::Boss { .. } => 7,
            DrawKind::Laser => 8,
            DrawKind::Fireball => 9,
            DrawKind::Player { .. } => 10,
            DrawKind::Score(_) => 11,
            DrawKind::Lives(_) => 12,
            DrawKind::Health { .. } => 13,
            DrawKind::BossHealth { .. } => 14,
            DrawKind::Dim => 15,
            DrawKind::Banner(_) => 16,
        }
    }

    fn param(&self) -> u32 {
        match *self {
            DrawKind::Checkpoint { activated } => u32::from(activated),
            DrawKind::Boss { flashing } => u32::from(flashing),
            DrawKind::Player { blinking } => u32::from(blinking),
            DrawKind::Score(score) => u32::try_from(score).unwrap_or(u32::MAX),
            DrawKind::Lives(lives) => lives,
            DrawKind::Health { hits, .. } => hits,
            DrawKind::BossHealth { hp, .. } => hp,
            DrawKind::Banner(mode) => mode as u32,
            _ => 0,
        }
    }
}

/// A single screen-space draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawCommand {
    pub layer: DrawLayer,
    pub kind: DrawKind,
    /// Screen-space rectangle
    pub rect: Aabb,
    pub color: [f32; 4],
}

impl DrawCommand {
    pub fn to_instance(&self) -> DrawInstance {
        DrawInstance::new(
            [self.rect.pos.x, self.rect.pos.y, self.rect.size.x, self.rect.size.y],
            self.color,
            self.layer as u32,
            self.kind.code(),
            self.kind.param(),
        )
    }
}

/// Collects commands and drops anything entirely off screen
struct DrawList {
    commands: Vec<DrawCommand>,
    screen: Aabb,
}

impl DrawList {
    fn push(&mut self, layer: DrawLayer, kind: DrawKind, rect: Aabb, color: [f32; 4]) {
        if rect.overlaps(&self.screen) {
            self.commands.push(DrawCommand {
                layer,
                kind,
                rect,
                color,
            });
        }
    }

    /// Push a world-space rectangle, shifted by the camera
    fn push_world(
        &mut self,
        world: &World,
        layer: DrawLayer,
        kind: DrawKind,
        rect: Aabb,
        color: [f32; 4],
    ) {
        let screen = Aabb::new(to_screen(world, rect.pos), rect.size);
        self.push(layer, kind, screen, color);
    }
}

const HUD_MARGIN: f32 = 16.0;
const HUD_ROW: f32 = 24.0;

/// Build the full back-to-front draw list for the current frame
pub fn build_draw_list(world: &World) -> Vec<DrawCommand> {
    let viewport = Vec2::new(world.config.viewport.width, world.config.viewport.height);
    let full_screen = Aabb::new(Vec2::ZERO, viewport);
    let mut list = DrawList {
        commands: Vec::new(),
        screen: full_screen,
    };

    list.push(DrawLayer::Background, DrawKind::Sky, full_screen, colors::SKY);

    if world.mode == GameMode::Menu {
        list.push(DrawLayer::Overlay, DrawKind::Banner(GameMode::Menu), full_screen, colors::HUD);
        return list.commands;
    }

    draw_level(world, &mut list);
    draw_entities(world, &mut list);
    draw_hud(world, &mut list, viewport);

    if matches!(
        world.mode,
        GameMode::Paused | GameMode::Victory | GameMode::GameOver
    ) {
        list.push(DrawLayer::Overlay, DrawKind::Dim, full_screen, colors::DIM);
        list.push(DrawLayer::Overlay, DrawKind::Banner(world.mode), full_screen, colors::HUD);
    }

    // Stable: keeps emission order within a layer
    list.commands.sort_by_key(|c| c.layer);
    list.commands
}

/// Convert a whole list for upload
pub fn to_instances(commands: &[DrawCommand]) -> Vec<DrawInstance> {
    commands.iter().map(DrawCommand::to_instance).collect()
}

fn draw_level(world: &World, list: &mut DrawList) {
    let level = &world.config.level;
    let depth = world.config.viewport.height - level.ground_y;

    // Ground plane, split around the pits
    let mut gaps: Vec<(f32, f32)> = level.pits.iter().map(|p| (p.start, p.end)).collect();
    gaps.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut start = 0.0f32;
    for (gap_start, gap_end) in gaps.into_iter().chain([(level.width, level.width)]) {
        if gap_start > start {
            let rect = Aabb::new(
                Vec2::new(start, level.ground_y),
                Vec2::new(gap_start - start, depth),
            );
            list.push_world(world, DrawLayer::Level, DrawKind::Ground, rect, colors::GROUND);
        }
        start = start.max(gap_end);
    }

    for platform in &level.platforms {
        list.push_world(
            world,
            DrawLayer::Level,
            DrawKind::Platform,
            platform.bounds(),
            colors::PLATFORM,
        );
    }

    for checkpoint in &world.checkpoints {
        let color = if checkpoint.activated {
            colors::CHECKPOINT_ACTIVE
        } else {
            colors::CHECKPOINT
        };
        let kind = DrawKind::Checkpoint {
            activated: checkpoint.activated,
        };
        list.push_world(world, DrawLayer::Level, kind, checkpoint.bounds(), color);
    }
}

fn draw_entities(world: &World, list: &mut DrawList) {
    let t = world.frame as f32;

    for item in world.collectibles.iter().filter(|c| !c.collected) {
        let bob = (t * 0.1 + item.anim_phase).sin() * 3.0;
        let rect = item.bounds().translated(Vec2::new(0.0, bob));
        let (kind, color) = match item.kind {
            CollectibleKind::Coin => (DrawKind::Coin, colors::COIN),
            CollectibleKind::Sushi => (DrawKind::Sushi, colors::SUSHI),
        };
        list.push_world(world, DrawLayer::Pickups, kind, rect, color);
    }

    for enemy in world.enemies.iter().filter(|e| e.alive) {
        list.push_world(world, DrawLayer::Actors, DrawKind::Enemy, enemy.bounds(), colors::ENEMY);
    }

    let boss = &world.boss;
    if boss.alive {
        let flashing = boss.is_flashing();
        let color = if flashing { colors::BOSS_FLASH } else { colors::BOSS };
        let rect = boss.bounds().translated(Vec2::new(0.0, boss.bob_offset));
        list.push_world(world, DrawLayer::Actors, DrawKind::Boss { flashing }, rect, color);
    }

    for laser in &world.lasers {
        list.push_world(
            world,
            DrawLayer::Projectiles,
            DrawKind::Laser,
            laser.bounds(),
            colors::LASER,
        );
    }
    for fireball in &world.fireballs {
        list.push_world(
            world,
            DrawLayer::Projectiles,
            DrawKind::Fireball,
            fireball.bounds(),
            colors::FIREBALL,
        );
    }

    let player = &world.player;
    // Blink at 7.5 Hz while invincible
    let blinking = player.invincible && (player.invincible_timer / 4) % 2 == 1;
    let mut color = colors::PLAYER;
    if blinking {
        color[3] = 0.3;
    }
    let kind = DrawKind::Player { blinking };
    list.push_world(world, DrawLayer::Player, kind, player.bounds(), color);
}

fn draw_hud(world: &World, list: &mut DrawList, viewport: Vec2) {
    let row = |n: f32| {
        Aabb::new(
            Vec2::new(HUD_MARGIN, HUD_MARGIN + n * HUD_ROW),
            Vec2::new(200.0, HUD_ROW),
        )
    };
    let player = &world.player;
    let hits_per_life = world.config.player.hits_per_life;

    list.push(DrawLayer::Hud, DrawKind::Score(world.progress.score), row(0.0), colors::HUD);
    list.push(DrawLayer::Hud, DrawKind::Lives(player.lives), row(1.0), colors::HUD);
    let health_color = if player.hits + 1 >= hits_per_life {
        colors::HUD_DANGER
    } else {
        colors::HUD
    };
    let health = DrawKind::Health {
        hits: player.hits,
        hits_per_life,
    };
    list.push(DrawLayer::Hud, health, row(2.0), health_color);

    let in_arena = world.mode == GameMode::Boss
        || (world.mode == GameMode::Paused && world.resume_mode == GameMode::Boss);
    if in_arena && world.boss.alive {
        let width = viewport.x * 0.5;
        let rect = Aabb::new(
            Vec2::new((viewport.x - width) * 0.5, HUD_MARGIN),
            Vec2::new(width, 12.0),
        );
        let kind = DrawKind::BossHealth {
            hp: world.boss.hp,
            max_hp: world.boss.max_hp,
        };
        list.push(DrawLayer::Hud, kind, rect, colors::BOSS);
    }
}
