//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly one display frame. Active-play
//! frames run in a fixed order: timers, input, physics, resolution, actor
//! updates, cross-entity contacts, life loss, spawning, purge, camera, and
//! finally mode transitions.

use glam::Vec2;

use super::aabb::Bounded;
use super::ballistics::View;
use super::boss::BossAction;
use super::camera;
use super::collision::{self, LevelBounds};
use super::spawn;
use super::state::{CollectibleKind, Entity, Fireball, GameEvent, GameMode, Projectile, World};
use crate::error::SimError;
use crate::input::FrameInput;

/// Advance the session by one frame
pub fn tick(world: &mut World, input: &FrameInput) -> Result<(), SimError> {
    world.events.clear();

    match world.mode {
        GameMode::Menu => {
            if input.confirm_pressed {
                // Fresh session: counters, zones and entities all start over
                world.reset(GameMode::Menu);
                world.set_mode(GameMode::Playing);
                update_camera(world);
            }
            Ok(())
        }
        GameMode::Paused => {
            if input.pause_pressed {
                let resume = world.resume_mode;
                world.set_mode(resume);
            }
            Ok(())
        }
        GameMode::Victory | GameMode::GameOver => {
            if input.confirm_pressed {
                let mode = world.mode;
                world.reset(mode);
                world.set_mode(GameMode::Menu);
            }
            Ok(())
        }
        GameMode::Playing | GameMode::Boss => {
            if input.pause_pressed {
                world.resume_mode = if world.player.pos.x >= world.config.level.boss_arena_x {
                    GameMode::Boss
                } else {
                    GameMode::Playing
                };
                world.set_mode(GameMode::Paused);
                return Ok(());
            }
            step_active(world, input)
        }
    }
}

fn step_active(world: &mut World, input: &FrameInput) -> Result<(), SimError> {
    world.frame += 1;
    let in_boss = world.mode == GameMode::Boss;

    world.player.tick_timers();
    handle_player_input(world, input, in_boss);
    move_player(world, in_boss);
    update_actors(world, in_boss);

    player_vs_enemies(world);
    lasers_vs_enemies(world);
    if in_boss {
        lasers_vs_boss(world);
    }
    hazards_vs_player(world, in_boss);
    collect_pickups(world);
    touch_checkpoints(world);

    if handle_life_loss(world) {
        // Game over: nothing else moves this frame
        return Ok(());
    }

    spawn::trigger_zones(world)?;
    let culled = spawn::despawn_enemies(
        &mut world.enemies,
        world.player.pos.x,
        world.config.enemy.despawn_distance,
    );
    if culled > 0 {
        log::debug!("Despawned {} enemies", culled);
    }
    world.lasers.retain(Entity::is_active);
    world.fireballs.retain(Entity::is_active);

    update_camera(world);
    check_transitions(world);
    Ok(())
}

fn handle_player_input(world: &mut World, input: &FrameInput, in_boss: bool) {
    // Ground-only mobility inside the arena
    collision::apply_player_input(&mut world.player, input, &world.config.physics, !in_boss);

    if input.fire_pressed && world.player.laser_cooldown == 0 {
        let laser = Projectile::laser(&world.player, &world.config.ballistics);
        world.lasers.push(laser);
        world.player.laser_cooldown = world.config.player.laser_cooldown_frames;
        world.events.push(GameEvent::LaserFired);
    }
}

fn move_player(world: &mut World, in_boss: bool) {
    let prev_pos = world.player.pos;
    collision::integrate(&mut world.player, world.config.physics.gravity);

    let level = &world.config.level;
    let bounds = LevelBounds {
        platforms: &level.platforms,
        pits: &level.pits,
        ground_y: level.ground_y,
        min_x: if in_boss { level.boss_arena_x } else { 0.0 },
        level_width: level.width,
        fall_limit: world.config.viewport.height + world.config.physics.pit_fall_margin,
    };
    let report = collision::resolve_player(
        &mut world.player,
        prev_pos,
        &bounds,
        world.config.player.hits_per_life,
    );
    if report.fell_out {
        log::info!("Player fell into a pit at x={:.0}", world.player.pos.x);
    }
}

fn update_actors(world: &mut World, in_boss: bool) {
    let level = &world.config.level;
    let bounds = LevelBounds {
        platforms: &level.platforms,
        pits: &level.pits,
        ground_y: level.ground_y,
        min_x: 0.0,
        level_width: level.width,
        fall_limit: f32::INFINITY,
    };
    let tolerance = world.config.enemy.support_tolerance;
    for enemy in &mut world.enemies {
        enemy.patrol(&bounds, tolerance);
    }

    if in_boss {
        match world.boss.update(&world.config.boss, world.frame) {
            BossAction::Fire => {
                let fireball = Fireball::launch(
                    world.boss.center(),
                    world.player.center(),
                    &world.config.ballistics,
                );
                world.fireballs.push(fireball);
                world.events.push(GameEvent::FireballLaunched);
            }
            BossAction::Flash => log::debug!("Boss winding up at frame {}", world.frame),
            BossAction::Idle => {}
        }
    }

    let view = View {
        left: world.camera_x,
        width: world.config.viewport.width,
        height: world.config.viewport.height,
    };
    let ballistics = &world.config.ballistics;
    for laser in &mut world.lasers {
        laser.advance(&view, ballistics.laser_view_margin);
    }
    for fireball in &mut world.fireballs {
        fireball.advance(
            world.config.physics.gravity,
            level.ground_y,
            &level.platforms,
            &view,
            ballistics,
        );
    }
}

/// Count a kill, award score, and grant a life once every spawned enemy is down
fn award_kill(world: &mut World) {
    let progress = &mut world.progress;
    progress.enemies_killed += 1;
    progress.score += world.config.scoring.enemy_kill;

    let player = &mut world.player;
    if progress.enemies_killed == progress.enemies_spawned
        && player.lives < world.config.player.max_lives
    {
        player.lives += 1;
        world.events.push(GameEvent::ExtraLife {
            lives: player.lives,
        });
        log::info!("Extra life: field cleared, lives={}", player.lives);
    }
}

fn player_vs_enemies(world: &mut World) {
    let invincibility = world.config.player.invincibility_frames;
    // Bounce once after the loop so every contact sees the same fall
    let mut stomped = false;
    for i in 0..world.enemies.len() {
        let enemy = &world.enemies[i];
        if !enemy.alive || !world.player.collides_with(enemy) {
            continue;
        }
        if collision::is_stomp(&world.player, enemy) {
            let id = enemy.id;
            world.enemies[i].alive = false;
            stomped = true;
            world.events.push(GameEvent::EnemyStomped { id });
            log::debug!("Enemy {} stomped", id);
            award_kill(world);
        } else if world.player.take_hit(invincibility) {
            world.events.push(GameEvent::PlayerHit {
                hits: world.player.hits,
            });
        }
    }
    if stomped {
        world.player.vel.y = -world.config.player.stomp_bounce;
    }
}

fn lasers_vs_enemies(world: &mut World) {
    for l in 0..world.lasers.len() {
        if !world.lasers[l].active {
            continue;
        }
        let shot = world.lasers[l].bounds();
        let Some(enemy) = world
            .enemies
            .iter_mut()
            .find(|e| e.alive && e.bounds().overlaps(&shot))
        else {
            continue;
        };
        enemy.alive = false;
        let id = enemy.id;
        world.lasers[l].active = false;
        world.events.push(GameEvent::EnemyShot { id });
        award_kill(world);
    }
}

fn lasers_vs_boss(world: &mut World) {
    let boss = &mut world.boss;
    for laser in &mut world.lasers {
        if !boss.alive {
            break;
        }
        if !laser.active || !laser.collides_with(&*boss) {
            continue;
        }
        // Spent on impact: one point of damage per shot
        laser.active = false;
        let hit = boss.take_hit();
        world.progress.score += world.config.scoring.boss_hit;
        world.events.push(GameEvent::BossHit { hp: boss.hp });
        if hit.enraged {
            log::info!("Boss enraged at hp={}", boss.hp);
            world.events.push(GameEvent::BossEnraged);
        }
        if hit.defeated {
            log::info!("Boss defeated at frame {}", world.frame);
            world.events.push(GameEvent::BossDefeated);
        }
    }
}

fn hazards_vs_player(world: &mut World, in_boss: bool) {
    let invincibility = world.config.player.invincibility_frames;
    let player = &mut world.player;

    for fireball in &mut world.fireballs {
        if !fireball.active || !fireball.collides_with(&*player) {
            continue;
        }
        fireball.active = false;
        if player.take_hit(invincibility) {
            world.events.push(GameEvent::PlayerHit { hits: player.hits });
        }
    }

    if in_boss
        && world.boss.alive
        && player.collides_with(&world.boss)
        && player.take_hit(invincibility)
    {
        world.events.push(GameEvent::PlayerHit { hits: player.hits });
    }
}

fn collect_pickups(world: &mut World) {
    let player = &mut world.player;
    let scoring = &world.config.scoring;
    for (index, item) in world.collectibles.iter_mut().enumerate() {
        if item.collected || !player.collides_with(&*item) {
            continue;
        }
        item.collected = true;
        log::debug!("Picked up {:?} #{}", item.kind, index);
        match item.kind {
            CollectibleKind::Coin => {
                world.progress.score += scoring.coin;
                world.events.push(GameEvent::CoinCollected { index });
            }
            CollectibleKind::Sushi => {
                world.progress.score += scoring.sushi;
                player.hits = 0;
                world.events.push(GameEvent::SushiEaten { index });
            }
        }
    }
}

fn touch_checkpoints(world: &mut World) {
    let player = &world.player;
    for (index, checkpoint) in world.checkpoints.iter_mut().enumerate() {
        if checkpoint.activated || !player.collides_with(&*checkpoint) {
            continue;
        }
        checkpoint.activated = true;
        world.respawn_point = checkpoint.respawn_point(player.size);
        world.events.push(GameEvent::CheckpointReached { index });
        log::info!("Checkpoint {} reached", index);
    }
}

/// Spend a life if this frame's damage used one up. Returns true on game over.
fn handle_life_loss(world: &mut World) -> bool {
    let hits_per_life = world.config.player.hits_per_life;
    if !world.player.consume_spent_life(hits_per_life) {
        return false;
    }

    let lives = world.player.lives;
    world.events.push(GameEvent::LifeLost { lives });
    log::info!("Life lost, {} remaining", lives);

    if lives == 0 {
        world.set_mode(GameMode::GameOver);
        return true;
    }

    let spawn_at = world.respawn_point;
    world
        .player
        .respawn_at(spawn_at, world.config.player.invincibility_frames);
    world.fireballs.clear();
    false
}

fn update_camera(world: &mut World) {
    let level = &world.config.level;
    world.camera_x = camera::camera_x(
        world.mode == GameMode::Boss,
        world.player.center().x,
        world.config.viewport.width,
        level.width,
        level.boss_arena_x,
    );
}

fn check_transitions(world: &mut World) {
    match world.mode {
        GameMode::Playing if world.player.pos.x >= world.config.level.boss_arena_x => {
            enter_boss_arena(world);
        }
        GameMode::Boss
            if !world.boss.alive && world.boss.defeat_timer >= world.config.boss.defeat_delay =>
        {
            let scoring = &world.config.scoring;
            let bonus = scoring.boss_defeat + scoring.life_bonus * u64::from(world.player.lives);
            world.progress.score += bonus;
            log::info!(
                "Victory! bonus={} final score={}",
                bonus,
                world.progress.score
            );
            world.set_mode(GameMode::Victory);
        }
        _ => {}
    }
}

fn enter_boss_arena(world: &mut World) {
    let index = world.boss_checkpoint;
    let checkpoint = &mut world.checkpoints[index];
    if !checkpoint.activated {
        checkpoint.activated = true;
        world.events.push(GameEvent::CheckpointReached { index });
    }
    world.respawn_point = checkpoint.respawn_point(world.player.size);
    world.set_mode(GameMode::Boss);
    update_camera(world);
}

/// Convenience for hosts: the screen-space position of a world point
pub fn to_screen(world: &World, point: Vec2) -> Vec2 {
    Vec2::new(point.x - world.camera_x, point.y)
}
