//! Enemy population control keyed on player progress
//!
//! Zones fire at most once per session; culling is one-way (only enemies far
//! behind the player are removed, never ones ahead).

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, Entity, GameEvent, Platform, World};
use crate::config::{EnemyConfig, SpawnZone};
use crate::error::SimError;

/// Platforms eligible to host a zone's enemies: left edge within the search window
pub fn candidate_platforms(platforms: &[Platform], zone: &SpawnZone, window: f32) -> Vec<usize> {
    platforms
        .iter()
        .enumerate()
        .filter(|(_, p)| p.x >= zone.x && p.x <= zone.x + window)
        .map(|(i, _)| i)
        .collect()
}

/// Whether the player is close enough to `zone` for it to fire
pub fn zone_reached(zone: &SpawnZone, player_x: f32, lead_distance: f32) -> bool {
    player_x >= zone.x - lead_distance
}

/// Build `zone.count` enemies on a randomly chosen candidate platform.
///
/// Enemy `i` stands on the platform top, offset by `i * spawn_spacing`.
pub fn spawn_enemies<R: Rng + ?Sized>(
    zone: &SpawnZone,
    platforms: &[Platform],
    config: &EnemyConfig,
    rng: &mut R,
    mut next_id: impl FnMut() -> u32,
) -> Result<Vec<Enemy>, SimError> {
    let candidates = candidate_platforms(platforms, zone, config.spawn_search_window);
    if candidates.is_empty() {
        return Err(SimError::NoSpawnPlatform { zone_id: zone.id });
    }
    let platform = platforms[candidates[rng.random_range(0..candidates.len())]];

    let size = Vec2::new(config.width, config.height);
    let enemies = (0..zone.count)
        .map(|i| {
            let pos = Vec2::new(
                platform.x + i as f32 * config.spawn_spacing,
                platform.y - size.y,
            );
            Enemy::new(next_id(), pos, size, config.speed, config.patrol_distance)
        })
        .collect();
    Ok(enemies)
}

/// Fire every untriggered zone the player has reached. Returns enemies spawned.
pub fn trigger_zones(world: &mut World) -> Result<u32, SimError> {
    let mut spawned_total = 0;
    let player_x = world.player.pos.x;

    for index in 0..world.config.level.spawn_zones.len() {
        let zone = world.config.level.spawn_zones[index];
        if world.progress.triggered_zones.contains(&zone.id)
            || !zone_reached(&zone, player_x, world.config.enemy.spawn_lead_distance)
        {
            continue;
        }

        let mut id = world.reserve_ids(zone.count);
        let enemies = spawn_enemies(
            &zone,
            &world.config.level.platforms,
            &world.config.enemy,
            &mut world.rng,
            || {
                let current = id;
                id += 1;
                current
            },
        )?;

        let spawned = enemies.len() as u32;
        world.enemies.extend(enemies);
        world.progress.enemies_spawned += spawned;
        world.progress.triggered_zones.insert(zone.id);
        world.events.push(GameEvent::ZoneTriggered {
            zone_id: zone.id,
            spawned,
        });
        log::info!("Zone {} triggered at x={:.0}: {} enemies", zone.id, player_x, spawned);
        spawned_total += spawned;
    }

    Ok(spawned_total)
}

/// Drop dead enemies and those left far behind the player
pub fn despawn_enemies(enemies: &mut Vec<Enemy>, player_x: f32, despawn_distance: f32) -> usize {
    let before = enemies.len();
    enemies.retain(|e| e.is_active() && e.pos.x >= player_x - despawn_distance);
    before - enemies.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::GameMode;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn zone(id: u32, x: f32, count: u32) -> SpawnZone {
        SpawnZone { id, x, count }
    }

    #[test]
    fn test_candidates_within_window() {
        let platforms = [
            Platform::new(100.0, 400.0, 100.0, 20.0),
            Platform::new(700.0, 400.0, 100.0, 20.0),
            Platform::new(1500.0, 400.0, 100.0, 20.0),
        ];
        let found = candidate_platforms(&platforms, &zone(1, 600.0, 1), 600.0);
        assert_eq!(found, vec![1]);
    }

    #[test]
    fn test_spawn_places_enemies_on_platform_top() {
        let platforms = [Platform::new(700.0, 400.0, 200.0, 20.0)];
        let config = EnemyConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut next = 10;
        let enemies = spawn_enemies(&zone(1, 600.0, 3), &platforms, &config, &mut rng, || {
            next += 1;
            next
        })
        .unwrap();

        assert_eq!(enemies.len(), 3);
        for (i, e) in enemies.iter().enumerate() {
            assert_eq!(e.pos.x, 700.0 + i as f32 * config.spawn_spacing);
            assert_eq!(e.pos.y + e.size.y, 400.0);
            assert_eq!(e.left_bound, e.pos.x);
            assert_eq!(e.right_bound, e.pos.x + config.patrol_distance);
            assert!(e.alive);
        }
        assert_eq!(enemies[0].id, 11);
        assert_eq!(enemies[2].id, 13);
    }

    #[test]
    fn test_spawn_without_platform_fails_fast() {
        let platforms = [Platform::new(0.0, 400.0, 100.0, 20.0)];
        let mut rng = Pcg32::seed_from_u64(1);
        let result = spawn_enemies(
            &zone(7, 5000.0, 2),
            &platforms,
            &EnemyConfig::default(),
            &mut rng,
            || 1,
        );
        assert_eq!(result.unwrap_err(), SimError::NoSpawnPlatform { zone_id: 7 });
    }

    #[test]
    fn test_same_seed_same_platform_choice() {
        let config = GameConfig::default();
        let platforms = &config.level.platforms;
        let z = zone(1, 2000.0, 2);
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        for _ in 0..20 {
            let ea = spawn_enemies(&z, platforms, &config.enemy, &mut a, || 0).unwrap();
            let eb = spawn_enemies(&z, platforms, &config.enemy, &mut b, || 0).unwrap();
            assert_eq!(ea[0].pos, eb[0].pos);
        }
    }

    #[test]
    fn test_zone_triggers_once() {
        let mut world = World::new(GameConfig::default()).unwrap();
        world.reset(GameMode::Playing);
        let first = world.config.level.spawn_zones[0];

        world.player.pos.x = first.x - world.config.enemy.spawn_lead_distance - 1.0;
        assert_eq!(trigger_zones(&mut world).unwrap(), 0);

        world.player.pos.x = first.x - world.config.enemy.spawn_lead_distance;
        assert_eq!(trigger_zones(&mut world).unwrap(), first.count);
        assert_eq!(world.progress.enemies_spawned, first.count);

        // Back and forth across the trigger point
        for x in [first.x - 500.0, first.x, first.x - 500.0, first.x] {
            world.player.pos.x = x;
            assert_eq!(trigger_zones(&mut world).unwrap(), 0);
        }
        assert_eq!(world.enemies.len(), first.count as usize);
        assert!(world.progress.triggered_zones.contains(&first.id));
    }

    #[test]
    fn test_spawned_ids_are_unique() {
        let mut world = World::new(GameConfig::default()).unwrap();
        world.reset(GameMode::Playing);
        world.player.pos.x = world.config.level.width;
        trigger_zones(&mut world).unwrap();

        let mut ids: Vec<u32> = world.enemies.iter().map(|e| e.id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert!(world.next_entity_id() > *ids.last().unwrap());
    }

    #[test]
    fn test_despawn_is_one_way() {
        let size = Vec2::splat(32.0);
        let mut enemies = vec![
            Enemy::new(1, Vec2::new(0.0, 0.0), size, 1.0, 10.0),
            Enemy::new(2, Vec2::new(5000.0, 0.0), size, 1.0, 10.0),
            Enemy::new(3, Vec2::new(900.0, 0.0), size, 1.0, 10.0),
        ];
        enemies[2].alive = false;

        let removed = despawn_enemies(&mut enemies, 1000.0, 800.0);
        assert_eq!(removed, 2);
        // Far ahead is kept
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].id, 2);
    }
}
