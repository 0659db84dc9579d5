//! Sushi Quest headless runner
//!
//! Plays a scripted session (menu -> level -> boss) against the deterministic
//! simulation and prints the final world snapshot as JSON.
//!
//! Usage: `sushi-quest [config.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use sushi_quest::consts::FRAMES_PER_SECOND;
    use sushi_quest::renderer::{as_bytes, build_draw_list, to_instances};
    use sushi_quest::sim::GameEvent;
    use sushi_quest::{EdgeDetector, GameConfig, GameMode, HeldControls, World, tick};

    /// Give up after five minutes of simulated play
    const MAX_FRAMES: u64 = 5 * 60 * FRAMES_PER_SECOND as u64;

    /// Stop short of the boss so lasers stay in range
    const BOSS_STANDOFF: f32 = 200.0;

    /// Held controls for this frame, chosen from what the world looks like
    fn autopilot(world: &World, n: u64) -> HeldControls {
        match world.mode {
            GameMode::Menu => HeldControls {
                confirm: true,
                ..Default::default()
            },
            GameMode::Playing => HeldControls {
                right: true,
                jump: n % 40 < 2,
                fire: n % 20 < 10,
                ..Default::default()
            },
            GameMode::Boss => {
                let gap = world.boss.pos.x - (world.player.pos.x + world.player.size.x);
                HeldControls {
                    right: gap > BOSS_STANDOFF,
                    fire: n % 16 < 8,
                    ..Default::default()
                }
            }
            GameMode::Paused | GameMode::Victory | GameMode::GameOver => HeldControls::default(),
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let config = match std::env::args().nth(1) {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        let mut world = World::new(config)?;
        let mut edges = EdgeDetector::new();

        let mut n = 0;
        while n < MAX_FRAMES && !matches!(world.mode, GameMode::Victory | GameMode::GameOver) {
            let input = edges.sample(autopilot(&world, n));
            tick(&mut world, &input)?;

            for event in &world.events {
                match event {
                    GameEvent::ModeChanged { .. } | GameEvent::BossDefeated => {
                        log::info!("[{:>6}] {:?}", n, event)
                    }
                    _ => log::debug!("[{:>6}] {:?}", n, event),
                }
            }
            n += 1;
        }

        if n == MAX_FRAMES {
            log::warn!("Stopped after {} frames in {:?}", n, world.mode);
        }
        log::info!(
            "Finished in {:?} after {} frames: score={} lives={} kills={}/{}",
            world.mode,
            n,
            world.progress.score,
            world.player.lives,
            world.progress.enemies_killed,
            world.progress.enemies_spawned
        );

        let commands = build_draw_list(&world);
        let instances = to_instances(&commands);
        log::info!(
            "Last frame: {} draw commands, {} instance bytes",
            commands.len(),
            as_bytes(&instances).len()
        );

        println!("{}", serde_json::to_string_pretty(&world.snapshot())?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sushi Quest (headless) starting...");

    if let Err(err) = headless::run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web; hosts drive `tick` directly
}
