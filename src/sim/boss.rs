//! Boss encounter state machine
//!
//! Idle timing -> pre-attack flash -> fire, repeated until hp reaches 0.
//! Once at or below half health the boss enrages: every cycle started after
//! that uses the shorter interval. Enraging never reverts.

use super::state::Boss;
use crate::config::BossConfig;

/// What the boss did this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossAction {
    Idle,
    /// Pre-attack tell started
    Flash,
    /// Launch a fireball at the player's current position
    Fire,
}

/// Result of a single laser hit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BossHit {
    /// Crossed the half-health threshold on this hit
    pub enraged: bool,
    /// hp reached 0 on this hit
    pub defeated: bool,
}

impl Boss {
    /// Attack interval for a cycle starting now
    pub fn current_interval(&self, config: &BossConfig) -> u32 {
        if self.enraged {
            config.enraged_interval
        } else {
            config.attack_interval
        }
    }

    /// Advance one frame of the encounter
    pub fn update(&mut self, config: &BossConfig, frame: u64) -> BossAction {
        self.bob_offset = (frame as f32 * 0.05).sin() * 6.0;

        if !self.alive {
            // Attack timer stays frozen; only the defeat beat advances
            self.defeat_timer += 1;
            return BossAction::Idle;
        }

        self.attack_timer += 1;

        let flash_at = self.cycle_interval.saturating_sub(config.flash_lead);
        let mut action = BossAction::Idle;
        if self.attack_timer == flash_at && config.flash_duration > 0 {
            self.flash_timer = config.flash_duration;
            action = BossAction::Flash;
        } else if self.flash_timer > 0 {
            self.flash_timer -= 1;
        }

        if self.attack_timer >= self.cycle_interval && self.flash_timer == 0 {
            self.attack_timer = 0;
            self.cycle_interval = self.current_interval(config);
            return BossAction::Fire;
        }

        action
    }

    /// Apply exactly one point of laser damage
    pub fn take_hit(&mut self) -> BossHit {
        if !self.alive {
            return BossHit::default();
        }

        self.hp = self.hp.saturating_sub(1);
        let mut hit = BossHit::default();

        if !self.enraged && self.hp * 2 <= self.max_hp {
            self.enraged = true;
            hit.enraged = true;
        }

        if self.hp == 0 {
            self.alive = false;
            self.flash_timer = 0;
            hit.defeated = true;
        }

        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn boss(config: &BossConfig) -> Boss {
        Boss::new(
            Vec2::new(0.0, 0.0),
            Vec2::splat(96.0),
            config.max_hp,
            config.attack_interval,
        )
    }

    /// Frames until the next `Fire`, starting from the current state
    fn frames_to_fire(boss: &mut Boss, config: &BossConfig, frame: &mut u64) -> u32 {
        for n in 1..=1000 {
            *frame += 1;
            if boss.update(config, *frame) == BossAction::Fire {
                return n;
            }
        }
        panic!("boss never fired");
    }

    #[test]
    fn test_fires_once_per_interval() {
        let config = BossConfig::default();
        let mut b = boss(&config);
        let mut frame = 0;
        assert_eq!(frames_to_fire(&mut b, &config, &mut frame), 180);
        assert_eq!(frames_to_fire(&mut b, &config, &mut frame), 180);
    }

    #[test]
    fn test_flash_precedes_fire() {
        let config = BossConfig::default();
        let mut b = boss(&config);
        let mut flash_frame = None;
        for n in 1..=180u32 {
            match b.update(&config, n as u64) {
                BossAction::Flash => flash_frame = Some(n),
                BossAction::Fire => {
                    assert_eq!(flash_frame, Some(150));
                    assert!(!b.is_flashing());
                    return;
                }
                BossAction::Idle => {
                    if n > 150 {
                        assert!(b.is_flashing());
                    }
                }
            }
        }
        panic!("boss never fired");
    }

    #[test]
    fn test_enrage_applies_from_next_cycle() {
        let config = BossConfig::default();
        let mut b = boss(&config);
        let mut frame = 0;

        // Halfway through the first cycle, knock hp from 20 to 10
        for _ in 0..90 {
            frame += 1;
            b.update(&config, frame);
        }
        let mut enraged_hits = 0;
        for _ in 0..10 {
            if b.take_hit().enraged {
                enraged_hits += 1;
            }
        }
        assert_eq!(b.hp, 10);
        assert!(b.enraged);
        assert_eq!(enraged_hits, 1);

        // Current cycle keeps its interval
        assert_eq!(frames_to_fire(&mut b, &config, &mut frame), 90);
        // Following cycles use the shorter one
        assert_eq!(frames_to_fire(&mut b, &config, &mut frame), 120);
        assert_eq!(frames_to_fire(&mut b, &config, &mut frame), 120);
    }

    #[test]
    fn test_defeat_freezes_attacks() {
        let config = BossConfig::default();
        let mut b = boss(&config);
        for _ in 0..19 {
            assert!(!b.take_hit().defeated);
        }
        let hit = b.take_hit();
        assert!(hit.defeated);
        assert!(!b.alive);
        assert_eq!(b.hp, 0);

        let timer = b.attack_timer;
        for frame in 0..500 {
            assert_eq!(b.update(&config, frame), BossAction::Idle);
        }
        assert_eq!(b.attack_timer, timer);
        assert_eq!(b.defeat_timer, 500);

        // Further hits are ignored
        assert_eq!(b.take_hit(), BossHit::default());
        assert_eq!(b.hp, 0);
    }

    proptest! {
        #[test]
        fn hp_never_negative_and_alive_tracks_hp(max_hp in 1u32..50, hits in 0u32..100) {
            let config = BossConfig { max_hp, ..Default::default() };
            let mut b = boss(&config);
            for _ in 0..hits {
                b.take_hit();
                prop_assert_eq!(b.alive, b.hp > 0);
            }
            prop_assert_eq!(b.hp, max_hp.saturating_sub(hits));
        }
    }
}
