use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use space_shooter::entities::*;
use space_shooter::interface::InputState;
use space_shooter::sprites::SpriteSheet;
use space_shooter::{ConfigError, EnemyHit, ShooterConfig, Simulation};

/// Always yields the same word.  `u64::MAX` makes every enemy hold fire,
/// `0` makes every enemy fire.  Only safe for ticks that don't spawn a wave.
struct FixedRng(u64);

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        self.0 as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(self.0 as u8);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

const HOLD_FIRE: u64 = u64::MAX;
const ALWAYS_FIRE: u64 = 0;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_sim(config: ShooterConfig) -> Simulation {
    Simulation::new(config, SpriteSheet::new().unwrap()).unwrap()
}

fn running_sim() -> Simulation {
    let mut sim = make_sim(ShooterConfig::default());
    sim.start_run();
    sim
}

fn enemy(sim: &Simulation, x: f32, y: f32, color: EnemyColor) -> Ship {
    Ship::enemy(x, y, color, sim.config(), sim.sprites())
}

fn idle() -> InputState {
    InputState::default()
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[test]
fn starts_on_title_screen() {
    let mut sim = make_sim(ShooterConfig::default());
    assert_eq!(sim.phase(), Phase::Menu);
    assert_eq!(sim.tick(&idle(), &mut seeded_rng()), Phase::Menu);
    assert!(sim.enemies.is_empty());
}

#[test]
fn click_starts_a_fresh_run() {
    let mut sim = make_sim(ShooterConfig::default());
    sim.run.lives = 1;
    sim.player.health = 3;
    let click = InputState { fire: true, ..idle() };
    assert_eq!(sim.tick(&click, &mut seeded_rng()), Phase::Running);
    assert_eq!(sim.run, RunState::new(sim.config()));
    assert_eq!(sim.player.health, 100);
}

#[test]
fn invalid_config_is_rejected_before_the_loop() {
    let config = ShooterConfig {
        spawn_y_min: -100,
        spawn_y_max: -100,
        ..ShooterConfig::default()
    };
    let result = Simulation::new(config, SpriteSheet::new().unwrap());
    assert!(matches!(result, Err(ConfigError::SpawnY { .. })));
}

// ── Waves ─────────────────────────────────────────────────────────────────────

#[test]
fn first_tick_spawns_first_wave() {
    let mut sim = running_sim();
    sim.tick(&idle(), &mut seeded_rng());
    assert_eq!(sim.enemies.len(), 5);
    assert_eq!(sim.run.level, 1);
    assert_eq!(sim.run.wave_length, 10);
}

#[test]
fn no_new_wave_while_enemies_remain() {
    let mut sim = running_sim();
    let mut rng = seeded_rng();
    sim.tick(&idle(), &mut rng);
    for _ in 0..10 {
        sim.tick(&idle(), &mut rng);
    }
    assert_eq!(sim.enemies.len(), 5);
    assert_eq!(sim.run.level, 1);
}

#[test]
fn clearing_the_last_enemy_brings_the_next_wave() {
    let mut sim = running_sim();
    sim.run.level = 3;
    sim.run.wave_length = 20;
    // About to slip past the bottom, away from the player.
    let last = enemy(&sim, 50.0, 710.0, EnemyColor::Green);
    sim.enemies.push(last);

    sim.tick(&idle(), &mut FixedRng(HOLD_FIRE));
    assert!(sim.enemies.is_empty());
    assert_eq!(sim.run.level, 3);

    sim.tick(&idle(), &mut seeded_rng());
    assert_eq!(sim.enemies.len(), 20);
    assert_eq!(sim.run.level, 4);
    assert_eq!(sim.run.wave_length, 25);
}

// ── Player controls ───────────────────────────────────────────────────────────

#[test]
fn player_moves_by_speed() {
    let mut sim = running_sim();
    let mut rng = seeded_rng();
    sim.tick(&InputState { left: true, up: true, ..idle() }, &mut rng);
    assert_eq!((sim.player.x, sim.player.y), (295.0, 625.0));
    sim.tick(&InputState { right: true, down: true, ..idle() }, &mut rng);
    assert_eq!((sim.player.x, sim.player.y), (300.0, 630.0));
}

#[test]
fn player_stays_on_screen() {
    let mut sim = running_sim();
    let mut rng = seeded_rng();

    sim.player.x = 3.0;
    sim.player.y = 4.0;
    sim.tick(&InputState { left: true, up: true, ..idle() }, &mut rng);
    assert_eq!((sim.player.x, sim.player.y), (3.0, 4.0));

    // 645 + 5 + 100 reaches the right edge; 640 + 5 + 90 + 15 the bottom.
    sim.player.x = 645.0;
    sim.player.y = 640.0;
    sim.tick(&InputState { right: true, down: true, ..idle() }, &mut rng);
    assert_eq!((sim.player.x, sim.player.y), (645.0, 640.0));

    sim.player.x = 640.0;
    sim.player.y = 635.0;
    sim.tick(&InputState { right: true, down: true, ..idle() }, &mut rng);
    assert_eq!((sim.player.x, sim.player.y), (645.0, 640.0));
}

#[test]
fn fire_input_launches_a_laser_that_moves_the_same_tick() {
    let mut sim = running_sim();
    sim.tick(&InputState { fire: true, ..idle() }, &mut seeded_rng());
    assert_eq!(sim.player.lasers.len(), 1);
    assert_eq!((sim.player.lasers[0].x, sim.player.lasers[0].y), (300.0, 625.0));
}

#[test]
fn holding_fire_respects_cooldown() {
    let mut sim = running_sim();
    let mut rng = seeded_rng();
    let fire = InputState { fire: true, ..idle() };
    for _ in 0..30 {
        sim.tick(&fire, &mut rng);
    }
    assert_eq!(sim.player.lasers.len(), 1);
    sim.tick(&fire, &mut rng);
    assert_eq!(sim.player.lasers.len(), 2);
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[test]
fn enemies_descend_each_tick() {
    let mut sim = running_sim();
    sim.enemies.push(enemy(&sim, 100.0, -500.0, EnemyColor::Red));
    sim.tick(&idle(), &mut FixedRng(HOLD_FIRE));
    assert_eq!(sim.enemies[0].y, -499.0);
}

#[test]
fn ramming_enemy_hurts_player_and_is_removed() {
    let mut sim = running_sim();
    sim.enemies.push(enemy(&sim, 325.0, 650.0, EnemyColor::Red));
    sim.tick(&idle(), &mut FixedRng(HOLD_FIRE));
    assert_eq!(sim.player.health, 90);
    assert!(sim.enemies.is_empty());
    assert_eq!(sim.run.lives, 5);
}

#[test]
fn firing_enemy_does_not_ram_on_the_same_tick() {
    let mut sim = running_sim();
    sim.enemies.push(enemy(&sim, 325.0, 650.0, EnemyColor::Red));
    sim.tick(&idle(), &mut FixedRng(ALWAYS_FIRE));
    assert_eq!(sim.player.health, 100);
    assert_eq!(sim.enemies.len(), 1);
    assert_eq!(sim.enemies[0].lasers.len(), 1);
}

#[test]
fn enemy_past_the_bottom_costs_a_life() {
    let mut sim = running_sim();
    sim.enemies.push(enemy(&sim, 50.0, 710.0, EnemyColor::Blue));
    sim.enemies.push(enemy(&sim, 600.0, -50.0, EnemyColor::Red));
    sim.tick(&idle(), &mut FixedRng(HOLD_FIRE));
    assert_eq!(sim.run.lives, 4);
    assert_eq!(sim.enemies.len(), 1);
    assert_eq!(sim.enemies[0].x, 600.0);
}

#[test]
fn removal_keeps_spawn_order() {
    let mut sim = running_sim();
    sim.enemies.push(enemy(&sim, 10.0, -400.0, EnemyColor::Red));
    sim.enemies.push(enemy(&sim, 50.0, 710.0, EnemyColor::Blue));
    sim.enemies.push(enemy(&sim, 500.0, 710.0, EnemyColor::Green));
    sim.enemies.push(enemy(&sim, 600.0, -300.0, EnemyColor::Green));
    sim.tick(&idle(), &mut FixedRng(HOLD_FIRE));
    let xs: Vec<f32> = sim.enemies.iter().map(|e| e.x).collect();
    assert_eq!(xs, vec![10.0, 600.0]);
    assert_eq!(sim.run.lives, 3);
}

#[test]
fn player_laser_shoots_down_enemy_in_the_loop() {
    let mut sim = running_sim();
    sim.enemies.push(enemy(&sim, 325.0, 300.0, EnemyColor::Red));
    sim.enemies.push(enemy(&sim, 600.0, -300.0, EnemyColor::Green));
    let sprite = sim.player.laser_sprite.clone();
    // One step up puts the beam through the enemy after it descends.
    sim.player.lasers.push(Laser { x: 300.0, y: 305.0, sprite });

    sim.tick(&idle(), &mut FixedRng(HOLD_FIRE));
    assert_eq!(sim.enemies.len(), 1);
    assert_eq!(sim.enemies[0].x, 600.0);
    assert!(sim.player.lasers.is_empty());
}

#[test]
fn damage_mode_wounds_instead_of_destroying() {
    let mut sim = make_sim(ShooterConfig {
        enemy_hit: EnemyHit::Damage,
        ..ShooterConfig::default()
    });
    sim.start_run();
    sim.enemies.push(enemy(&sim, 325.0, 300.0, EnemyColor::Red));
    let sprite = sim.player.laser_sprite.clone();
    sim.player.lasers.push(Laser { x: 300.0, y: 305.0, sprite });

    sim.tick(&idle(), &mut FixedRng(HOLD_FIRE));
    assert_eq!(sim.enemies.len(), 1);
    assert_eq!(sim.enemies[0].health, 90);
    assert!(sim.player.lasers.is_empty());
}

// ── Losing ────────────────────────────────────────────────────────────────────

#[test]
fn last_life_lost_then_loss_on_next_tick() {
    let mut sim = running_sim();
    sim.run.lives = 1;
    sim.enemies.push(enemy(&sim, 50.0, 710.0, EnemyColor::Blue));

    assert_eq!(sim.tick(&idle(), &mut FixedRng(HOLD_FIRE)), Phase::Running);
    assert_eq!(sim.run.lives, 0);
    assert!(!sim.run.lost);

    assert_eq!(sim.tick(&idle(), &mut FixedRng(HOLD_FIRE)), Phase::LostHold);
    assert!(sim.run.lost);
    assert_eq!(sim.run.lives, 0);
    assert_eq!(sim.run.lost_timer, 1);
}

#[test]
fn zero_health_loses_even_with_lives_left() {
    let mut sim = running_sim();
    sim.player.health = 0;
    assert_eq!(sim.tick(&idle(), &mut seeded_rng()), Phase::LostHold);
    assert_eq!(sim.run.lives, 5);
    assert!(sim.run.lost);
    assert!(sim.enemies.is_empty());
}

#[test]
fn loss_hold_lasts_three_seconds_and_ignores_input() {
    let mut sim = running_sim();
    sim.player.health = 0;
    let mut rng = seeded_rng();
    sim.tick(&idle(), &mut rng);

    let busy = InputState {
        left: true,
        fire: true,
        ..idle()
    };
    for _ in 0..179 {
        assert_eq!(sim.tick(&busy, &mut rng), Phase::LostHold);
    }
    assert_eq!((sim.player.x, sim.player.y), (300.0, 630.0));
    assert!(sim.player.lasers.is_empty());

    assert_eq!(sim.tick(&busy, &mut rng), Phase::Terminated);
    assert_eq!(sim.run.lost_timer, 181);
    assert_eq!(sim.tick(&busy, &mut rng), Phase::Terminated);
}

#[test]
fn back_to_menu_after_termination() {
    let mut sim = running_sim();
    sim.player.health = 0;
    let mut rng = seeded_rng();
    while sim.tick(&idle(), &mut rng) != Phase::Terminated {}
    sim.return_to_menu();
    assert_eq!(sim.phase(), Phase::Menu);
    sim.tick(&InputState { fire: true, ..idle() }, &mut rng);
    assert_eq!(sim.phase(), Phase::Running);
    assert_eq!(sim.player.health, 100);
    assert!(!sim.run.lost);
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

#[test]
fn frame_reflects_the_world() {
    let mut sim = running_sim();
    sim.tick(&idle(), &mut seeded_rng());
    sim.player.health = 25;

    let frame = sim.frame();
    assert_eq!(frame.phase, Phase::Running);
    assert_eq!((frame.width, frame.height), (750.0, 750.0));
    assert_eq!(frame.level, 1);
    assert_eq!(frame.lives, 5);
    assert!(!frame.lost);
    assert_eq!(frame.enemies.len(), 5);
    assert_eq!(frame.health_ratio(), 0.25);
    assert_eq!(frame.health_bar().map(|bar| bar.filled), Some(25.0));
}

// ── Invariants over whole runs ────────────────────────────────────────────────

fn input_strategy() -> impl Strategy<Value = InputState> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(left, right, up, down, fire)| InputState {
            left,
            right,
            up,
            down,
            fire,
            quit: false,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn run_bookkeeping_stays_consistent(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..64),
    ) {
        let mut sim = make_sim(ShooterConfig {
            enemy_speed: 25.0,
            starting_lives: 2,
            ..ShooterConfig::default()
        });
        sim.start_run();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut lives_at_loss = None;
        let mut wave_length = sim.run.wave_length;

        for step in 0..400 {
            let input = inputs[step % inputs.len()];
            let phase = sim.tick(&input, &mut rng);

            prop_assert!(sim.run.lives <= 2);
            prop_assert!(sim.player.health >= 0);
            prop_assert!(sim.run.wave_length >= wave_length);
            wave_length = sim.run.wave_length;

            match phase {
                Phase::LostHold | Phase::Terminated => {
                    prop_assert!(sim.run.lost);
                    let lives = *lives_at_loss.get_or_insert(sim.run.lives);
                    prop_assert_eq!(sim.run.lives, lives);
                }
                Phase::Running => prop_assert!(!sim.run.lost),
                Phase::Menu => prop_assert!(false, "never returns to the menu by itself"),
            }
        }
        // Two enemies slipping past at this speed ends the run well within 400 ticks.
        prop_assert!(sim.run.lost);
    }
}
