use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use space_shooter::entities::*;
use space_shooter::sprites::SpriteSheet;
use space_shooter::waves::spawn_wave;
use space_shooter::ShooterConfig;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn first_wave_spawns_five_and_levels_up() {
    let config = ShooterConfig::default();
    let sprites = SpriteSheet::new().unwrap();
    let mut run = RunState::new(&config);
    let mut enemies = Vec::new();

    let spawned = spawn_wave(&mut run, &mut enemies, &config, &sprites, &mut seeded_rng());

    assert_eq!(spawned, 5);
    assert_eq!(enemies.len(), 5);
    assert_eq!(run.level, 1);
    assert_eq!(run.wave_length, 10);
}

#[test]
fn waves_grow_by_five_each_level() {
    let config = ShooterConfig::default();
    let sprites = SpriteSheet::new().unwrap();
    let mut run = RunState::new(&config);
    let mut rng = seeded_rng();

    for level in 1..=4u32 {
        let mut enemies = Vec::new();
        let expected = run.wave_length;
        let spawned = spawn_wave(&mut run, &mut enemies, &config, &sprites, &mut rng);
        assert_eq!(spawned as u32, expected);
        assert_eq!(run.level, level);
        assert_eq!(run.wave_length, expected + 5);
    }
}

#[test]
fn enemies_spawn_hidden_above_the_screen() {
    let config = ShooterConfig::default();
    let sprites = SpriteSheet::new().unwrap();
    let mut run = RunState::new(&config);
    run.wave_length = 200;
    let mut enemies = Vec::new();

    spawn_wave(&mut run, &mut enemies, &config, &sprites, &mut seeded_rng());

    for enemy in &enemies {
        assert!((50.0..650.0).contains(&enemy.x), "x = {}", enemy.x);
        assert!((-1500.0..-100.0).contains(&enemy.y), "y = {}", enemy.y);
        assert_eq!(enemy.health, 100);
        assert!(enemy.lasers.is_empty());
        assert!(enemy.y + enemy.height() < 0.0);
    }
}

#[test]
fn all_colors_show_up() {
    let config = ShooterConfig::default();
    let sprites = SpriteSheet::new().unwrap();
    let mut run = RunState::new(&config);
    run.wave_length = 300;
    let mut enemies = Vec::new();

    spawn_wave(&mut run, &mut enemies, &config, &sprites, &mut seeded_rng());

    let colors: HashSet<EnemyColor> = enemies
        .iter()
        .filter_map(|e| match e.kind {
            ShipKind::Enemy { color } => Some(color),
            ShipKind::Player { .. } => None,
        })
        .collect();
    assert_eq!(colors.len(), 3);
}

#[test]
fn spawning_appends_in_order() {
    let config = ShooterConfig::default();
    let sprites = SpriteSheet::new().unwrap();
    let mut run = RunState::new(&config);
    let mut enemies = vec![Ship::enemy(1.0, 2.0, EnemyColor::Red, &config, &sprites)];

    spawn_wave(&mut run, &mut enemies, &config, &sprites, &mut seeded_rng());

    assert_eq!(enemies.len(), 6);
    assert_eq!((enemies[0].x, enemies[0].y), (1.0, 2.0));
}

#[test]
fn same_seed_same_wave() {
    let config = ShooterConfig::default();
    let sprites = SpriteSheet::new().unwrap();
    let positions = |seed: u64| {
        let mut run = RunState::new(&config);
        let mut enemies = Vec::new();
        spawn_wave(&mut run, &mut enemies, &config, &sprites, &mut StdRng::seed_from_u64(seed));
        enemies.iter().map(|e| (e.x, e.y, e.kind)).collect::<Vec<_>>()
    };
    assert_eq!(positions(7), positions(7));
}
