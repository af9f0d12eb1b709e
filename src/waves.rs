/// Wave spawner.  A new wave is generated whenever the enemy list runs dry.

use rand::Rng;

use crate::config::ShooterConfig;
use crate::entities::{EnemyColor, RunState, Ship};
use crate::sprites::SpriteSheet;

/// Append `run.wave_length` enemies at random positions above the screen,
/// then advance to the next level with a longer wave.  Returns the number
/// of enemies spawned.
///
/// Enemies start anywhere between `spawn_y_min` and `spawn_y_max` (both
/// negative), so they trickle into view over many seconds instead of
/// appearing at once.
pub fn spawn_wave(
    run: &mut RunState,
    enemies: &mut Vec<Ship>,
    config: &ShooterConfig,
    sprites: &SpriteSheet,
    rng: &mut impl Rng,
) -> usize {
    let (x_min, x_max) = config.spawn_x_range();
    let count = run.wave_length as usize;
    enemies.reserve(count);
    for _ in 0..count {
        let x = rng.gen_range(x_min..x_max) as f32;
        let y = rng.gen_range(config.spawn_y_min..config.spawn_y_max) as f32;
        let color = EnemyColor::ALL[rng.gen_range(0..EnemyColor::ALL.len())];
        enemies.push(Ship::enemy(x, y, color, config, sprites));
    }
    run.level += 1;
    run.wave_length += config.wave_growth;
    log::info!(
        "Level {}: {} enemies incoming (next wave {})",
        run.level,
        count,
        run.wave_length
    );
    count
}
