/// The fixed-tick simulation.
///
/// One `tick` call advances the world by exactly one frame.  All randomness
/// comes through the `rng` argument so callers control determinism (tests
/// use a seeded RNG).  Nothing here blocks or performs I/O.

use rand::Rng;

use crate::collision::collide;
use crate::config::ShooterConfig;
use crate::entities::{Phase, RunState, Ship};
use crate::error::ConfigError;
use crate::interface::InputState;
use crate::snapshot::Frame;
use crate::sprites::SpriteSheet;
use crate::waves::spawn_wave;

pub struct Simulation {
    config: ShooterConfig,
    sprites: SpriteSheet,
    phase: Phase,
    pub run: RunState,
    pub player: Ship,
    /// In spawn order.
    pub enemies: Vec<Ship>,
}

impl Simulation {
    /// Validates `config` up front; a bad config never reaches the loop.
    pub fn new(config: ShooterConfig, sprites: SpriteSheet) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            phase: Phase::Menu,
            run: RunState::new(&config),
            player: Ship::player(&config, &sprites),
            enemies: Vec::new(),
            config,
            sprites,
        })
    }

    pub fn config(&self) -> &ShooterConfig {
        &self.config
    }

    pub fn sprites(&self) -> &SpriteSheet {
        &self.sprites
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Start a fresh run: new player, no enemies, level 0.
    pub fn start_run(&mut self) {
        self.run = RunState::new(&self.config);
        self.player = Ship::player(&self.config, &self.sprites);
        self.enemies.clear();
        self.phase = Phase::Running;
        log::info!(
            "Run started: {} lives, first wave of {}",
            self.run.lives,
            self.run.wave_length
        );
    }

    pub fn return_to_menu(&mut self) {
        self.phase = Phase::Menu;
    }

    /// Advance one tick and return the resulting phase.
    pub fn tick(&mut self, input: &InputState, rng: &mut impl Rng) -> Phase {
        match self.phase {
            Phase::Menu => {
                if input.fire {
                    self.start_run();
                }
            }
            Phase::Running => self.tick_running(input, rng),
            Phase::LostHold => self.tick_lost(),
            Phase::Terminated => {}
        }
        self.phase
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            phase: self.phase,
            width: self.config.width,
            height: self.config.height,
            level: self.run.level,
            lives: self.run.lives,
            lost: self.run.lost,
            player: &self.player,
            enemies: &self.enemies,
        }
    }

    // ── Running ──────────────────────────────────────────────────────────────

    fn tick_running(&mut self, input: &InputState, rng: &mut impl Rng) {
        // 1. Loss check.  Either condition alone ends the run.
        if self.run.lives == 0 || self.player.is_destroyed() {
            self.run.lost = true;
            self.run.lost_timer = 1;
            self.phase = Phase::LostHold;
            log::info!(
                "Run lost at level {} (lives {}, health {})",
                self.run.level,
                self.run.lives,
                self.player.health
            );
            return;
        }

        // 2. Next wave once the screen is clear.
        if self.enemies.is_empty() {
            spawn_wave(
                &mut self.run,
                &mut self.enemies,
                &self.config,
                &self.sprites,
                rng,
            );
        }

        // 3. Player controls.
        self.steer_player(input);
        if input.fire {
            self.player.fire();
        }

        // 4. Enemies, in spawn order.
        self.advance_enemies(rng);

        // 5. Player lasers against the whole wave.
        self.player.advance_lasers_against(
            -self.config.laser_speed,
            self.config.height,
            &mut self.enemies,
            self.config.enemy_hit,
            self.config.laser_damage,
        );
    }

    /// Move within the screen; a step that would leave it is dropped.
    fn steer_player(&mut self, input: &InputState) {
        let speed = self.config.player_speed;
        let (width, height) = (self.config.width, self.config.height);
        let player = &mut self.player;
        if input.left && player.x - speed > 0.0 {
            player.x -= speed;
        }
        if input.right && player.x + speed + player.width() < width {
            player.x += speed;
        }
        if input.up && player.y - speed > 0.0 {
            player.y -= speed;
        }
        if input.down
            && player.y + speed + player.height() + self.config.health_bar_clearance < height
        {
            player.y += speed;
        }
    }

    fn advance_enemies(&mut self, rng: &mut impl Rng) {
        let Self {
            config,
            run,
            player,
            enemies,
            ..
        } = self;
        let fire_odds = config.enemy_fire_odds();

        enemies.retain_mut(|enemy| {
            enemy.y += config.enemy_speed;
            enemy.advance_lasers(config.laser_speed, config.height, config.laser_damage, player);

            // Firing and ramming are exclusive on any one tick.
            if rng.gen_ratio(1, fire_odds) {
                enemy.fire();
            } else if collide(&*enemy, &*player) {
                player.take_damage(config.ram_damage);
                log::debug!("Rammed by enemy at ({}, {}), health {}", enemy.x, enemy.y, player.health);
                return false;
            }

            if enemy.y + enemy.height() > config.height {
                run.lives = run.lives.saturating_sub(1);
                log::debug!("Enemy slipped past, {} lives left", run.lives);
                return false;
            }
            true
        });
    }

    // ── Loss hold ────────────────────────────────────────────────────────────

    fn tick_lost(&mut self) {
        self.run.lost_timer += 1;
        if self.run.lost_timer > self.config.loss_hold_ticks() {
            self.phase = Phase::Terminated;
            log::info!("Run over after level {}", self.run.level);
        }
    }
}
