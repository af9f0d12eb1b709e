/// Run configuration.
///
/// All tuning constants live in one [`ShooterConfig`] handed to the
/// simulation at construction.  A config can be loaded from JSON; any key
/// left out keeps its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How a player laser resolves against the enemy it strikes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyHit {
    /// The enemy is removed outright.
    #[default]
    Destroy,
    /// The enemy takes `laser_damage` and is removed once its health is gone.
    Damage,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterConfig {
    pub width: f32,
    pub height: f32,
    /// Ticks per second.  Weapon cooldown and enemy fire odds scale with it.
    pub fps: u32,
    pub player_start: (f32, f32),
    pub player_health: i32,
    pub enemy_health: i32,
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub laser_speed: f32,
    pub laser_damage: i32,
    /// Damage a player takes when an enemy flies into it.
    pub ram_damage: i32,
    pub starting_lives: u32,
    pub starting_wave_length: u32,
    pub wave_growth: u32,
    pub spawn_x_min: i32,
    pub spawn_x_right_margin: i32,
    pub spawn_y_min: i32,
    pub spawn_y_max: i32,
    /// Room kept under the player ship for its health bar.
    pub health_bar_clearance: f32,
    pub loss_hold_seconds: u32,
    pub max_lost_runs: u32,
    pub enemy_hit: EnemyHit,
    pub log_file: Option<PathBuf>,
}

impl Default for ShooterConfig {
    fn default() -> Self {
        Self {
            width: 750.0,
            height: 750.0,
            fps: 60,
            player_start: (300.0, 630.0),
            player_health: 100,
            enemy_health: 100,
            player_speed: 5.0,
            enemy_speed: 1.0,
            laser_speed: 5.0,
            laser_damage: 10,
            ram_damage: 10,
            starting_lives: 5,
            starting_wave_length: 5,
            wave_growth: 5,
            spawn_x_min: 50,
            spawn_x_right_margin: 100,
            spawn_y_min: -1500,
            spawn_y_max: -100,
            health_bar_clearance: 15.0,
            loss_hold_seconds: 3,
            max_lost_runs: 3,
            enemy_hit: EnemyHit::Destroy,
            log_file: None,
        }
    }
}

impl ShooterConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject bounds the game loop could not honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::EmptyPlayArea {
                width: self.width,
                height: self.height,
            });
        }
        if self.fps < 2 {
            return Err(ConfigError::TickRate(self.fps));
        }
        let (min, max) = self.spawn_x_range();
        if min >= max {
            return Err(ConfigError::SpawnX { min, max });
        }
        if self.spawn_y_min >= self.spawn_y_max || self.spawn_y_max > 0 {
            return Err(ConfigError::SpawnY {
                min: self.spawn_y_min,
                max: self.spawn_y_max,
            });
        }
        let (x, y) = self.player_start;
        if !(0.0..self.width).contains(&x) || !(0.0..self.height).contains(&y) {
            return Err(ConfigError::PlayerStart { x, y });
        }
        if self.fps.checked_mul(2).is_none() {
            return Err(ConfigError::TickOverflow("fps"));
        }
        if self.fps.checked_mul(self.loss_hold_seconds).is_none() {
            return Err(ConfigError::TickOverflow("loss_hold_seconds"));
        }
        for (name, value) in [
            ("player_speed", self.player_speed),
            ("enemy_speed", self.enemy_speed),
            ("laser_speed", self.laser_speed),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Speed { name, value });
            }
        }
        for (name, value) in [
            ("laser_damage", self.laser_damage),
            ("ram_damage", self.ram_damage),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativeDamage { name, value });
            }
        }
        for (name, value) in [
            ("player_health", self.player_health as i64),
            ("enemy_health", self.enemy_health as i64),
            ("starting_lives", self.starting_lives as i64),
            ("starting_wave_length", self.starting_wave_length as i64),
            ("max_lost_runs", self.max_lost_runs as i64),
        ] {
            if value <= 0 {
                return Err(ConfigError::Zero(name));
            }
        }
        Ok(())
    }

    /// Half a second of ticks.
    pub fn cooldown_ticks(&self) -> u32 {
        self.fps / 2
    }

    /// An enemy fires on a given tick with probability `1 / enemy_fire_odds()`,
    /// about once every two seconds.
    pub fn enemy_fire_odds(&self) -> u32 {
        self.fps.saturating_mul(2)
    }

    pub fn loss_hold_ticks(&self) -> u32 {
        self.fps.saturating_mul(self.loss_hold_seconds)
    }

    /// Half-open horizontal spawn range `[min, max)`.
    pub fn spawn_x_range(&self) -> (i32, i32) {
        (
            self.spawn_x_min,
            self.width as i32 - self.spawn_x_right_margin,
        )
    }
}
