/// Error types.  The per-tick simulation never fails; everything here is
/// raised while building the game, before the first frame.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("play area must be non-empty, got {width}x{height}")]
    EmptyPlayArea { width: f32, height: f32 },
    #[error("fps must be at least 2, got {0}")]
    TickRate(u32),
    #[error("horizontal spawn range is empty: [{min}, {max})")]
    SpawnX { min: i32, max: i32 },
    #[error("vertical spawn range [{min}, {max}) must be non-empty and above the screen")]
    SpawnY { min: i32, max: i32 },
    #[error("player start ({x}, {y}) lies outside the play area")]
    PlayerStart { x: f32, y: f32 },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("{name} must be finite and greater than zero, got {value}")]
    Speed { name: &'static str, value: f32 },
    #[error("{name} must not be negative, got {value}")]
    NegativeDamage { name: &'static str, value: i32 },
    #[error("{0} does not fit in a tick counter")]
    TickOverflow(&'static str),
}

/// A built-in sprite could not be turned into a collision mask.
#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("sprite art is empty")]
    Empty,
    #[error("sprite art has no opaque pixels")]
    Blank,
    #[error("sprite art row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("mask width {0} exceeds the {max} pixel row limit", max = crate::collision::MAX_MASK_WIDTH)]
    TooWide(u32),
}

/// Top-level error of the game binary.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sprite(#[from] SpriteError),
    #[error("terminal i/o: {0}")]
    Io(#[from] std::io::Error),
}
