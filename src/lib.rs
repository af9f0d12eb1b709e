//! Space Shooter: a fixed-tick arcade shooter.
//!
//! The library holds the whole game core and no terminal code:
//! - `entities`, `combat`: ships, lasers, weapons
//! - `collision`: pixel-mask overlap tests
//! - `waves`: enemy wave generation
//! - `simulation`: the per-tick state machine
//! - `game_loop`: frame pacing around the simulation
//! - `interface`, `snapshot`: what renderers and input sources see

pub mod collision;
pub mod combat;
pub mod config;
pub mod entities;
pub mod error;
pub mod game_loop;
pub mod interface;
pub mod simulation;
pub mod snapshot;
pub mod sprites;
pub mod waves;

pub use config::{EnemyHit, ShooterConfig};
pub use error::{ConfigError, GameError, SpriteError};
pub use simulation::Simulation;
pub use sprites::SpriteSheet;
