/// Read-only per-tick view of the world handed to the renderer.

use crate::combat::HealthBar;
use crate::entities::{Phase, Ship};

/// Borrowed snapshot; building one allocates nothing.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub phase: Phase,
    pub width: f32,
    pub height: f32,
    pub level: u32,
    pub lives: u32,
    pub lost: bool,
    pub player: &'a Ship,
    /// In spawn order.
    pub enemies: &'a [Ship],
}

impl Frame<'_> {
    pub fn health_bar(&self) -> Option<HealthBar> {
        self.player.health_bar()
    }

    pub fn health_ratio(&self) -> f32 {
        self.player.health_ratio()
    }
}
