/// Weapons and lasers: cooldown, firing, moving bolts and resolving hits.
///
/// Lists are compacted with `retain_mut` while they are scanned, so a bolt
/// consumed by one hit is never looked at again in the same tick and no
/// element is skipped.

use crate::collision::{collide, Collidable};
use crate::config::EnemyHit;
use crate::entities::{Cooldown, Laser, Ship, ShipKind};

// ── Lasers ────────────────────────────────────────────────────────────────────

impl Laser {
    /// Move vertically; negative is up.
    pub fn advance(&mut self, velocity: f32) {
        self.y += velocity;
    }

    pub fn is_out_of_bounds(&self, height: f32) -> bool {
        !(0.0..=height).contains(&self.y)
    }

    pub fn overlaps(&self, target: &impl Collidable) -> bool {
        collide(self, target)
    }
}

// ── Cooldown ──────────────────────────────────────────────────────────────────

impl Cooldown {
    pub fn is_ready(&self) -> bool {
        self.counter == 0
    }

    /// Advance one tick.
    pub fn tick(&mut self) {
        if self.counter >= self.limit {
            self.counter = 0;
        } else if self.counter > 0 {
            self.counter += 1;
        }
    }

    fn trigger(&mut self) {
        self.counter = 1;
    }
}

// ── Ships ─────────────────────────────────────────────────────────────────────

/// Red-under-green health indicator drawn beneath the player ship.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthBar {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub filled: f32,
    pub height: f32,
}

const HEALTH_BAR_GAP: f32 = 10.0;
const HEALTH_BAR_HEIGHT: f32 = 10.0;

impl Ship {
    pub fn tick_cooldown(&mut self) {
        self.cooldown.tick();
    }

    /// Where a new bolt starts: centred horizontally on the ship.  Enemy
    /// lasers are wider than enemy hulls, so theirs start left of `x`.
    pub fn muzzle(&self) -> (f32, f32) {
        let offset = ((self.width() - self.laser_sprite.width()) / 2.0).round();
        (self.x + offset, self.y)
    }

    /// Fire one bolt if the weapon is ready.  Returns whether it fired.
    pub fn fire(&mut self) -> bool {
        if !self.cooldown.is_ready() {
            return false;
        }
        let (x, y) = self.muzzle();
        self.lasers.push(Laser {
            x,
            y,
            sprite: self.laser_sprite.clone(),
        });
        self.cooldown.trigger();
        true
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }

    /// Health never goes below zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount).max(0);
    }

    pub fn health_ratio(&self) -> f32 {
        match self.kind {
            ShipKind::Player { max_health } if max_health > 0 => {
                (self.health as f32 / max_health as f32).clamp(0.0, 1.0)
            }
            _ => 1.0,
        }
    }

    /// Only the player carries a health bar.
    pub fn health_bar(&self) -> Option<HealthBar> {
        match self.kind {
            ShipKind::Player { .. } => Some(HealthBar {
                x: self.x,
                y: self.y + self.height() + HEALTH_BAR_GAP,
                width: self.width(),
                filled: self.width() * self.health_ratio(),
                height: HEALTH_BAR_HEIGHT,
            }),
            ShipKind::Enemy { .. } => None,
        }
    }

    /// Tick the weapon and move every bolt against a single target.  Bolts
    /// leaving `[0, height]` vanish; a bolt touching `target` deals `damage`
    /// once and vanishes.  Returns the number of hits.
    pub fn advance_lasers(
        &mut self,
        velocity: f32,
        height: f32,
        damage: i32,
        target: &mut Ship,
    ) -> u32 {
        self.tick_cooldown();
        let mut hits = 0;
        self.lasers.retain_mut(|laser| {
            laser.advance(velocity);
            if laser.is_out_of_bounds(height) {
                false
            } else if laser.overlaps(&*target) {
                target.take_damage(damage);
                hits += 1;
                false
            } else {
                true
            }
        });
        hits
    }

    /// Tick the weapon and move every bolt against a whole wave.  A bolt
    /// resolves against the first enemy it overlaps (spawn order) and is
    /// consumed; that enemy is removed or damaged according to `hit`.
    /// Returns the number of enemies removed.
    pub fn advance_lasers_against(
        &mut self,
        velocity: f32,
        height: f32,
        targets: &mut Vec<Ship>,
        hit: EnemyHit,
        damage: i32,
    ) -> usize {
        self.tick_cooldown();
        let before = targets.len();
        self.lasers.retain_mut(|laser| {
            laser.advance(velocity);
            if laser.is_out_of_bounds(height) {
                return false;
            }
            let Some(index) = targets.iter().position(|enemy| laser.overlaps(enemy)) else {
                return true;
            };
            match hit {
                EnemyHit::Destroy => {
                    targets.remove(index);
                }
                EnemyHit::Damage => {
                    targets[index].take_damage(damage);
                    if targets[index].is_destroyed() {
                        targets.remove(index);
                    }
                }
            }
            false
        });
        let removed = before - targets.len();
        if removed > 0 {
            log::debug!("{removed} enemies shot down, {} left", targets.len());
        }
        removed
    }
}
