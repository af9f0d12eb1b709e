/// Game entity types: data and constructors.  Behaviour lives in
/// `combat` (weapons, lasers) and `simulation` (the tick).

use std::rc::Rc;

use crate::collision::{Collidable, Mask};
use crate::config::ShooterConfig;
use crate::sprites::{Sprite, SpriteId, SpriteSheet};

// ── Enemy colours ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyColor {
    Red,
    Green,
    Blue,
}

impl EnemyColor {
    pub const ALL: [EnemyColor; 3] = [EnemyColor::Red, EnemyColor::Green, EnemyColor::Blue];

    pub fn ship_sprite(self) -> SpriteId {
        match self {
            EnemyColor::Red => SpriteId::RedShip,
            EnemyColor::Green => SpriteId::GreenShip,
            EnemyColor::Blue => SpriteId::BlueShip,
        }
    }

    pub fn laser_sprite(self) -> SpriteId {
        match self {
            EnemyColor::Red => SpriteId::RedLaser,
            EnemyColor::Green => SpriteId::GreenLaser,
            EnemyColor::Blue => SpriteId::BlueLaser,
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A laser bolt.  Its owner is whichever ship's `lasers` list holds it.
#[derive(Clone, Debug)]
pub struct Laser {
    pub x: f32,
    pub y: f32,
    pub sprite: Rc<Sprite>,
}

impl Collidable for Laser {
    fn anchor(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn mask(&self) -> &Mask {
        &self.sprite.mask
    }
}

// ── Weapon cooldown ───────────────────────────────────────────────────────────

/// Ready while `counter == 0`; after a shot the counter runs 1..=limit and
/// drops back to 0 on the tick after reaching `limit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cooldown {
    pub counter: u32,
    pub limit: u32,
}

impl Cooldown {
    pub fn new(limit: u32) -> Self {
        Self { counter: 0, limit }
    }
}

// ── Ships ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShipKind {
    Player { max_health: i32 },
    Enemy { color: EnemyColor },
}

/// Player and enemy ships share one type; `kind` selects the few places
/// where they behave differently.
#[derive(Clone, Debug)]
pub struct Ship {
    pub kind: ShipKind,
    pub x: f32,
    pub y: f32,
    pub health: i32,
    pub sprite: Rc<Sprite>,
    pub laser_sprite: Rc<Sprite>,
    pub lasers: Vec<Laser>,
    pub cooldown: Cooldown,
}

impl Ship {
    pub fn player(config: &ShooterConfig, sprites: &SpriteSheet) -> Self {
        let (x, y) = config.player_start;
        Self {
            kind: ShipKind::Player {
                max_health: config.player_health,
            },
            x,
            y,
            health: config.player_health,
            sprite: sprites.get(SpriteId::PlayerShip),
            laser_sprite: sprites.get(SpriteId::PlayerLaser),
            lasers: Vec::new(),
            cooldown: Cooldown::new(config.cooldown_ticks()),
        }
    }

    pub fn enemy(
        x: f32,
        y: f32,
        color: EnemyColor,
        config: &ShooterConfig,
        sprites: &SpriteSheet,
    ) -> Self {
        Self {
            kind: ShipKind::Enemy { color },
            x,
            y,
            health: config.enemy_health,
            sprite: sprites.get(color.ship_sprite()),
            laser_sprite: sprites.get(color.laser_sprite()),
            lasers: Vec::new(),
            cooldown: Cooldown::new(config.cooldown_ticks()),
        }
    }

    pub fn width(&self) -> f32 {
        self.sprite.width()
    }

    pub fn height(&self) -> f32 {
        self.sprite.height()
    }
}

impl Collidable for Ship {
    fn anchor(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn mask(&self) -> &Mask {
        &self.sprite.mask
    }
}

// ── Run bookkeeping ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Title screen, waiting for a click.
    Menu,
    Running,
    /// "You Lost!!" is on screen; gameplay is frozen.
    LostHold,
    Terminated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunState {
    pub level: u32,
    /// Size of the next wave.
    pub wave_length: u32,
    pub lives: u32,
    pub lost: bool,
    /// Ticks spent in the loss hold.
    pub lost_timer: u32,
}

impl RunState {
    pub fn new(config: &ShooterConfig) -> Self {
        Self {
            level: 0,
            wave_length: config.starting_wave_length,
            lives: config.starting_lives,
            lost: false,
            lost_timer: 0,
        }
    }
}
