/// Built-in sprites.
///
/// The game ships no image files; every sprite is a small piece of text art
/// scaled up into a pixel mask.  Lasers keep wide transparent margins around
/// a narrow beam, so their boxes are far larger than what can actually hit.

use std::rc::Rc;

use crate::collision::Mask;
use crate::error::SpriteError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    PlayerShip,
    RedShip,
    GreenShip,
    BlueShip,
    PlayerLaser,
    RedLaser,
    GreenLaser,
    BlueLaser,
}

impl SpriteId {
    pub const ALL: [SpriteId; 8] = [
        SpriteId::PlayerShip,
        SpriteId::RedShip,
        SpriteId::GreenShip,
        SpriteId::BlueShip,
        SpriteId::PlayerLaser,
        SpriteId::RedLaser,
        SpriteId::GreenLaser,
        SpriteId::BlueLaser,
    ];

    /// Text art and pixel scale.
    fn art(self) -> (&'static [&'static str], u32) {
        match self {
            SpriteId::PlayerShip => (PLAYER_SHIP, 10),
            SpriteId::RedShip => (RED_SHIP, 5),
            SpriteId::GreenShip => (GREEN_SHIP, 5),
            SpriteId::BlueShip => (BLUE_SHIP, 5),
            SpriteId::PlayerLaser => (LASER, 10),
            SpriteId::RedLaser | SpriteId::GreenLaser | SpriteId::BlueLaser => (LASER, 8),
        }
    }
}

// 100x90
const PLAYER_SHIP: &[&str] = &[
    "....##....",
    "....##....",
    "...####...",
    "...####...",
    "..######..",
    ".##.##.##.",
    "##########",
    "##.####.##",
    "#...##...#",
];

// 50x40
const RED_SHIP: &[&str] = &[
    "#...##...#",
    "##.####.##",
    "##########",
    ".########.",
    "..######..",
    "..#.##.#..",
    "....##....",
    "....##....",
];

const GREEN_SHIP: &[&str] = &[
    ".##....##.",
    "##########",
    "#.######.#",
    "..######..",
    "...####...",
    "..##..##..",
    "...#..#...",
    "....##....",
];

const BLUE_SHIP: &[&str] = &[
    "..######..",
    ".########.",
    "##.####.##",
    "##########",
    "#.######.#",
    "..##..##..",
    "..#....#..",
    "...#..#...",
];

// 100x90 for the player, 80x72 for enemies.
const LASER: &[&str] = &[
    "..........",
    "..........",
    "....##....",
    "....##....",
    "....##....",
    "....##....",
    "....##....",
    "..........",
    "..........",
];

/// A sprite's identity plus its collision mask.
#[derive(Debug, PartialEq, Eq)]
pub struct Sprite {
    pub id: SpriteId,
    pub mask: Mask,
}

impl Sprite {
    pub fn width(&self) -> f32 {
        self.mask.width() as f32
    }

    pub fn height(&self) -> f32 {
        self.mask.height() as f32
    }
}

/// Every sprite, built once at startup and shared by the entities using it.
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    sprites: Vec<Rc<Sprite>>,
}

impl SpriteSheet {
    pub fn new() -> Result<Self, SpriteError> {
        let sprites = SpriteId::ALL
            .iter()
            .map(|&id| {
                let (art, scale) = id.art();
                Ok(Rc::new(Sprite {
                    id,
                    mask: Mask::from_art(art, scale)?,
                }))
            })
            .collect::<Result<Vec<_>, SpriteError>>()?;
        Ok(Self { sprites })
    }

    pub fn get(&self, id: SpriteId) -> Rc<Sprite> {
        // `sprites` is built from `SpriteId::ALL`, whose order matches the
        // enum discriminants.
        Rc::clone(&self.sprites[id as usize])
    }
}
