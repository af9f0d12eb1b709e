/// Pixel-accurate collision detection.
///
/// Every sprite carries an opacity mask.  Two entities collide only when an
/// opaque pixel of one lands on an opaque pixel of the other; overlapping
/// bounding boxes with transparent corners do not count.

use crate::error::SpriteError;

/// Rows are stored as single `u128` words.
pub const MAX_MASK_WIDTH: u32 = 128;

/// Opacity mask of a sprite, one bit per pixel.  Bit `x` of `rows[y]` is the
/// pixel at column `x`, row `y`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    rows: Vec<u128>,
}

impl Mask {
    /// Build a mask by asking `opaque(x, y)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut opaque: impl FnMut(u32, u32) -> bool,
    ) -> Result<Self, SpriteError> {
        if width == 0 || height == 0 {
            return Err(SpriteError::Empty);
        }
        if width > MAX_MASK_WIDTH {
            return Err(SpriteError::TooWide(width));
        }
        let rows = (0..height)
            .map(|y| {
                (0..width)
                    .filter(|&x| opaque(x, y))
                    .fold(0u128, |row, x| row | (1u128 << x))
            })
            .collect();
        Ok(Self { width, height, rows })
    }

    /// Build a mask from text art (`#` opaque, anything else transparent),
    /// blowing every character up to a `scale`×`scale` block of pixels.
    /// Art without a single opaque pixel could never be hit and is rejected.
    pub fn from_art(art: &[&str], scale: u32) -> Result<Self, SpriteError> {
        let expected = art.first().map(|row| row.chars().count()).unwrap_or(0);
        if expected == 0 || scale == 0 {
            return Err(SpriteError::Empty);
        }
        let grid: Vec<Vec<bool>> = art
            .iter()
            .map(|row| row.chars().map(|c| c == '#').collect())
            .collect();
        if let Some((row, cells)) = grid.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(SpriteError::Ragged {
                row,
                found: cells.len(),
                expected,
            });
        }
        let mask = Self::from_fn(expected as u32 * scale, art.len() as u32 * scale, |x, y| {
            grid[(y / scale) as usize][(x / scale) as usize]
        })?;
        if mask.count() == 0 {
            return Err(SpriteError::Blank);
        }
        Ok(mask)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of opaque pixels.
    pub fn count(&self) -> u32 {
        self.rows.iter().map(|row| row.count_ones()).sum()
    }

    /// True if any pixel inside the half-open rectangle `[x0, x1) × [y0, y1)`
    /// is opaque.  The rectangle is clipped to the mask.
    pub fn any_in(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> bool {
        let x0 = x0.clamp(0, self.width as i32) as u32;
        let x1 = x1.clamp(0, self.width as i32) as u32;
        let y0 = y0.clamp(0, self.height as i32) as usize;
        let y1 = y1.clamp(0, self.height as i32) as usize;
        if x0 >= x1 {
            return false;
        }
        let span = x1 - x0;
        let window = if span >= 128 { u128::MAX } else { ((1u128 << span) - 1) << x0 };
        self.rows[y0..y1.max(y0)].iter().any(|row| row & window != 0)
    }

    /// First pixel (in this mask's coordinates, scanning rows top to bottom)
    /// where `self` and `other` are both opaque, with `other` placed at
    /// `(dx, dy)` relative to `self`.
    pub fn overlap(&self, other: &Mask, dx: i32, dy: i32) -> Option<(u32, u32)> {
        if dx >= self.width as i32
            || -dx >= other.width as i32
            || dy >= self.height as i32
            || -dy >= other.height as i32
        {
            return None;
        }
        // Both widths are at most 128, so |dx| < 128 here.
        let y_start = dy.max(0);
        let y_end = (self.height as i32).min(dy + other.height as i32);
        for y in y_start..y_end {
            let theirs = other.rows[(y - dy) as usize];
            let shifted = if dx >= 0 { theirs << dx } else { theirs >> -dx };
            let hit = self.rows[y as usize] & shifted;
            if hit != 0 {
                return Some((hit.trailing_zeros(), y as u32));
            }
        }
        None
    }

    pub fn overlaps(&self, other: &Mask, dx: i32, dy: i32) -> bool {
        self.overlap(other, dx, dy).is_some()
    }
}

/// Anything with an anchor point (top-left of its sprite) and a mask.
pub trait Collidable {
    fn anchor(&self) -> (f32, f32);
    fn mask(&self) -> &Mask;
}

/// Pixel overlap test between two entities at their current positions.
///
/// The displacement is rounded half away from zero, so swapping the
/// arguments negates it exactly and the test is symmetric.
pub fn collide(a: &impl Collidable, b: &impl Collidable) -> bool {
    let (ax, ay) = a.anchor();
    let (bx, by) = b.anchor();
    a.mask().overlaps(b.mask(), pixel_offset(bx - ax), pixel_offset(by - ay))
}

fn pixel_offset(delta: f32) -> i32 {
    // Anything this far away cannot overlap; the clamp keeps negation in range.
    delta.round().clamp(-65_536.0, 65_536.0) as i32
}
