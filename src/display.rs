/// Rendering layer.  All terminal output lives here.
///
/// The renderer receives an immutable [`Frame`] each tick and translates it
/// into terminal commands.  The 750×750 logical play area is stretched over
/// the whole terminal; each sprite is drawn by sampling its opacity mask
/// once per character cell.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use space_shooter::collision::Mask;
use space_shooter::entities::{Phase, Ship};
use space_shooter::interface::Renderer;
use space_shooter::snapshot::Frame;
use space_shooter::sprites::SpriteId;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_LIVES: Color = Color::Red;
const C_HUD_LEVEL: Color = Color::White;
const C_BAR_EMPTY: Color = Color::Red;
const C_BAR_FULL: Color = Color::Green;
const C_BANNER: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

const PIXEL: &str = "█";

fn sprite_color(id: SpriteId) -> Color {
    match id {
        SpriteId::PlayerShip | SpriteId::PlayerLaser => Color::Yellow,
        SpriteId::RedShip | SpriteId::RedLaser => Color::Red,
        SpriteId::GreenShip | SpriteId::GreenLaser => Color::Green,
        SpriteId::BlueShip | SpriteId::BlueLaser => Color::Blue,
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps logical coordinates onto terminal cells.
#[derive(Clone, Copy)]
struct Viewport {
    cols: u16,
    rows: u16,
    cell_w: f32,
    cell_h: f32,
}

impl Viewport {
    fn new(cols: u16, rows: u16, width: f32, height: f32) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cell_w: width / cols as f32,
            cell_h: height / rows as f32,
        }
    }

    fn col(&self, x: f32) -> i32 {
        (x / self.cell_w).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        (y / self.cell_h).floor() as i32
    }

    fn contains(&self, col: i32, row: i32) -> bool {
        (0..self.cols as i32).contains(&col) && (0..self.rows as i32).contains(&row)
    }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Error = std::io::Error;

    /// Render one complete frame.
    fn draw(&mut self, frame: &Frame<'_>) -> std::io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let view = Viewport::new(cols, rows, frame.width, frame.height);
        let out = &mut self.out;

        out.queue(terminal::Clear(terminal::ClearType::All))?;

        if frame.phase == Phase::Menu {
            draw_centered(out, view, view.rows / 2, "Press the mouse to begin...", C_BANNER)?;
            draw_centered(
                out,
                view,
                view.rows / 2 + 2,
                "← → ↑ ↓ / WASD : Move   SPACE : Shoot   Q : Quit",
                C_HINT,
            )?;
        } else {
            for enemy in frame.enemies {
                draw_ship(out, view, enemy)?;
            }
            draw_ship(out, view, frame.player)?;
            draw_health_bar(out, view, frame)?;
            draw_hud(out, view, frame)?;
            if frame.lost {
                let row = view.row(350.0).clamp(0, view.rows as i32 - 1) as u16;
                draw_centered(out, view, row, "You Lost!!", C_BANNER)?;
            }
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// A ship and every laser it owns.
fn draw_ship<W: Write>(out: &mut W, view: Viewport, ship: &Ship) -> std::io::Result<()> {
    draw_mask(out, view, &ship.sprite.mask, ship.x, ship.y, sprite_color(ship.sprite.id))?;
    for laser in &ship.lasers {
        draw_mask(out, view, &laser.sprite.mask, laser.x, laser.y, sprite_color(laser.sprite.id))?;
    }
    Ok(())
}

/// Fill every on-screen cell that covers at least one opaque pixel.
fn draw_mask<W: Write>(
    out: &mut W,
    view: Viewport,
    mask: &Mask,
    x: f32,
    y: f32,
    color: Color,
) -> std::io::Result<()> {
    let first_col = view.col(x);
    let last_col = view.col(x + mask.width() as f32 - 1.0);
    let first_row = view.row(y);
    let last_row = view.row(y + mask.height() as f32 - 1.0);

    out.queue(style::SetForegroundColor(color))?;
    for row in first_row..=last_row {
        let y0 = (row as f32 * view.cell_h - y).floor() as i32;
        let y1 = ((row + 1) as f32 * view.cell_h - y).ceil() as i32;
        for col in first_col..=last_col {
            if !view.contains(col, row) {
                continue;
            }
            let x0 = (col as f32 * view.cell_w - x).floor() as i32;
            let x1 = ((col + 1) as f32 * view.cell_w - x).ceil() as i32;
            if mask.any_in(x0, y0, x1, y1) {
                out.queue(cursor::MoveTo(col as u16, row as u16))?;
                out.queue(Print(PIXEL))?;
            }
        }
    }
    Ok(())
}

fn draw_health_bar<W: Write>(out: &mut W, view: Viewport, frame: &Frame<'_>) -> std::io::Result<()> {
    let Some(bar) = frame.health_bar() else {
        return Ok(());
    };
    let row = view.row(bar.y);
    let first = view.col(bar.x);
    let last = view.col(bar.x + bar.width - 1.0);
    let filled_end = view.col(bar.x + bar.filled - 1.0);

    for col in first..=last {
        if !view.contains(col, row) {
            continue;
        }
        let color = if bar.filled > 0.0 && col <= filled_end {
            C_BAR_FULL
        } else {
            C_BAR_EMPTY
        };
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(PIXEL))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: Viewport, frame: &Frame<'_>) -> std::io::Result<()> {
    // Lives, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Lives: {}", frame.lives)))?;

    // Level, right
    let level_str = format!("Level: {}", frame.level);
    let x = view
        .cols
        .saturating_sub(level_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(x, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;
    Ok(())
}

fn draw_centered<W: Write>(
    out: &mut W,
    view: Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}
