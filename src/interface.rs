/// Seams between the simulation core and the outside world.
///
/// The core never touches a terminal or a clock directly: it reads an
/// [`InputState`] from an [`InputSource`] and hands a [`Frame`] to a
/// [`Renderer`] once per tick.

use crate::snapshot::Frame;

/// Keys held during the current tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire in game; start from the title screen.
    pub fire: bool,
    pub quit: bool,
}

pub trait InputSource {
    fn poll(&mut self) -> InputState;
}

pub trait Renderer {
    type Error;

    /// Draw and present one complete frame.
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error>;
}
