/// Frame-paced driver around [`Simulation`].
///
/// Single-threaded: each iteration waits out the rest of the tick interval,
/// polls input, ticks the world once and hands the renderer a fresh
/// [`Frame`](crate::snapshot::Frame).

use std::time::{Duration, Instant};

use rand::Rng;

use crate::entities::Phase;
use crate::interface::{InputSource, Renderer};
use crate::simulation::Simulation;

/// Blocks until the next tick is due.
pub trait Pacer {
    fn wait(&mut self);
}

/// Sleeps away whatever is left of a fixed interval since the last wait.
pub struct FramePacer {
    interval: Duration,
    frame_start: Instant,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            frame_start: Instant::now(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Pacer for FramePacer {
    fn wait(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.interval {
            std::thread::sleep(self.interval - elapsed);
        }
        self.frame_start = Instant::now();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The player asked to quit (or closed the window).
    Quit,
    /// A run ended and its loss hold ran out.
    Lost,
}

/// Run ticks until the player quits or a run reaches `Terminated`.
///
/// Starts from whatever phase `sim` is in, normally the title screen.
pub fn run_session<R: Renderer>(
    sim: &mut Simulation,
    renderer: &mut R,
    input: &mut impl InputSource,
    pacer: &mut impl Pacer,
    rng: &mut impl Rng,
) -> Result<SessionEnd, R::Error> {
    let mut running = true;
    while running {
        pacer.wait();

        let keys = input.poll();
        if keys.quit {
            running = false;
            continue;
        }

        let phase = sim.tick(&keys, rng);
        renderer.draw(&sim.frame())?;

        if phase == Phase::Terminated {
            return Ok(SessionEnd::Lost);
        }
    }
    log::info!("Quit requested");
    Ok(SessionEnd::Quit)
}
