mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEventKind, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use space_shooter::game_loop::{run_session, FramePacer, SessionEnd};
use space_shooter::interface::{InputSource, InputState};
use space_shooter::{GameError, ShooterConfig, Simulation, SpriteSheet};

use display::TerminalRenderer;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events;
/// the window has to outlast the gap between two OS key-repeat events.
const HOLD_WINDOW: u64 = 8;

// ── Input ─────────────────────────────────────────────────────────────────────

/// Held-key tracker fed by the terminal reader thread.
///
/// Instead of acting on each key event individually, we record the frame
/// number of the last press/repeat event for every key and report every key
/// that is still "fresh" on each poll.  This lets Space and the arrows be
/// held at the same time.
///
/// * **Keyboard-enhancement capable** terminals (kitty protocol): proper
///   `Press` / `Repeat` / `Release` events, keys are dropped on release.
/// * **Classic terminals**: only `Press` events; keys expire after
///   `HOLD_WINDOW` frames of silence.
struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl TerminalInput {
    fn new(rx: mpsc::Receiver<Event>) -> Self {
        Self {
            rx,
            key_frame: HashMap::new(),
            frame: 0,
        }
    }

    /// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
    fn is_held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&key| self.is_held(key))
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> InputState {
        self.frame += 1;
        let mut state = InputState::default();

        // Drain all pending events (non-blocking)
        while let Ok(ev) = self.rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        self.key_frame.insert(code, self.frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                state.quit = true;
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                state.quit = true;
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        self.key_frame.insert(code, self.frame);
                    }
                    KeyEventKind::Release => {
                        self.key_frame.remove(&code);
                    }
                },
                // A click counts as fire for the frame it arrives in.
                Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                    state.fire = true;
                }
                _ => {}
            }
        }

        state.left = self.any_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]);
        state.right = self.any_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]);
        state.up = self.any_held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]);
        state.down = self.any_held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]);
        state.fire |= self.is_held(KeyCode::Char(' '));
        state
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Logs go to `config.log_file` when set, so they don't scribble over the
/// game screen; otherwise only warnings reach stderr.
fn init_logging(config: &ShooterConfig) -> Result<(), GameError> {
    let mut builder = match &config.log_file {
        Some(path) => {
            let file = File::create(path)?;
            let mut builder =
                env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")),
    };
    builder.init();
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => ShooterConfig::load(&path)?,
        None => ShooterConfig::default(),
    };
    init_logging(&config)?;

    // Fail fast on anything that would break mid-game.
    let sprites = SpriteSheet::new()?;
    let mut sim = Simulation::new(config, sprites)?;
    log::info!("Space Shooter starting");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut renderer = TerminalRenderer::new(out);
    let result = run(&mut sim, &mut renderer, TerminalInput::new(rx));

    // Always restore the terminal
    let out = renderer.writer();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

/// Title screen → run → loss hold → title screen, until the player quits or
/// has lost `max_lost_runs` runs.
fn run<W: Write>(
    sim: &mut Simulation,
    renderer: &mut TerminalRenderer<W>,
    mut input: TerminalInput,
) -> Result<(), GameError> {
    let mut rng = thread_rng();
    let mut pacer = FramePacer::new(sim.config().fps);
    let mut lost_runs = 0;

    loop {
        match run_session(sim, renderer, &mut input, &mut pacer, &mut rng)? {
            SessionEnd::Quit => break,
            SessionEnd::Lost => {
                lost_runs += 1;
                if lost_runs >= sim.config().max_lost_runs {
                    log::info!("{lost_runs} runs lost, exiting");
                    break;
                }
                sim.return_to_menu();
            }
        }
    }
    Ok(())
}
