//! Blockfall terminal runner (default binary).
//!
//! Polls crossterm input until the next frame, advances the game by the
//! elapsed time and draws the snapshot through the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::config::RunConfig;
use blockfall::core::{GameSnapshot, GameState};
use blockfall::event_log::{EventLog, LogRecord};
use blockfall::input::{should_quit, InputHandler};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let config = RunConfig::load()?;

    let mut notes: Vec<String> = Vec::new();
    let log = match config.log_path.as_ref() {
        Some(path) => EventLog::open(path).unwrap_or_else(|e| {
            notes.push(format!("{e:#}"));
            EventLog::disabled()
        }),
        None => EventLog::disabled(),
    };

    let mut term = TerminalRenderer::new();
    let result = match term.enter() {
        Ok(()) => {
            let mut session = Session::new(&config, log);
            let result = session.run(&mut term);
            notes.append(&mut session.notes);
            result
        }
        Err(e) => Err(e),
    };

    // Always try to restore terminal state.
    let _ = term.exit();
    for note in &notes {
        eprintln!("[blockfall] {note}");
    }
    result
}

struct Session {
    game: GameState,
    input: InputHandler,
    log: EventLog,
    game_over_logged: bool,
    /// Messages for stderr once the terminal is restored.
    notes: Vec<String>,
}

impl Session {
    fn new(config: &RunConfig, log: EventLog) -> Self {
        let mut session = Self {
            game: GameState::new(config.seed_or_clock()),
            input: InputHandler::new().with_key_release_timeout_ms(config.key_release_timeout_ms),
            log,
            game_over_logged: false,
            notes: Vec::new(),
        };
        session.record(LogRecord::Session {
            seed: session.game.seed(),
        });
        session
    }

    fn run(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        let view = GameView::default();
        let mut fb = FrameBuffer::new(0, 0);
        let mut snap = GameSnapshot::default();

        let frame = Duration::from_millis(TICK_MS as u64);
        let mut last_frame = Instant::now();

        loop {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            self.game.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;

            // Input until the next frame is due.
            let mut timeout = frame.saturating_sub(last_frame.elapsed());
            while event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if key.kind == KeyEventKind::Press && should_quit(key) {
                            return Ok(());
                        }
                        if let Some(action) = self.input.handle_key_event(key) {
                            self.apply(action);
                        }
                    }
                    Event::Resize(..) => term.invalidate(),
                    _ => {}
                }
                timeout = Duration::ZERO;
            }

            let elapsed = last_frame.elapsed();
            if elapsed >= frame {
                last_frame = Instant::now();
                let delta_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
                let state = self.input.state();
                self.game.update(delta_ms, state);
                self.drain_events();
            }
        }
    }

    fn apply(&mut self, action: GameAction) {
        self.game.apply_action(action);
        if action == GameAction::Restart {
            self.input.reset();
            self.game_over_logged = false;
            self.record(LogRecord::Session {
                seed: self.game.seed(),
            });
        }
        self.drain_events();
    }

    fn drain_events(&mut self) {
        if let Some(ev) = self.game.take_last_event() {
            self.record(LogRecord::from(&ev));
        }
        if self.game.game_over() && !self.game_over_logged {
            self.game_over_logged = true;
            self.record(LogRecord::GameOver {
                score: self.game.score(),
                lines: self.game.lines(),
                level: self.game.level(),
            });
        }
    }

    fn record(&mut self, record: LogRecord) {
        if let Err(e) = self.log.record(&record) {
            self.notes.push(format!("{e:#}"));
        }
    }
}
