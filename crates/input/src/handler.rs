//! Held-key tracking for terminal environments.
//!
//! Horizontal keys are level-triggered: the handler only records which
//! direction is held and reports it as an [`InputState`]; auto-repeat timing
//! lives in the game state. Every other binding is a one-shot action.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{handle_key_event, horizontal_key};
use crate::types::{GameAction, InputState};

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks the held horizontal direction.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Most recently pressed direction still held (-1 left, 1 right)
    held: Option<i8>,
    last_key_time: Instant,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            held: None,
            last_key_time: Instant::now(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Feed one key event. Returns the one-shot action it triggers, if any.
    ///
    /// Soft drop fires on press and on terminal auto-repeat; other actions
    /// fire on press only.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<GameAction> {
        if let Some(dir) = horizontal_key(key.code) {
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    self.held = Some(dir);
                    self.last_key_time = Instant::now();
                }
                KeyEventKind::Release => {
                    if self.held == Some(dir) {
                        self.held = None;
                    }
                }
            }
            return None;
        }

        let action = handle_key_event(key)?;
        match key.kind {
            KeyEventKind::Press => Some(action),
            KeyEventKind::Repeat if action == GameAction::SoftDrop => Some(action),
            _ => None,
        }
    }

    /// Held-key state for this frame, releasing a direction that has gone
    /// stale without fresh key events.
    pub fn state(&mut self) -> InputState {
        let timeout = Duration::from_millis(u64::from(self.key_release_timeout_ms));
        if self.held.is_some() && self.last_key_time.elapsed() > timeout {
            self.held = None;
        }

        InputState::new(self.held == Some(-1), self.held == Some(1))
    }

    pub fn reset(&mut self) {
        self.held = None;
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn event(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn press_and_release_track_direction() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_event(event(KeyCode::Left, KeyEventKind::Press)), None);
        assert_eq!(ih.state(), InputState::new(true, false));

        ih.handle_key_event(event(KeyCode::Left, KeyEventKind::Release));
        assert_eq!(ih.state(), InputState::default());
    }

    #[test]
    fn latest_direction_wins() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        ih.handle_key_event(event(KeyCode::Left, KeyEventKind::Press));
        ih.handle_key_event(event(KeyCode::Right, KeyEventKind::Press));
        assert_eq!(ih.state(), InputState::new(false, true));

        // Releasing the stale key does not cancel the newer one.
        ih.handle_key_event(event(KeyCode::Left, KeyEventKind::Release));
        assert_eq!(ih.state(), InputState::new(false, true));
    }

    #[test]
    fn test_auto_release_triggers_after_timeout_without_key_release_events() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(50);

        ih.handle_key_event(event(KeyCode::Right, KeyEventKind::Press));
        assert!(ih.state().right);

        // Simulate no key-release events by moving the last key time into the past.
        ih.last_key_time = Instant::now() - Duration::from_millis(51);
        assert_eq!(ih.state(), InputState::default());
    }

    #[test]
    fn test_non_movement_key_does_not_extend_auto_release_timeout() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(50);

        ih.handle_key_event(event(KeyCode::Left, KeyEventKind::Press));
        ih.last_key_time = Instant::now() - Duration::from_millis(51);
        assert_eq!(
            ih.handle_key_event(event(KeyCode::Up, KeyEventKind::Press)),
            Some(GameAction::RotateCw)
        );

        assert_eq!(ih.state(), InputState::default());
    }

    #[test]
    fn only_soft_drop_repeats() {
        let mut ih = InputHandler::new();

        assert_eq!(
            ih.handle_key_event(event(KeyCode::Down, KeyEventKind::Repeat)),
            Some(GameAction::SoftDrop)
        );
        assert_eq!(ih.handle_key_event(event(KeyCode::Up, KeyEventKind::Repeat)), None);
        assert_eq!(ih.handle_key_event(event(KeyCode::Char(' '), KeyEventKind::Release)), None);
    }

    #[test]
    fn test_default_key_release_timeout_is_non_zero() {
        let ih = InputHandler::new();
        assert_eq!(ih.key_release_timeout_ms(), DEFAULT_KEY_RELEASE_TIMEOUT_MS);
    }

    #[test]
    fn test_reset_clears_held_state() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        ih.handle_key_event(event(KeyCode::Left, KeyEventKind::Press));
        ih.reset();
        assert_eq!(ih.state(), InputState::default());
    }
}
