//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the rule core, the input layer and the terminal frontend alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! Rows above the board (negative y) exist only for spawning pieces; they are
//! never stored.
//!
//! # Timing Constants
//!
//! All timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval used by the terminal runner (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_INTERVAL_STEP_MS` | 70 | Gravity speed-up per level |
//! | `DROP_INTERVAL_MIN_MS` | 80 | Gravity interval floor |
//! | `LOCK_DELAY_MS` | 500 | Time a grounded piece waits before locking |
//! | `DAS_MS` | 150 | Delayed auto shift before horizontal repeat starts |
//! | `ARR_MS` | 40 | Auto repeat rate once DAS has elapsed |
//!
//! # Scoring
//!
//! Line clears award `LINE_SCORES[n] * level`. Soft drop awards 1 point per
//! cell, hard drop 2 points per cell. The level is `lines / 10 + 1`.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Orientation, PieceKind, RotateDirection, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let orientation = Orientation::North.turn(RotateDirection::Clockwise);
//! assert_eq!(orientation, Orientation::East);
//! assert_eq!(orientation.index(), 1);
//!
//! assert_eq!(PieceKind::I.matrix_size(), 4);
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Frame interval of the terminal runner (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (one row per second)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level
pub const DROP_INTERVAL_STEP_MS: u32 = 70;

/// Gravity interval floor
pub const DROP_INTERVAL_MIN_MS: u32 = 80;

/// Lock delay for a grounded piece
pub const LOCK_DELAY_MS: u32 = 500;

/// DAS (Delayed Auto Shift) delay
pub const DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) interval
pub const ARR_MS: u32 = 40;

/// Lines needed per level step
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table, indexed by rows cleared at once.
///
/// Multiplied by the current level (levels start at 1).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Flash countdown added per cleared row (advisory, no gameplay effect)
pub const FLASH_MS_PER_LINE: u32 = 60;

/// Shake intensity added per cleared row (advisory, no gameplay effect)
pub const SHAKE_PER_LINE: u32 = 80;

/// Shake intensity for a lock that clears nothing
pub const LANDING_SHAKE: u32 = 30;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_constants() {
        assert_eq!(LOCK_DELAY_MS, 500);
        assert_eq!(DAS_MS, 150);
        assert_eq!(ARR_MS, 40);
        assert_eq!(BASE_DROP_MS, 1000);
        assert_eq!(DROP_INTERVAL_MIN_MS, 80);
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
        assert!(LANDING_SHAKE < SHAKE_PER_LINE);
    }

    #[test]
    fn orientation_turns_wrap() {
        for o in Orientation::ALL {
            assert_eq!(o.cw().ccw(), o);
            assert_eq!(o.cw().cw().cw().cw(), o);
            assert_eq!(o.cw().index(), (o.index() + 1) % 4);
            assert_eq!(o.ccw().index(), (o.index() + 3) % 4);
        }
    }

    #[test]
    fn piece_codes_are_unique_and_nonzero() {
        for kind in PieceKind::ALL {
            assert_ne!(kind.code(), 0);
            assert_eq!(PieceKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(PieceKind::from_code(0), None);
        assert_eq!(PieceKind::from_code(8), None);
    }

    #[test]
    fn input_state_prefers_left_when_both_held() {
        assert_eq!(InputState::default().horizontal(), None);
        assert_eq!(InputState::new(true, false).horizontal(), Some(-1));
        assert_eq!(InputState::new(false, true).horizontal(), Some(1));
        assert_eq!(InputState::new(true, true).horizontal(), Some(-1));
    }
}

/// The seven tetromino piece kinds
///
/// Each kind has a square shape template: 2x2 for O, 4x4 for I and 3x3 for
/// the rest. Locked cells keep their kind so the frontend can colour them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    S,
    Z,
    L,
    J,
    T,
    O,
    I,
}

impl PieceKind {
    /// All kinds, in bag refill order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
        PieceKind::O,
        PieceKind::I,
    ];

    /// Side length of the kind's square shape matrix
    pub fn matrix_size(&self) -> u8 {
        match self {
            PieceKind::O => 2,
            PieceKind::I => 4,
            _ => 3,
        }
    }

    /// Non-zero grid code used by snapshots (0 means empty)
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::S => 1,
            PieceKind::Z => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::T => 5,
            PieceKind::O => 6,
            PieceKind::I => 7,
        }
    }

    /// Inverse of [`PieceKind::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::S),
            2 => Some(PieceKind::Z),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::J),
            5 => Some(PieceKind::T),
            6 => Some(PieceKind::O),
            7 => Some(PieceKind::I),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_str(), "i");
    /// assert_eq!(PieceKind::O.as_str(), "o");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::T => "t",
            PieceKind::O => "o",
            PieceKind::I => "i",
        }
    }
}

/// Rotation direction of a rotate command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

/// Orientation of a piece in clockwise quarter-turns from spawn
///
/// - **North**: spawn orientation (0)
/// - **East**: one clockwise turn (1)
/// - **South**: two turns (2)
/// - **West**: three clockwise turns, or one counter-clockwise (3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    North,
    East,
    South,
    West,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::East,
        Orientation::South,
        Orientation::West,
    ];

    /// Number of clockwise quarter-turns from spawn (0..=3)
    pub fn index(&self) -> u8 {
        match self {
            Orientation::North => 0,
            Orientation::East => 1,
            Orientation::South => 2,
            Orientation::West => 3,
        }
    }

    /// Orientation for a quarter-turn count, taken modulo 4
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % 4) as usize]
    }

    /// Rotate clockwise: `(from + 1) mod 4`
    pub fn cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise: `(from + 3) mod 4`
    pub fn ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    pub fn turn(&self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Clockwise => self.cw(),
            RotateDirection::CounterClockwise => self.ccw(),
        }
    }
}

/// One-shot game actions
///
/// Produced by the key map and applied with `GameState::apply_action`.
/// Horizontal auto-repeat is not an action: it is driven by [`InputState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (+1 point)
    SoftDrop,
    /// Drop piece to the floor and lock it (+2 points per cell)
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Swap the current piece with the hold slot
    Hold,
    /// Toggle pause
    Pause,
    /// Discard the session and start a fresh one
    Restart,
}

/// Level-triggered input sampled once per `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub fn new(left: bool, right: bool) -> Self {
        Self { left, right }
    }

    /// Held horizontal direction as a column delta. Left wins when both are held.
    pub fn horizontal(&self) -> Option<i8> {
        if self.left {
            Some(-1)
        } else if self.right {
            Some(1)
        } else {
            None
        }
    }
}

/// Session status as seen by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Active,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Active => "active",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "game_over",
        }
    }
}

/// Core-side event emitted after a piece locks.
///
/// Consumed by the runner's event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    /// The piece spawned after this lock collided, ending the game.
    pub topped_out: bool,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;
