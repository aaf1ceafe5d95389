//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on terminal, input, or I/O code, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule has unit tests next to it
//! - **Portable**: Any frontend can drive it with `update` plus one-shot commands
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 game board with collision detection and line clearing
//! - [`pieces`]: Shape templates, derived rotation matrices and the active piece
//! - [`kicks`]: SRS wall kick tables keyed by typed orientation transitions
//! - [`rng`]: 7-bag random piece generation on a seeded LCG
//! - [`scoring`]: Line clear points, drop points and the gravity curve
//! - [`game_state`]: Gravity, DAS/ARR, lock delay, hold and the game lifecycle
//! - [`snapshot`]: Plain-data view of a game for renderers
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every seven draws from a bag boundary contain each kind once
//! - **SRS Rotation**: five kick candidates per turn; the O piece never rotates
//! - **Lock Delay**: 500ms once grounded, restarted whenever the piece can fall again
//! - **Hold**: one swap per locked piece
//! - **Scoring**: `[0, 100, 300, 500, 800][lines] * level`, +1 per soft drop row,
//!   +2 per hard drop row
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, InputState};
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//! game.update(16, InputState::default());
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! assert!(game.take_last_event().is_some());
//! ```

pub mod board;
pub mod game_state;
pub mod kicks;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::Board;
pub use game_state::{GameState, PREVIEW_LEN};
pub use kicks::{kicks_for, try_rotate, Kick, KickList, Transition};
pub use pieces::{get_shape, Matrix, Piece};
pub use rng::{RandomQueue, SimpleRng};
pub use scoring::{drop_interval_ms, drop_score, level_for_lines, line_clear_score};
pub use snapshot::{GameSnapshot, PieceSnapshot};
