use crate::pieces::{self, Matrix, Piece};
use crate::types::{GameStatus, Orientation, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub orientation: Orientation,
    pub x: i8,
    pub y: i8,
}

impl PieceSnapshot {
    pub fn matrix(&self) -> Matrix {
        pieces::matrix(self.kind, self.orientation)
    }
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            orientation: value.orientation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Everything the presentation layer reads, copied out of a `GameState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Locked cells as piece codes, 0 = empty
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: Option<PieceSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub preview: [PieceKind; 2],
    pub can_hold: bool,
    pub status: GameStatus,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub flash_ms: u32,
    pub shake: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status == GameStatus::Active
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: None,
            ghost_y: None,
            hold: None,
            preview: [PieceKind::I; 2],
            can_hold: true,
            status: GameStatus::Active,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: 0,
            flash_ms: 0,
            shake: 0,
        }
    }
}
