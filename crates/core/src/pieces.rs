//! Pieces module - tetromino shape matrices and the active piece
//!
//! Every kind has one constant square template. A rotated matrix is derived
//! from (kind, orientation) on demand; pieces never own a mutable copy.

use arrayvec::ArrayVec;

use crate::types::{Orientation, PieceKind, BOARD_WIDTH};

/// Offset of a single mino relative to the matrix's top-left cell, as (dx, dy)
pub type MinoOffset = (i8, i8);

/// Filled cells of a matrix in row-major order
pub type PieceShape = ArrayVec<MinoOffset, 16>;

/// Largest template side (the I piece)
pub const MAX_MATRIX_SIZE: usize = 4;

/// Square boolean shape matrix of side `size` (2, 3 or 4).
///
/// Cells outside `size x size` are always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    size: u8,
    cells: [[bool; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE],
}

impl Matrix {
    const fn from_rows(size: u8, rows: [[u8; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE]) -> Self {
        let mut cells = [[false; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE];
        let mut r = 0;
        while r < MAX_MATRIX_SIZE {
            let mut c = 0;
            while c < MAX_MATRIX_SIZE {
                cells[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self { size, cells }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the cell at (row, col) is filled. Out-of-range cells are empty.
    pub fn filled(&self, row: usize, col: usize) -> bool {
        row < self.size as usize && col < self.size as usize && self.cells[row][col]
    }

    /// The matrix turned a quarter clockwise: `rotated[r][c] = m[n-1-c][r]`
    pub fn rotated_cw(&self) -> Self {
        let n = self.size as usize;
        let mut cells = [[false; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE];
        for (r, row) in cells.iter_mut().enumerate().take(n) {
            for (c, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - c][r];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Filled cells as (dx, dy) offsets, row by row.
    pub fn minos(&self) -> PieceShape {
        let n = self.size as usize;
        let mut out = PieceShape::new();
        for r in 0..n {
            for c in 0..n {
                if self.cells[r][c] {
                    out.push((c as i8, r as i8));
                }
            }
        }
        out
    }

    /// Index of the first and last row holding a filled cell.
    pub fn filled_rows(&self) -> Option<(u8, u8)> {
        let n = self.size as usize;
        let mut rows = (0..n).filter(|&r| self.cells[r][..n].iter().any(|&c| c));
        let first = rows.next()?;
        let last = rows.last().unwrap_or(first);
        Some((first as u8, last as u8))
    }
}

const S_TEMPLATE: Matrix = Matrix::from_rows(3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const Z_TEMPLATE: Matrix = Matrix::from_rows(3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]);
const L_TEMPLATE: Matrix = Matrix::from_rows(3, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const J_TEMPLATE: Matrix = Matrix::from_rows(3, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const T_TEMPLATE: Matrix = Matrix::from_rows(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const O_TEMPLATE: Matrix = Matrix::from_rows(2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const I_TEMPLATE: Matrix = Matrix::from_rows(4, [[0; 4], [1, 1, 1, 1], [0; 4], [0; 4]]);

/// Spawn-orientation template for a kind
pub fn template(kind: PieceKind) -> &'static Matrix {
    match kind {
        PieceKind::S => &S_TEMPLATE,
        PieceKind::Z => &Z_TEMPLATE,
        PieceKind::L => &L_TEMPLATE,
        PieceKind::J => &J_TEMPLATE,
        PieceKind::T => &T_TEMPLATE,
        PieceKind::O => &O_TEMPLATE,
        PieceKind::I => &I_TEMPLATE,
    }
}

/// Shape matrix of `kind` after `orientation.index()` clockwise turns
pub fn matrix(kind: PieceKind, orientation: Orientation) -> Matrix {
    let mut m = *template(kind);
    for _ in 0..orientation.index() {
        m = m.rotated_cw();
    }
    m
}

/// Mino offsets for a kind and orientation
pub fn get_shape(kind: PieceKind, orientation: Orientation) -> PieceShape {
    matrix(kind, orientation).minos()
}

/// Spawn position (x, y) of the matrix's top-left cell.
///
/// Centered horizontally. The I piece starts one row higher so its filled
/// row lands on board row 0 like the top row of every other kind.
pub fn spawn_position(kind: PieceKind) -> (i8, i8) {
    let size = kind.matrix_size() as i8;
    let x = (BOARD_WIDTH as i8) / 2 - (size + 1) / 2;
    let y = if kind == PieceKind::I { -1 } else { 0 };
    (x, y)
}

/// A tetromino instance on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub orientation: Orientation,
    pub x: i8,
    pub y: i8,
    /// Set once merged into the board; a locked piece must be replaced.
    pub locked: bool,
}

impl Piece {
    /// Create a piece at its spawn position and orientation
    pub fn spawn(kind: PieceKind) -> Self {
        let (x, y) = spawn_position(kind);
        Self {
            kind,
            orientation: Orientation::North,
            x,
            y,
            locked: false,
        }
    }

    pub fn matrix(&self) -> Matrix {
        matrix(self.kind, self.orientation)
    }

    /// Absolute board coordinates of the filled cells
    pub fn cells(&self) -> ArrayVec<(i8, i8), 16> {
        self.matrix()
            .minos()
            .iter()
            .map(|&(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    /// Copy with a different orientation, shifted by (dx, dy)
    pub fn turned(&self, orientation: Orientation, dx: i8, dy: i8) -> Self {
        Self {
            orientation,
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}
