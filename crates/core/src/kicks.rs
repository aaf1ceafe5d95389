//! Rotation system - SRS wall kick tables
//!
//! A rotation tries up to five offsets for the target orientation and keeps
//! the first one that does not collide. S, Z, L, J and T share one table, the
//! I piece has its own, and the O piece never rotates.
//!
//! Offsets are (dx, dy) in board coordinates, where y grows downward, so an
//! upward kick has a negative dy.
//! Reference: https://tetris.wiki/Super_Rotation_System

use crate::pieces::Piece;
use crate::types::{Orientation, PieceKind, RotateDirection};

/// A single kick offset (dx, dy)
pub type Kick = (i8, i8);

/// Ordered kick candidates for one transition; the first is always (0, 0)
pub type KickList = [Kick; 5];

/// One of the eight orientation transitions a rotation can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    NorthToEast,
    EastToSouth,
    SouthToWest,
    WestToNorth,
    EastToNorth,
    SouthToEast,
    WestToSouth,
    NorthToWest,
}

impl Transition {
    /// The transition between two orientations, if they are a quarter-turn apart
    pub fn new(from: Orientation, to: Orientation) -> Option<Self> {
        use Orientation::*;
        match (from, to) {
            (North, East) => Some(Transition::NorthToEast),
            (East, South) => Some(Transition::EastToSouth),
            (South, West) => Some(Transition::SouthToWest),
            (West, North) => Some(Transition::WestToNorth),
            (East, North) => Some(Transition::EastToNorth),
            (South, East) => Some(Transition::SouthToEast),
            (West, South) => Some(Transition::WestToSouth),
            (North, West) => Some(Transition::NorthToWest),
            _ => None,
        }
    }

    pub fn turn(from: Orientation, direction: RotateDirection) -> Self {
        match Self::new(from, from.turn(direction)) {
            Some(t) => t,
            None => unreachable!("a quarter turn always has a kick entry"),
        }
    }

    pub fn from(&self) -> Orientation {
        match self {
            Transition::NorthToEast | Transition::NorthToWest => Orientation::North,
            Transition::EastToSouth | Transition::EastToNorth => Orientation::East,
            Transition::SouthToWest | Transition::SouthToEast => Orientation::South,
            Transition::WestToNorth | Transition::WestToSouth => Orientation::West,
        }
    }

    pub fn to(&self) -> Orientation {
        match self {
            Transition::WestToNorth | Transition::EastToNorth => Orientation::North,
            Transition::NorthToEast | Transition::SouthToEast => Orientation::East,
            Transition::EastToSouth | Transition::WestToSouth => Orientation::South,
            Transition::SouthToWest | Transition::NorthToWest => Orientation::West,
        }
    }
}

/// JLSTZ kick table (shared by S, Z, L, J, T)
const JLSTZ_KICKS: [KickList; 8] = [
    // 0->1
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 1->2
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 2->3
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 3->0
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 1->0
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 2->1
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 3->2
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 0->3
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
];

/// I piece kick table
const I_KICKS: [KickList; 8] = [
    // 0->1
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 1->2
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 2->3
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 3->0
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
    // 1->0
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 2->1
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
    // 3->2
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 0->3
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
];

/// O piece has no kicks (it never rotates)
const O_KICKS: KickList = [(0, 0); 5];

fn table_index(transition: Transition) -> usize {
    match transition {
        Transition::NorthToEast => 0,
        Transition::EastToSouth => 1,
        Transition::SouthToWest => 2,
        Transition::WestToNorth => 3,
        Transition::EastToNorth => 4,
        Transition::SouthToEast => 5,
        Transition::WestToSouth => 6,
        Transition::NorthToWest => 7,
    }
}

/// Kick candidates for a kind and transition
pub fn kicks(kind: PieceKind, transition: Transition) -> &'static KickList {
    match kind {
        PieceKind::O => &O_KICKS,
        PieceKind::I => &I_KICKS[table_index(transition)],
        _ => &JLSTZ_KICKS[table_index(transition)],
    }
}

/// Kick candidates for `from -> to`.
///
/// # Panics
///
/// Panics if the orientations are not a quarter-turn apart; only the eight
/// quarter-turn transitions have kick data.
pub fn kicks_for(kind: PieceKind, from: Orientation, to: Orientation) -> &'static KickList {
    let Some(transition) = Transition::new(from, to) else {
        panic!("no kick data for rotation {:?} -> {:?}", from, to);
    };
    kicks(kind, transition)
}

/// Try to rotate a piece with wall kicks.
///
/// `collides` reports whether a candidate placement is blocked. Returns the
/// rotated piece and the kick that was applied, or `None` when the piece is an
/// O or every candidate collides.
pub fn try_rotate(
    piece: &Piece,
    direction: RotateDirection,
    collides: impl Fn(&Piece) -> bool,
) -> Option<(Piece, Kick)> {
    if piece.kind == PieceKind::O {
        return None;
    }

    let transition = Transition::turn(piece.orientation, direction);
    kicks(piece.kind, transition).iter().find_map(|&(dx, dy)| {
        let candidate = piece.turned(transition.to(), dx, dy);
        (!collides(&candidate)).then_some((candidate, (dx, dy)))
    })
}
