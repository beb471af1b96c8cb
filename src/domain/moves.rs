//! Host-produced move descriptors and the two side-effect tags the widget
//! pattern-matches on: castling SAN and the en-passant flag.

use serde::{Deserialize, Serialize};

use crate::domain::coords::BoardSquare;
use crate::domain::piece::{PieceColor, PieceKind};

/// Description of a completed move, produced by the host's legality
/// callback and consumed by the widget. The widget never derives one of
/// these itself.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MoveDescriptor {
    pub from: String,
    pub to: String,
    pub san: String,
    #[serde(default)]
    pub en_passant: bool,
    #[serde(default)]
    pub flags: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured: Option<PieceKind>,
    pub color: PieceColor,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CastleSide {
    King,
    Queen,
}

impl MoveDescriptor {
    /// Detect a castling move from its SAN, ignoring check/mate suffixes.
    pub fn castle(&self) -> Option<CastleSide> {
        match self.san.trim_end_matches(['+', '#']) {
            "O-O" => Some(CastleSide::King),
            "O-O-O" => Some(CastleSide::Queen),
            _ => None,
        }
    }

    /// The host marks en passant either with the dedicated field or with an
    /// `'e'` in the flags string.
    pub fn is_en_passant(&self) -> bool {
        self.en_passant || self.flags.contains('e')
    }
}

/// The rook's (from, to) squares for a castling move by `color`.
pub fn rook_relocation(side: CastleSide, color: PieceColor) -> (BoardSquare, BoardSquare) {
    let row = match color {
        PieceColor::White => 7,
        PieceColor::Black => 0,
    };
    match side {
        CastleSide::King => (BoardSquare { row, col: 7 }, BoardSquare { row, col: 5 }),
        CastleSide::Queen => (BoardSquare { row, col: 0 }, BoardSquare { row, col: 3 }),
    }
}

/// The square holding the captured pawn of an en-passant move: one rank
/// behind the destination, from the mover's point of view.
pub fn en_passant_capture_square(to: BoardSquare, color: PieceColor) -> BoardSquare {
    let row = match color {
        PieceColor::White => to.row + 1,
        PieceColor::Black => to.row - 1,
    };
    BoardSquare { row, col: to.col }
}
