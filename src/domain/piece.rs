//! Piece types shared by the whole widget.
//! No GPUI dependencies - this is the domain layer.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// FEN letter for this kind, lowercase
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn opposite(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl Piece {
    pub fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self { kind, color }
    }

    /// FEN character: uppercase for white, lowercase for black
    pub fn fen_char(self) -> char {
        match self.color {
            PieceColor::White => self.kind.letter().to_ascii_uppercase(),
            PieceColor::Black => self.kind.letter(),
        }
    }

    pub fn from_fen_char(c: char) -> Option<Self> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        Some(Piece { kind, color })
    }

    /// All twelve piece/color combinations, in sprite-preload order.
    pub fn all() -> impl Iterator<Item = Piece> {
        const KINDS: [PieceKind; 6] = [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::King,
        ];
        [PieceColor::White, PieceColor::Black]
            .into_iter()
            .flat_map(|color| KINDS.into_iter().map(move |kind| Piece { kind, color }))
    }
}

/// The four promotion choices, in the order they are presented.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_char_round_trip() {
        for piece in Piece::all() {
            assert_eq!(Piece::from_fen_char(piece.fen_char()), Some(piece));
        }
        assert_eq!(Piece::all().count(), 12);
    }

    #[test]
    fn test_fen_char_case() {
        let wq = Piece::new(PieceKind::Queen, PieceColor::White);
        let bq = Piece::new(PieceKind::Queen, PieceColor::Black);
        assert_eq!(wq.fen_char(), 'Q');
        assert_eq!(bq.fen_char(), 'q');
        assert_eq!(Piece::from_fen_char('x'), None);
    }
}
