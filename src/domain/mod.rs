//! Pure widget domain: pieces, the board array, coordinate mapping, and
//! move descriptors. No GPUI dependencies.

pub mod board;
pub mod coords;
pub mod moves;
pub mod piece;

pub use board::{Board, FenError};
pub use coords::{
    BoardSquare, Orientation, SquareError, ViewSquare, algebraic_to_board, algebraic_to_view,
    board_to_algebraic, board_to_view, pixel_to_square, pixel_to_square_clamped, view_to_algebraic,
    view_to_board,
};
pub use moves::{CastleSide, MoveDescriptor, en_passant_capture_square, rook_relocation};
pub use piece::{PROMOTION_KINDS, Piece, PieceColor, PieceKind};
