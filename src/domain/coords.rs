//! Coordinate systems and the conversions between them.
//!
//! Three spaces are in play: *board* space (row 0 = rank 8, fixed for the
//! lifetime of the widget), *view* space (what gets drawn; equal to board
//! space until the board is flipped), and *pixel* space. Storage is always
//! board space; orientation is purely a rendering and pointer-mapping
//! concern, applied explicitly at each conversion.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SquareError {
    #[error("pointer ({x}, {y}) falls outside the board")]
    OutOfBounds { x: f32, y: f32 },
    #[error("invalid algebraic square name {0:?}")]
    BadAlgebraic(String),
}

/// Which player sits at the bottom of the view.
#[derive(Clone, Copy, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
pub enum Orientation {
    White,
    Black,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::White => Orientation::Black,
            Orientation::Black => Orientation::White,
        }
    }

    pub fn is_flipped(self) -> bool {
        self == Orientation::Black
    }
}

/// A square in view space: row 0 is drawn at the top of the canvas.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ViewSquare {
    pub row: usize,
    pub col: usize,
}

/// A square in board space: row 0 = rank 8, col 0 = file a.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BoardSquare {
    pub row: usize,
    pub col: usize,
}

/// Convert a pixel position to the view square under it.
/// Positions outside the 8x8 area are an error; callers that prefer the
/// nearest edge square use [`pixel_to_square_clamped`].
pub fn pixel_to_square(x: f32, y: f32, square_size: f32) -> Result<ViewSquare, SquareError> {
    if x < 0.0 || y < 0.0 {
        return Err(SquareError::OutOfBounds { x, y });
    }
    let col = (x / square_size) as usize;
    let row = (y / square_size) as usize;
    if row < 8 && col < 8 {
        Ok(ViewSquare { row, col })
    } else {
        Err(SquareError::OutOfBounds { x, y })
    }
}

/// Like [`pixel_to_square`] but clamps out-of-range positions to the
/// nearest edge square.
pub fn pixel_to_square_clamped(x: f32, y: f32, square_size: f32) -> ViewSquare {
    let col = ((x.max(0.0) / square_size) as usize).min(7);
    let row = ((y.max(0.0) / square_size) as usize).min(7);
    ViewSquare { row, col }
}

pub fn view_to_board(sq: ViewSquare, orientation: Orientation) -> BoardSquare {
    if orientation.is_flipped() {
        BoardSquare {
            row: 7 - sq.row,
            col: 7 - sq.col,
        }
    } else {
        BoardSquare {
            row: sq.row,
            col: sq.col,
        }
    }
}

pub fn board_to_view(sq: BoardSquare, orientation: Orientation) -> ViewSquare {
    if orientation.is_flipped() {
        ViewSquare {
            row: 7 - sq.row,
            col: 7 - sq.col,
        }
    } else {
        ViewSquare {
            row: sq.row,
            col: sq.col,
        }
    }
}

/// Parse an algebraic name ("e4") into board space.
pub fn algebraic_to_board(name: &str) -> Result<BoardSquare, SquareError> {
    let bad = || SquareError::BadAlgebraic(name.to_owned());
    let mut chars = name.chars();
    let file = chars.next().ok_or_else(bad)?;
    let rank = chars.next().ok_or_else(bad)?;
    if chars.next().is_some() {
        return Err(bad());
    }
    if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return Err(bad());
    }
    let col = file as usize - 'a' as usize;
    let row = 7 - (rank as usize - '1' as usize);
    Ok(BoardSquare { row, col })
}

pub fn board_to_algebraic(sq: BoardSquare) -> String {
    let file = (b'a' + sq.col as u8) as char;
    let rank = (b'1' + (7 - sq.row) as u8) as char;
    format!("{file}{rank}")
}

pub fn algebraic_to_view(name: &str, orientation: Orientation) -> Result<ViewSquare, SquareError> {
    Ok(board_to_view(algebraic_to_board(name)?, orientation))
}

pub fn view_to_algebraic(sq: ViewSquare, orientation: Orientation) -> String {
    board_to_algebraic(view_to_board(sq, orientation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algebraic_view_inverse_all_squares() {
        for orientation in [Orientation::White, Orientation::Black] {
            for row in 0..8 {
                for col in 0..8 {
                    let sq = ViewSquare { row, col };
                    let name = view_to_algebraic(sq, orientation);
                    assert_eq!(algebraic_to_view(&name, orientation), Ok(sq));
                }
            }
        }
    }

    #[test]
    fn test_known_squares() {
        assert_eq!(algebraic_to_board("a8"), Ok(BoardSquare { row: 0, col: 0 }));
        assert_eq!(algebraic_to_board("h1"), Ok(BoardSquare { row: 7, col: 7 }));
        assert_eq!(algebraic_to_board("e2"), Ok(BoardSquare { row: 6, col: 4 }));
        assert_eq!(board_to_algebraic(BoardSquare { row: 4, col: 4 }), "e4");
    }

    #[test]
    fn test_flipped_mapping() {
        // From black's seat, a8 is drawn at the bottom right.
        assert_eq!(
            algebraic_to_view("a8", Orientation::Black),
            Ok(ViewSquare { row: 7, col: 7 })
        );
        assert_eq!(
            view_to_board(ViewSquare { row: 0, col: 0 }, Orientation::Black),
            BoardSquare { row: 7, col: 7 }
        );
    }

    #[test]
    fn test_bad_algebraic() {
        for name in ["", "e", "e9", "i4", "e44", "4e"] {
            assert!(algebraic_to_board(name).is_err(), "{name:?} should fail");
        }
    }

    #[test]
    fn test_pixel_to_square() {
        assert_eq!(
            pixel_to_square(0.0, 0.0, 60.0),
            Ok(ViewSquare { row: 0, col: 0 })
        );
        assert_eq!(
            pixel_to_square(130.0, 70.0, 60.0),
            Ok(ViewSquare { row: 1, col: 2 })
        );
        assert!(pixel_to_square(481.0, 10.0, 60.0).is_err());
        assert!(pixel_to_square(-1.0, 10.0, 60.0).is_err());
    }

    #[test]
    fn test_pixel_to_square_clamped() {
        assert_eq!(
            pixel_to_square_clamped(-5.0, 9999.0, 60.0),
            ViewSquare { row: 7, col: 0 }
        );
        assert_eq!(
            pixel_to_square_clamped(61.0, 61.0, 60.0),
            ViewSquare { row: 1, col: 1 }
        );
    }
}
