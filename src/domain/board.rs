//! The 8x8 board array and the FEN placement-field codec.
//!
//! Storage is row-major with rank 8 at row 0 and is always board space;
//! flipping the widget never reorders it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::coords::BoardSquare;
use crate::domain::piece::Piece;

#[derive(Debug, Error, PartialEq)]
pub enum FenError {
    #[error("placement field has {0} ranks, expected 8")]
    WrongRankCount(usize),
    #[error("rank {rank} describes more than 8 squares")]
    RankTooLong { rank: usize },
    #[error("rank {rank} describes only {squares} squares")]
    RankTooShort { rank: usize, squares: usize },
    #[error("unrecognized character {ch:?} in rank {rank}")]
    UnknownChar { rank: usize, ch: char },
}

/// An 8x8 grid of occupant-or-empty squares.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Placement field of the standard starting position.
    pub const STARTING_PLACEMENT: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    pub fn starting() -> Self {
        Self::from_placement(Self::STARTING_PLACEMENT).expect("standard placement is valid")
    }

    /// Decode a FEN placement field (the first space-separated field of a
    /// full FEN record). Fails fast on malformed input.
    pub fn from_placement(placement: &str) -> Result<Self, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount(ranks.len()));
        }

        let mut board = Board::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let fen_rank = 8 - row; // for error reporting, rank 8 comes first
            let mut col = 0usize;
            for ch in rank.chars() {
                if let Some(run) = ch.to_digit(10) {
                    if run == 0 {
                        return Err(FenError::UnknownChar { rank: fen_rank, ch });
                    }
                    col += run as usize;
                } else if let Some(piece) = Piece::from_fen_char(ch) {
                    if col >= 8 {
                        return Err(FenError::RankTooLong { rank: fen_rank });
                    }
                    board.squares[row][col] = Some(piece);
                    col += 1;
                } else {
                    return Err(FenError::UnknownChar { rank: fen_rank, ch });
                }
            }
            if col > 8 {
                return Err(FenError::RankTooLong { rank: fen_rank });
            }
            if col < 8 {
                return Err(FenError::RankTooShort {
                    rank: fen_rank,
                    squares: col,
                });
            }
        }
        Ok(board)
    }

    /// Encode back to a placement field. Inverse of [`Board::from_placement`].
    pub fn placement(&self) -> String {
        let mut out = String::new();
        for (row, rank) in self.squares.iter().enumerate() {
            let mut run = 0u32;
            for square in rank {
                match square {
                    Some(piece) => {
                        if run > 0 {
                            out.push(char::from_digit(run, 10).expect("run is at most 8"));
                            run = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => run += 1,
                }
            }
            if run > 0 {
                out.push(char::from_digit(run, 10).expect("run is at most 8"));
            }
            if row < 7 {
                out.push('/');
            }
        }
        out
    }

    pub fn piece_at(&self, sq: BoardSquare) -> Option<Piece> {
        self.squares[sq.row][sq.col]
    }

    pub fn set(&mut self, sq: BoardSquare, piece: Option<Piece>) {
        self.squares[sq.row][sq.col] = piece;
    }

    /// Remove and return the occupant of a square.
    pub fn take(&mut self, sq: BoardSquare) -> Option<Piece> {
        self.squares[sq.row][sq.col].take()
    }

    /// Iterate over occupied squares in board space.
    pub fn occupied(&self) -> impl Iterator<Item = (BoardSquare, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, rank)| {
            rank.iter().enumerate().filter_map(move |(col, square)| {
                square.map(|piece| (BoardSquare { row, col }, piece))
            })
        })
    }
}
