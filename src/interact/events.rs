//! Pointer input types and the payload handed to host callbacks.

use crate::domain::Piece;

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct PointerPoint {
    pub x: f32,
    pub y: f32,
}

impl PointerPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PointerButton {
    Left,
    Right,
}

/// Snapshot of the interaction state, passed to every host callback.
/// Squares are algebraic names under the current orientation mapping.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct InteractionEvent {
    /// Piece currently held by a drag, if any.
    pub dragging_piece: Option<Piece>,
    pub pointer: PointerPoint,
    /// Square under the pointer, clamped to the board edge.
    pub square: Option<String>,
    pub start_pointer: Option<PointerPoint>,
    /// Square where the gesture began.
    pub start_square: Option<String>,
    /// Piece on the square where the gesture began.
    pub selected_piece: Option<Piece>,
}
