//! Drag and promotion-prompt session state.
//!
//! The transitions themselves live on the widget facade, which owns the
//! board and the layer stack the machine drives; this module holds the
//! session data and the pure layout of the promotion choices.

use crate::domain::{BoardSquare, PROMOTION_KINDS, Piece, PieceColor, PieceKind, ViewSquare};
use crate::interact::callbacks::PromotionCallback;
use crate::interact::events::PointerPoint;

/// State held between pickup and drop/cancel. The held piece is removed
/// from the board for the duration, so it only renders as the floating
/// sprite.
pub struct DragSession {
    pub piece: Piece,
    pub from_view: ViewSquare,
    pub from_board: BoardSquare,
    pub start_pointer: PointerPoint,
    pub pointer: PointerPoint,
}

/// State held while the promotion prompt is open. Movement is suspended;
/// the saved flag is restored on exit.
pub struct PromotionPrompt {
    pub target: BoardSquare,
    pub color: PieceColor,
    pub choices: [(ViewSquare, PieceKind); 4],
    pub callback: PromotionCallback,
    pub movement_was_enabled: bool,
    /// Pawn detached by the drag that opened this prompt, returned to its
    /// origin square if the prompt is dismissed. Absent for prompts opened
    /// through the facade.
    pub held_pawn: Option<(BoardSquare, Piece)>,
}

/// The interaction state machine's three states.
pub enum InteractionState {
    Idle,
    Dragging(DragSession),
    Prompting(PromotionPrompt),
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }
}

/// Lay out the four promotion choices in a column starting at the target
/// square and walking toward the board center, queen first.
pub fn promotion_choices(target: ViewSquare) -> [(ViewSquare, PieceKind); 4] {
    let toward_center: isize = if target.row <= 3 { 1 } else { -1 };
    let mut choices = [(target, PieceKind::Queen); 4];
    for (i, kind) in PROMOTION_KINDS.into_iter().enumerate() {
        let row = target.row as isize + toward_center * i as isize;
        choices[i] = (
            ViewSquare {
                row: row as usize,
                col: target.col,
            },
            kind,
        );
    }
    choices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choices_walk_down_from_top_rank() {
        let choices = promotion_choices(ViewSquare { row: 0, col: 4 });
        let rows: Vec<usize> = choices.iter().map(|(sq, _)| sq.row).collect();
        assert_eq!(rows, vec![0, 1, 2, 3]);
        assert!(choices.iter().all(|(sq, _)| sq.col == 4));
        assert_eq!(choices[0].1, PieceKind::Queen);
        assert_eq!(choices[3].1, PieceKind::Knight);
    }

    #[test]
    fn test_choices_walk_up_from_bottom_rank() {
        let choices = promotion_choices(ViewSquare { row: 7, col: 0 });
        let rows: Vec<usize> = choices.iter().map(|(sq, _)| sq.row).collect();
        assert_eq!(rows, vec![7, 6, 5, 4]);
    }
}
