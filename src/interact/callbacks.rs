//! The host callback surface, as one configuration struct with named
//! optional fields. Every hook is optional; an unset hook is skipped.

use crate::domain::{MoveDescriptor, Piece, PieceColor};
use crate::interact::events::InteractionEvent;

/// What the host's legality callback decided about a drop.
pub enum DropVerdict {
    /// Not a legal move; the piece snaps back to its origin square.
    Reject,
    /// Apply the move as described, including any castling or en-passant
    /// side effects carried by the descriptor.
    Move(MoveDescriptor),
    /// The move needs a promotion choice first. The widget opens the
    /// prompt on the drop square and reports the outcome to `on_choice`.
    AwaitPromotion {
        color: PieceColor,
        on_choice: PromotionCallback,
    },
}

/// Completion callback for a promotion prompt: `(true, Some(piece))` for a
/// confirmed choice, `(false, None)` for a dismissal.
pub type PromotionCallback = Box<dyn FnOnce(bool, Option<Piece>)>;

type EventHook = Box<dyn FnMut(&InteractionEvent)>;

#[derive(Default)]
pub struct Callbacks {
    pub on_left_click: Option<EventHook>,
    /// Consulted when a drag is released on a new square. Absent means
    /// every drop is applied as a plain move with no side effects.
    pub on_left_click_release: Option<Box<dyn FnMut(&InteractionEvent) -> DropVerdict>>,
    pub on_left_click_drag: Option<EventHook>,
    pub on_right_click: Option<EventHook>,
    pub on_right_click_release: Option<EventHook>,
    pub on_right_click_drag: Option<EventHook>,
    pub on_mouse_out: Option<EventHook>,
    /// Fired when a drag is cancelled and the piece returns to its origin.
    pub on_cancel: Option<EventHook>,
    /// Fired after a resize with the new (pixel, square) sizes.
    pub on_resize: Option<Box<dyn FnMut(f32, f32)>>,
    /// Fired once, when sprite preloading succeeds.
    pub on_load: Option<Box<dyn FnMut()>>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }
}
