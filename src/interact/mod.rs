//! Pointer-driven interaction: event payloads, the host callback surface,
//! and drag/promotion session state.

pub mod callbacks;
pub mod drag;
pub mod events;

pub use callbacks::{Callbacks, DropVerdict, PromotionCallback};
pub use drag::{DragSession, InteractionState, PromotionPrompt, promotion_choices};
pub use events::{InteractionEvent, PointerButton, PointerPoint};
