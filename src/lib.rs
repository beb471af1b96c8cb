//! An embeddable chessboard widget: layered-surface rendering plus a
//! pointer-driven drag state machine.
//!
//! The widget draws an 8x8 board and piece sprites onto a stack of six
//! recorded-display-list surfaces and lets a user pick up, drag, and drop
//! pieces. It implements no chess rules: move legality, promotion
//! detection, and the castling/en-passant side effects are decided by the
//! host through the [`interact::Callbacks`] surface and fed back as
//! [`domain::MoveDescriptor`]s.

pub mod domain;
pub mod interact;
pub mod render;
pub mod sprites;
pub mod ui;
pub mod widget;

pub use domain::{Board, FenError, MoveDescriptor, Orientation, Piece, PieceColor, PieceKind};
pub use interact::{Callbacks, DropVerdict, InteractionEvent, PointerButton, PointerPoint};
pub use render::{AnimationEntry, LayerStack};
pub use sprites::{SpriteHandle, SpriteSet, SpriteSource};
pub use widget::{BoardOptions, Chessboard, Dimensions, SquareInfo, StartPosition};
