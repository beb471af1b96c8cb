//! Theme constants for the GPUI shell around the widget.
//!
//! The square colors themselves live in [`crate::widget::BoardOptions`];
//! these are the constants of the hosting chrome.

// Layout constants
pub const BOARD_PADDING: f32 = 20.0;
pub const INITIAL_WINDOW_EDGE: f32 = 560.0;

// Panel colors
pub const PANEL_BG: u32 = 0x2a2a2a;

/// Opacity applied to a surface flagged as blurred (the replay has no real
/// blur filter, so it dims instead).
pub const BLUR_DIM_OPACITY: f32 = 0.35;
