//! Layer compositing over recorded display lists. The platform binding
//! replays surfaces in stack order; nothing in here touches GPUI.

pub mod layers;
pub mod surface;

pub use layers::{AnimationEntry, LayerStack};
pub use surface::{DrawOp, Surface};
