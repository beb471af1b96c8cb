//! A drawing surface as a recorded display list.
//!
//! The widget owns plain surfaces rather than inheriting from a platform
//! canvas type; the platform binding replays each surface's ops in order.
//! Coordinates are device pixels (the compositor has already applied the
//! device scale factor).

use crate::sprites::SpriteHandle;

#[derive(Clone, PartialEq, Debug)]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: u32,
        alpha: f32,
    },
    Sprite {
        handle: SpriteHandle,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
    Label {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: u32,
    },
}

#[derive(Default)]
pub struct Surface {
    ops: Vec<DrawOp>,
    size_px: f32,
    blurred: bool,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize to a square of `size_px` device pixels. Like a real canvas,
    /// resizing discards the current contents.
    pub fn resize(&mut self, size_px: f32) {
        self.size_px = size_px;
        self.ops.clear();
        self.blurred = false;
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: u32) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            w,
            h,
            color,
            alpha: 1.0,
        });
    }

    /// A translucent fill, used for the promotion overlay.
    pub fn fill_rect_alpha(&mut self, x: f32, y: f32, w: f32, h: f32, color: u32, alpha: f32) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            w,
            h,
            color,
            alpha,
        });
    }

    pub fn sprite(&mut self, handle: &SpriteHandle, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(DrawOp::Sprite {
            handle: handle.clone(),
            x,
            y,
            w,
            h,
        });
    }

    pub fn label(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32, color: u32) {
        self.ops.push(DrawOp::Label {
            text: text.into(),
            x,
            y,
            size,
            color,
        });
    }

    /// Softening filter flag, applied to the whole surface on replay.
    pub fn set_blur(&mut self, blurred: bool) {
        self.blurred = blurred;
    }

    pub fn is_blurred(&self) -> bool {
        self.blurred
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }
}
