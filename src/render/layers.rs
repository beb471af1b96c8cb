//! The six-surface layer stack and the animation registry.
//!
//! Compositing order, bottom to top, is always: board, persistent-below,
//! transient-below, pieces, persistent-above, transient-above. Overlays
//! that must cover the pieces (the promotion prompt) draw on the above
//! surfaces; square markers and similar draw below.

use crate::domain::{
    Board, Orientation, Piece, PieceColor, PieceKind, ViewSquare, board_to_view, view_to_algebraic,
};
use crate::render::surface::Surface;
use crate::sprites::{SpriteHandle, SpriteSet};

/// Relative size of coordinate labels and their inset from the square edge.
const LABEL_SCALE: f32 = 0.25;
const LABEL_INSET: f32 = 0.05;

/// Opacity of the full-board dimming overlay behind the promotion choices.
const OVERLAY_ALPHA: f32 = 0.5;

/// One transient or persistent drawing registered above or below the
/// pieces. `kind` tags entries for bulk removal.
pub struct AnimationEntry {
    pub id: String,
    pub kind: String,
    pub draw: Box<dyn Fn(&mut Surface)>,
}

impl AnimationEntry {
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        draw: impl Fn(&mut Surface) + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            draw: Box::new(draw),
        }
    }
}

#[derive(Default)]
pub struct LayerStack {
    board: Surface,
    persistent_below: Surface,
    transient_below: Surface,
    pieces: Surface,
    persistent_above: Surface,
    transient_above: Surface,

    entries_transient_above: Vec<AnimationEntry>,
    entries_transient_below: Vec<AnimationEntry>,
    entries_persistent_above: Vec<AnimationEntry>,
    entries_persistent_below: Vec<AnimationEntry>,

    pixel_size: f32,
    square_size: f32,
    scale_factor: f32,
}

impl LayerStack {
    pub fn new() -> Self {
        Self {
            scale_factor: 1.0,
            ..Self::default()
        }
    }

    /// Resize every surface to the container. The board is square; an
    /// unequal container uses its smaller edge. Safe to call repeatedly
    /// with the same size.
    pub fn resize(&mut self, width: f32, height: f32, scale_factor: f32) {
        self.scale_factor = scale_factor;
        self.pixel_size = scale_factor * width.min(height);
        self.square_size = self.pixel_size / 8.0;
        for surface in [
            &mut self.board,
            &mut self.persistent_below,
            &mut self.transient_below,
            &mut self.pieces,
            &mut self.persistent_above,
            &mut self.transient_above,
        ] {
            surface.resize(self.pixel_size);
        }
        // surfaces came back blank; restore the registered animations
        render_list(&mut self.persistent_above, &self.entries_persistent_above);
        render_list(&mut self.persistent_below, &self.entries_persistent_below);
        render_list(&mut self.transient_above, &self.entries_transient_above);
        render_list(&mut self.transient_below, &self.entries_transient_below);
    }

    pub fn pixel_size(&self) -> f32 {
        self.pixel_size
    }

    pub fn square_size(&self) -> f32 {
        self.square_size
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Surfaces in compositing order, bottom to top.
    pub fn in_order(&self) -> [&Surface; 6] {
        [
            &self.board,
            &self.persistent_below,
            &self.transient_below,
            &self.pieces,
            &self.persistent_above,
            &self.transient_above,
        ]
    }

    /// Paint the checker pattern and, when `show_coordinates` is set, the
    /// rank and file labels (mirrored under a flipped orientation).
    pub fn draw_board(
        &mut self,
        light: u32,
        dark: u32,
        orientation: Orientation,
        show_coordinates: bool,
        blurred: bool,
    ) {
        let sq = self.square_size;
        self.board.clear();
        self.board.set_blur(blurred);
        for row in 0..8 {
            for col in 0..8 {
                let color = if (row + col) % 2 == 0 { light } else { dark };
                self.board
                    .fill_rect(col as f32 * sq, row as f32 * sq, sq, sq, color);
            }
        }
        if show_coordinates {
            let size = sq * LABEL_SCALE;
            let inset = sq * LABEL_INSET;
            for row in 0..8 {
                // rank numbers down view column 0
                let name = view_to_algebraic(ViewSquare { row, col: 0 }, orientation);
                let color = if row % 2 == 0 { dark } else { light };
                self.board.label(
                    name[1..2].to_owned(),
                    inset,
                    row as f32 * sq + inset,
                    size,
                    color,
                );
            }
            for col in 0..8 {
                // file letters along view row 7
                let name = view_to_algebraic(ViewSquare { row: 7, col }, orientation);
                let color = if (7 + col) % 2 == 0 { dark } else { light };
                self.board.label(
                    name[0..1].to_owned(),
                    (col + 1) as f32 * sq - size - inset,
                    8.0 * sq - size - inset,
                    size,
                    color,
                );
            }
        }
    }

    /// Clear the piece surface and redraw every occupant, mapping board
    /// squares to view squares through the orientation.
    pub fn draw_pieces(
        &mut self,
        board: &Board,
        sprites: &SpriteSet,
        orientation: Orientation,
        blurred: bool,
    ) {
        let sq = self.square_size;
        self.pieces.clear();
        self.pieces.set_blur(blurred);
        for (board_sq, piece) in board.occupied() {
            if let Some(handle) = sprites.resolve(Some(piece)) {
                let view = board_to_view(board_sq, orientation);
                self.pieces
                    .sprite(handle, view.col as f32 * sq, view.row as f32 * sq, sq, sq);
            }
        }
    }

    /// Draw the sprite held during a drag, centered on the pointer. Takes
    /// over the transient-above surface for the duration of the drag.
    pub fn draw_floating(&mut self, handle: &SpriteHandle, x: f32, y: f32) {
        let sq = self.square_size;
        self.transient_above.clear();
        self.transient_above
            .sprite(handle, x - sq / 2.0, y - sq / 2.0, sq, sq);
    }

    /// Draw the promotion prompt above the pieces: a dimming overlay over
    /// the whole board and one sprite per choice square.
    pub fn draw_promotion_overlay(
        &mut self,
        choices: &[(ViewSquare, PieceKind)],
        color: PieceColor,
        highlight_color: u32,
        sprites: &SpriteSet,
    ) {
        let sq = self.square_size;
        self.transient_above.clear();
        self.transient_above
            .fill_rect_alpha(0.0, 0.0, self.pixel_size, self.pixel_size, 0x000000, OVERLAY_ALPHA);
        for &(view, kind) in choices {
            let piece = Piece::new(kind, color);
            let (x, y) = (view.col as f32 * sq, view.row as f32 * sq);
            match sprites.highlight(piece) {
                Some(handle) => self.transient_above.sprite(handle, x, y, sq, sq),
                None => {
                    self.transient_above.fill_rect(x, y, sq, sq, highlight_color);
                    if let Some(handle) = sprites.piece(piece) {
                        self.transient_above.sprite(handle, x, y, sq, sq);
                    }
                }
            }
        }
    }

    /// Clear the transient-above surface (end of a drag or a prompt).
    pub fn clear_floating(&mut self) {
        self.transient_above.clear();
        render_list(&mut self.transient_above, &self.entries_transient_above);
    }

    /// Register a transient drawing above the pieces and draw it now.
    pub fn animate_above(&mut self, entry: AnimationEntry) {
        (entry.draw)(&mut self.transient_above);
        self.entries_transient_above.push(entry);
    }

    /// Register a transient drawing below the pieces and draw it now.
    pub fn animate_below(&mut self, entry: AnimationEntry) {
        (entry.draw)(&mut self.transient_below);
        self.entries_transient_below.push(entry);
    }

    /// Move the transient-above entries into the persistent list and redraw
    /// the persistent surface from the full accumulated list. The transient
    /// list and surface are cleared.
    pub fn persist_above(&mut self) {
        self.entries_persistent_above
            .append(&mut self.entries_transient_above);
        render_list(&mut self.persistent_above, &self.entries_persistent_above);
        self.transient_above.clear();
    }

    pub fn persist_below(&mut self) {
        self.entries_persistent_below
            .append(&mut self.entries_transient_below);
        render_list(&mut self.persistent_below, &self.entries_persistent_below);
        self.transient_below.clear();
    }

    /// Drop the entry with this id from every list, then re-render all four
    /// animation surfaces from what remains (surfaces have no selective
    /// erase).
    pub fn remove_by_id(&mut self, id: &str) {
        self.retain(|entry| entry.id != id);
    }

    /// Drop every entry with this kind tag from every list and re-render.
    pub fn remove_by_kind(&mut self, kind: &str) {
        self.retain(|entry| entry.kind != kind);
    }

    fn retain(&mut self, keep: impl Fn(&AnimationEntry) -> bool) {
        self.entries_transient_above.retain(|e| keep(e));
        self.entries_transient_below.retain(|e| keep(e));
        self.entries_persistent_above.retain(|e| keep(e));
        self.entries_persistent_below.retain(|e| keep(e));
        render_list(&mut self.transient_above, &self.entries_transient_above);
        render_list(&mut self.transient_below, &self.entries_transient_below);
        render_list(&mut self.persistent_above, &self.entries_persistent_above);
        render_list(&mut self.persistent_below, &self.entries_persistent_below);
    }

    /// Clear the transient list and surface above the pieces.
    pub fn clear_above(&mut self) {
        self.entries_transient_above.clear();
        self.transient_above.clear();
    }

    /// Clear the transient list and surface below the pieces.
    pub fn clear_below(&mut self) {
        self.entries_transient_below.clear();
        self.transient_below.clear();
    }
}

fn render_list(surface: &mut Surface, entries: &[AnimationEntry]) {
    surface.clear();
    for entry in entries {
        (entry.draw)(surface);
    }
}
