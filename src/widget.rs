//! The chessboard widget facade.
//!
//! Owns the board array, the layer stack, the sprite set, and the
//! interaction state, and exposes the public mutation API plus the
//! pointer entry points the platform binding feeds. All mutation paths
//! run on the host's single event-callback thread; pointer events arrive
//! strictly in delivery order.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Board, BoardSquare, FenError, MoveDescriptor, Orientation, Piece, PieceColor, PieceKind,
    SquareError, ViewSquare, algebraic_to_board, board_to_view, en_passant_capture_square,
    pixel_to_square_clamped, rook_relocation, view_to_algebraic, view_to_board,
};
use crate::interact::{
    Callbacks, DragSession, DropVerdict, InteractionEvent, InteractionState, PointerButton,
    PointerPoint, PromotionCallback, PromotionPrompt, promotion_choices,
};
use crate::render::{AnimationEntry, LayerStack};
use crate::sprites::{SpriteError, SpriteSet, SpriteSource};

/// Board colors from the original sprite set.
pub const DEFAULT_LIGHT_SQUARE: u32 = 0xE8E2C9;
pub const DEFAULT_DARK_SQUARE: u32 = 0x5D4037;

/// Where the board starts from.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum StartPosition {
    Starting,
    Placement(String),
    Custom(Board),
}

/// Construction-time configuration. Callbacks are set separately since
/// they are not serializable.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct BoardOptions {
    pub position: StartPosition,
    pub orientation: Orientation,
    pub show_coordinates: bool,
    pub movement_enabled: bool,
    pub sprite_base_path: String,
    /// Load the highlight sprite variants used by the promotion prompt.
    pub promotion_highlights: bool,
    pub light_square: u32,
    pub dark_square: u32,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            position: StartPosition::Starting,
            orientation: Orientation::White,
            show_coordinates: false,
            movement_enabled: true,
            sprite_base_path: "sprites".into(),
            promotion_highlights: true,
            light_square: DEFAULT_LIGHT_SQUARE,
            dark_square: DEFAULT_DARK_SQUARE,
        }
    }
}

/// Position of a named square in the current view, for host layout use.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SquareInfo {
    pub view: ViewSquare,
    pub origin: PointerPoint,
    pub center: PointerPoint,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Dimensions {
    pub pixel_size: f32,
    pub square_size: f32,
}

pub struct Chessboard {
    board: Board,
    orientation: Orientation,
    show_coordinates: bool,
    movement_enabled: bool,
    light_square: u32,
    dark_square: u32,
    sprite_base_path: String,
    promotion_highlights: bool,
    layers: LayerStack,
    sprites: Option<SpriteSet>,
    state: InteractionState,
    callbacks: Callbacks,
    right_down: bool,
}

impl Chessboard {
    pub fn new(options: BoardOptions) -> Result<Self, FenError> {
        let board = match options.position {
            StartPosition::Starting => Board::starting(),
            StartPosition::Placement(placement) => Board::from_placement(&placement)?,
            StartPosition::Custom(board) => board,
        };
        Ok(Self {
            board,
            orientation: options.orientation,
            show_coordinates: options.show_coordinates,
            movement_enabled: options.movement_enabled,
            light_square: options.light_square,
            dark_square: options.dark_square,
            sprite_base_path: options.sprite_base_path,
            promotion_highlights: options.promotion_highlights,
            layers: LayerStack::new(),
            sprites: None,
            state: InteractionState::Idle,
            callbacks: Callbacks::new(),
            right_down: false,
        })
    }

    /// Preload all sprites through `source`. Runs once; on success the
    /// widget becomes interactive, draws its pieces, and fires `on_load`.
    /// On failure it stays board-only and non-interactive.
    pub fn load_sprites(&mut self, source: &dyn SpriteSource) -> Result<(), SpriteError> {
        let sprites = SpriteSet::preload(source, &self.sprite_base_path, self.promotion_highlights)?;
        self.sprites = Some(sprites);
        self.redraw();
        if let Some(cb) = self.callbacks.on_load.as_mut() {
            cb();
        }
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.sprites.is_some()
    }

    pub fn set_callbacks(&mut self, callbacks: Callbacks) {
        self.callbacks = callbacks;
    }

    pub fn callbacks_mut(&mut self) -> &mut Callbacks {
        &mut self.callbacks
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn movement_enabled(&self) -> bool {
        self.movement_enabled
    }

    pub fn set_movement_enabled(&mut self, enabled: bool) {
        self.movement_enabled = enabled;
    }

    /// Resize the layer stack to the host container and redraw everything.
    /// Idempotent; the host delivers one call per container size change.
    pub fn resize(&mut self, width: f32, height: f32, scale_factor: f32) {
        self.layers.resize(width, height, scale_factor);
        self.redraw();
        if let InteractionState::Dragging(session) = &self.state {
            let (piece, pointer) = (session.piece, session.pointer);
            self.draw_floating(piece, pointer);
        }
        let (pixel, square) = (self.layers.pixel_size(), self.layers.square_size());
        if let Some(cb) = self.callbacks.on_resize.as_mut() {
            cb(pixel, square);
        }
    }

    /// Unconditional move with no legality check; the destination occupant
    /// is overwritten.
    pub fn move_piece(&mut self, from: &str, to: &str) -> Result<(), SquareError> {
        let from = algebraic_to_board(from)?;
        let to = algebraic_to_board(to)?;
        let piece = self.board.take(from);
        self.board.set(to, piece);
        self.redraw();
        Ok(())
    }

    pub fn remove_piece(&mut self, square: &str) -> Result<(), SquareError> {
        let sq = algebraic_to_board(square)?;
        self.board.set(sq, None);
        self.redraw();
        Ok(())
    }

    pub fn put_piece(
        &mut self,
        kind: PieceKind,
        color: PieceColor,
        square: &str,
    ) -> Result<(), SquareError> {
        let sq = algebraic_to_board(square)?;
        self.board.set(sq, Some(Piece::new(kind, color)));
        self.redraw();
        Ok(())
    }

    /// Toggle the view orientation. Storage stays board space; only the
    /// rendering and pointer mapping change.
    pub fn flip(&mut self) {
        self.orientation = self.orientation.flipped();
        self.redraw();
    }

    pub fn toggle_coordinates(&mut self) {
        self.show_coordinates = !self.show_coordinates;
        self.redraw();
    }

    pub fn get_square_info(&self, square: &str) -> Result<SquareInfo, SquareError> {
        let view = board_to_view(algebraic_to_board(square)?, self.orientation);
        let sq = self.layers.square_size();
        let origin = PointerPoint::new(view.col as f32 * sq, view.row as f32 * sq);
        let center = PointerPoint::new(origin.x + sq / 2.0, origin.y + sq / 2.0);
        Ok(SquareInfo {
            view,
            origin,
            center,
        })
    }

    pub fn get_dimensions(&self) -> Dimensions {
        Dimensions {
            pixel_size: self.layers.pixel_size(),
            square_size: self.layers.square_size(),
        }
    }

    pub fn animate_above(&mut self, entry: AnimationEntry) {
        self.layers.animate_above(entry);
    }

    pub fn animate_below(&mut self, entry: AnimationEntry) {
        self.layers.animate_below(entry);
    }

    pub fn persist_above(&mut self) {
        self.layers.persist_above();
    }

    pub fn persist_below(&mut self) {
        self.layers.persist_below();
    }

    pub fn remove_animation(&mut self, id: &str) {
        self.layers.remove_by_id(id);
    }

    pub fn remove_animations_of_kind(&mut self, kind: &str) {
        self.layers.remove_by_kind(kind);
    }

    pub fn clear_above(&mut self) {
        self.layers.clear_above();
    }

    pub fn clear_below(&mut self) {
        self.layers.clear_below();
    }

    /// Open the promotion prompt on a named square. Movement is suspended
    /// until the prompt resolves; the outcome goes to `callback`. Cancels
    /// any drag in flight. No-op before sprites are loaded.
    pub fn prompt_promotion(
        &mut self,
        square: &str,
        color: PieceColor,
        callback: PromotionCallback,
    ) -> Result<(), SquareError> {
        let target = algebraic_to_board(square)?;
        if !self.is_ready() {
            return Ok(());
        }
        match self.take_state() {
            InteractionState::Dragging(session) => {
                let pointer = session.pointer;
                self.cancel_session(session, pointer);
            }
            InteractionState::Prompting(prompt) => {
                self.dismiss_prompt(prompt);
            }
            InteractionState::Idle => {}
        }
        self.enter_prompt(target, color, callback, None);
        Ok(())
    }

    // --- pointer entry points -------------------------------------------

    pub fn pointer_down(&mut self, button: PointerButton, point: PointerPoint) {
        if !self.is_ready() || self.layers.square_size() <= 0.0 {
            return;
        }
        match button {
            PointerButton::Right => {
                self.right_down = true;
                if let InteractionState::Dragging(session) = self.take_state() {
                    self.cancel_session(session, point);
                }
                let event = self.event_at(point);
                if let Some(cb) = self.callbacks.on_right_click.as_mut() {
                    cb(&event);
                }
            }
            PointerButton::Left => {
                let event = self.event_at(point);
                if let Some(cb) = self.callbacks.on_left_click.as_mut() {
                    cb(&event);
                }
                if !self.state.is_idle() || !self.movement_enabled {
                    return;
                }
                let view = pixel_to_square_clamped(point.x, point.y, self.layers.square_size());
                let from_board = view_to_board(view, self.orientation);
                if let Some(piece) = self.board.take(from_board) {
                    self.state = InteractionState::Dragging(DragSession {
                        piece,
                        from_view: view,
                        from_board,
                        start_pointer: point,
                        pointer: point,
                    });
                    // origin square renders empty from here on
                    self.redraw();
                    self.draw_floating(piece, point);
                }
            }
        }
    }

    pub fn pointer_move(&mut self, point: PointerPoint) {
        if !self.is_ready() {
            return;
        }
        let piece = match &mut self.state {
            InteractionState::Dragging(session) => {
                session.pointer = point;
                session.piece
            }
            _ => {
                if self.right_down {
                    let event = self.event_at(point);
                    if let Some(cb) = self.callbacks.on_right_click_drag.as_mut() {
                        cb(&event);
                    }
                }
                return;
            }
        };
        self.redraw();
        self.draw_floating(piece, point);
        let event = self.event_at(point);
        if let Some(cb) = self.callbacks.on_left_click_drag.as_mut() {
            cb(&event);
        }
    }

    pub fn pointer_up(&mut self, button: PointerButton, point: PointerPoint) {
        if !self.is_ready() {
            return;
        }
        if button == PointerButton::Right {
            self.right_down = false;
            let event = self.event_at(point);
            if let Some(cb) = self.callbacks.on_right_click_release.as_mut() {
                cb(&event);
            }
            return;
        }
        match self.take_state() {
            InteractionState::Idle => {}
            InteractionState::Prompting(prompt) => self.resolve_prompt(prompt, point),
            InteractionState::Dragging(session) => self.finish_drag(session, point),
        }
    }

    /// Pointer left the input surface: any drag in flight is cancelled.
    pub fn pointer_leave(&mut self, point: PointerPoint) {
        if !self.is_ready() {
            return;
        }
        let event = self.event_at(point);
        if let Some(cb) = self.callbacks.on_mouse_out.as_mut() {
            cb(&event);
        }
        if let InteractionState::Dragging(session) = self.take_state() {
            self.cancel_session(session, point);
        }
    }

    // --- state machine internals ----------------------------------------

    fn take_state(&mut self) -> InteractionState {
        std::mem::replace(&mut self.state, InteractionState::Idle)
    }

    fn finish_drag(&mut self, session: DragSession, point: PointerPoint) {
        let view = pixel_to_square_clamped(point.x, point.y, self.layers.square_size());
        if view == session.from_view {
            // dropping back on the origin is a cancel
            self.cancel_session(session, point);
            return;
        }

        let event = self.drag_event(&session, point);
        let verdict = match self.callbacks.on_left_click_release.as_mut() {
            Some(cb) => cb(&event),
            // no legality callback: every drop is a plain move
            None => DropVerdict::Move(MoveDescriptor {
                from: view_to_algebraic(session.from_view, self.orientation),
                to: view_to_algebraic(view, self.orientation),
                san: String::new(),
                en_passant: false,
                flags: String::new(),
                captured: None,
                color: session.piece.color,
            }),
        };

        match verdict {
            DropVerdict::Reject => self.cancel_session(session, point),
            DropVerdict::Move(descriptor) => {
                let dest = view_to_board(view, self.orientation);
                self.board.set(dest, Some(session.piece));
                self.apply_side_effects(&descriptor);
                self.layers.clear_floating();
                self.redraw();
            }
            DropVerdict::AwaitPromotion { color, on_choice } => {
                let target = view_to_board(view, self.orientation);
                self.layers.clear_floating();
                self.enter_prompt(
                    target,
                    color,
                    on_choice,
                    Some((session.from_board, session.piece)),
                );
            }
        }
    }

    fn cancel_session(&mut self, session: DragSession, point: PointerPoint) {
        self.board.set(session.from_board, Some(session.piece));
        self.layers.clear_floating();
        self.redraw();
        let event = self.drag_event(&session, point);
        if let Some(cb) = self.callbacks.on_cancel.as_mut() {
            cb(&event);
        }
    }

    fn enter_prompt(
        &mut self,
        target: BoardSquare,
        color: PieceColor,
        callback: PromotionCallback,
        held_pawn: Option<(BoardSquare, Piece)>,
    ) {
        let view = board_to_view(target, self.orientation);
        self.state = InteractionState::Prompting(PromotionPrompt {
            target,
            color,
            choices: promotion_choices(view),
            callback,
            movement_was_enabled: self.movement_enabled,
            held_pawn,
        });
        self.movement_enabled = false;
        self.redraw();
    }

    fn resolve_prompt(&mut self, prompt: PromotionPrompt, point: PointerPoint) {
        let view = pixel_to_square_clamped(point.x, point.y, self.layers.square_size());
        let choice = prompt
            .choices
            .iter()
            .find(|(sq, _)| *sq == view)
            .map(|&(_, kind)| kind);
        self.movement_enabled = prompt.movement_was_enabled;
        match choice {
            Some(kind) => {
                let piece = Piece::new(kind, prompt.color);
                // the held pawn, if any, is consumed by the promotion
                self.board.set(prompt.target, Some(piece));
                (prompt.callback)(true, Some(piece));
            }
            None => {
                if let Some((origin, pawn)) = prompt.held_pawn {
                    self.board.set(origin, Some(pawn));
                }
                (prompt.callback)(false, None);
            }
        }
        self.layers.clear_floating();
        self.redraw();
    }

    fn dismiss_prompt(&mut self, prompt: PromotionPrompt) {
        self.movement_enabled = prompt.movement_was_enabled;
        if let Some((origin, pawn)) = prompt.held_pawn {
            self.board.set(origin, Some(pawn));
        }
        (prompt.callback)(false, None);
        self.layers.clear_floating();
    }

    /// Castling relocates the rook; en passant removes the pawn one rank
    /// behind the destination. Direct board mutations, not re-entrant
    /// through the state machine.
    fn apply_side_effects(&mut self, descriptor: &MoveDescriptor) {
        if let Some(side) = descriptor.castle() {
            let (from, to) = rook_relocation(side, descriptor.color);
            let rook = self.board.take(from);
            self.board.set(to, rook);
        }
        if descriptor.is_en_passant() {
            if let Ok(to) = algebraic_to_board(&descriptor.to) {
                let captured = en_passant_capture_square(to, descriptor.color);
                self.board.set(captured, None);
            }
        }
    }

    /// Redraw board and pieces for the current state; the promotion prompt
    /// blurs both and re-draws its overlay.
    fn redraw(&mut self) {
        let blurred = matches!(self.state, InteractionState::Prompting(_));
        self.layers.draw_board(
            self.light_square,
            self.dark_square,
            self.orientation,
            self.show_coordinates,
            blurred,
        );
        if let Some(sprites) = &self.sprites {
            self.layers
                .draw_pieces(&self.board, sprites, self.orientation, blurred);
            if let InteractionState::Prompting(prompt) = &self.state {
                self.layers.draw_promotion_overlay(
                    &prompt.choices,
                    prompt.color,
                    self.light_square,
                    sprites,
                );
            }
        }
    }

    fn draw_floating(&mut self, piece: Piece, point: PointerPoint) {
        let handle = self
            .sprites
            .as_ref()
            .and_then(|sprites| sprites.piece(piece))
            .cloned();
        if let Some(handle) = handle {
            self.layers.draw_floating(&handle, point.x, point.y);
        }
    }

    fn drag_event(&self, session: &DragSession, pointer: PointerPoint) -> InteractionEvent {
        InteractionEvent {
            dragging_piece: Some(session.piece),
            pointer,
            square: self.square_name_at(pointer),
            start_pointer: Some(session.start_pointer),
            start_square: Some(view_to_algebraic(session.from_view, self.orientation)),
            selected_piece: Some(session.piece),
        }
    }

    fn event_at(&self, pointer: PointerPoint) -> InteractionEvent {
        if let InteractionState::Dragging(session) = &self.state {
            return self.drag_event(session, pointer);
        }
        let square = self.square_name_at(pointer);
        let selected_piece = square
            .as_deref()
            .and_then(|name| algebraic_to_board(name).ok())
            .and_then(|sq| self.board.piece_at(sq));
        InteractionEvent {
            dragging_piece: None,
            pointer,
            square,
            start_pointer: None,
            start_square: None,
            selected_piece,
        }
    }

    fn square_name_at(&self, pointer: PointerPoint) -> Option<String> {
        let sq = self.layers.square_size();
        if sq <= 0.0 {
            return None;
        }
        let view = pixel_to_square_clamped(pointer.x, pointer.y, sq);
        Some(view_to_algebraic(view, self.orientation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprites::SpriteHandle;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct StubSource;

    impl SpriteSource for StubSource {
        fn load(&self, path: &str) -> anyhow::Result<SpriteHandle> {
            Ok(SpriteHandle::new(path))
        }
    }

    fn widget() -> Chessboard {
        widget_with(BoardOptions::default())
    }

    fn widget_with(options: BoardOptions) -> Chessboard {
        let mut board = Chessboard::new(options).unwrap();
        board.load_sprites(&StubSource).unwrap();
        board.resize(480.0, 480.0, 1.0);
        board
    }

    /// Center of a named square under the current orientation.
    fn center(board: &Chessboard, square: &str) -> PointerPoint {
        board.get_square_info(square).unwrap().center
    }

    fn piece_on(board: &Chessboard, square: &str) -> Option<Piece> {
        board.board().piece_at(algebraic_to_board(square).unwrap())
    }

    #[test]
    fn test_pickup_and_cancel_restores_board() {
        let mut board = widget();
        let before = board.board().clone();
        let e2 = center(&board, "e2");
        board.pointer_down(PointerButton::Left, e2);
        assert_eq!(piece_on(&board, "e2"), None); // detached while dragging
        board.pointer_leave(PointerPoint::new(-10.0, -10.0));
        assert_eq!(board.board(), &before);
        assert!(board.state.is_idle());
    }

    #[test]
    fn test_drop_on_origin_is_cancel() {
        let mut board = widget();
        let before = board.board().clone();
        let cancelled = Rc::new(RefCell::new(false));
        let flag = cancelled.clone();
        board.callbacks_mut().on_cancel = Some(Box::new(move |_| *flag.borrow_mut() = true));
        let e2 = center(&board, "e2");
        board.pointer_down(PointerButton::Left, e2);
        board.pointer_up(PointerButton::Left, e2);
        assert_eq!(board.board(), &before);
        assert!(*cancelled.borrow());
    }

    #[test]
    fn test_drag_moves_piece() {
        let mut board = widget();
        let e2 = center(&board, "e2");
        let e4 = center(&board, "e4");
        board.pointer_down(PointerButton::Left, e2);
        board.pointer_move(PointerPoint::new(e4.x, e4.y - 10.0));
        board.pointer_up(PointerButton::Left, e4);
        assert_eq!(piece_on(&board, "e2"), None);
        assert_eq!(
            piece_on(&board, "e4"),
            Some(Piece::new(PieceKind::Pawn, PieceColor::White))
        );
    }

    #[test]
    fn test_release_callback_can_veto() {
        let mut board = widget();
        let before = board.board().clone();
        board.callbacks_mut().on_left_click_release =
            Some(Box::new(|_| DropVerdict::Reject));
        board.pointer_down(PointerButton::Left, center(&board, "e2"));
        board.pointer_up(PointerButton::Left, center(&board, "e4"));
        assert_eq!(board.board(), &before);
    }

    #[test]
    fn test_release_event_payload() {
        let mut board = widget();
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        board.callbacks_mut().on_left_click_release = Some(Box::new(move |event| {
            *sink.borrow_mut() = Some(event.clone());
            DropVerdict::Reject
        }));
        board.pointer_down(PointerButton::Left, center(&board, "g1"));
        board.pointer_up(PointerButton::Left, center(&board, "f3"));
        let event = seen.borrow_mut().take().unwrap();
        assert_eq!(event.start_square.as_deref(), Some("g1"));
        assert_eq!(event.square.as_deref(), Some("f3"));
        assert_eq!(
            event.dragging_piece,
            Some(Piece::new(PieceKind::Knight, PieceColor::White))
        );
    }

    #[test]
    fn test_capture_overwrites_destination() {
        let mut board = widget_with(BoardOptions {
            position: StartPosition::Placement("8/8/8/3p4/4P3/8/8/8".into()),
            ..BoardOptions::default()
        });
        board.pointer_down(PointerButton::Left, center(&board, "e4"));
        board.pointer_up(PointerButton::Left, center(&board, "d5"));
        assert_eq!(
            piece_on(&board, "d5"),
            Some(Piece::new(PieceKind::Pawn, PieceColor::White))
        );
        assert_eq!(piece_on(&board, "e4"), None);
    }

    #[test]
    fn test_castling_side_effect() {
        let mut board = widget();
        board.callbacks_mut().on_left_click_release = Some(Box::new(|_| {
            DropVerdict::Move(MoveDescriptor {
                from: "e1".into(),
                to: "g1".into(),
                san: "O-O".into(),
                en_passant: false,
                flags: String::new(),
                captured: None,
                color: PieceColor::White,
            })
        }));
        board.pointer_down(PointerButton::Left, center(&board, "e1"));
        board.pointer_up(PointerButton::Left, center(&board, "g1"));
        assert_eq!(
            piece_on(&board, "g1"),
            Some(Piece::new(PieceKind::King, PieceColor::White))
        );
        assert_eq!(
            piece_on(&board, "f1"),
            Some(Piece::new(PieceKind::Rook, PieceColor::White))
        );
        assert_eq!(piece_on(&board, "h1"), None);
        assert_eq!(piece_on(&board, "e1"), None);
    }

    #[test]
    fn test_en_passant_side_effect() {
        let mut board = widget_with(BoardOptions {
            position: StartPosition::Placement("8/8/8/3pP3/8/8/8/8".into()),
            ..BoardOptions::default()
        });
        board.callbacks_mut().on_left_click_release = Some(Box::new(|_| {
            DropVerdict::Move(MoveDescriptor {
                from: "e5".into(),
                to: "d6".into(),
                san: "exd6".into(),
                en_passant: false,
                flags: "e".into(),
                captured: Some(PieceKind::Pawn),
                color: PieceColor::White,
            })
        }));
        board.pointer_down(PointerButton::Left, center(&board, "e5"));
        board.pointer_up(PointerButton::Left, center(&board, "d6"));
        assert_eq!(
            piece_on(&board, "d6"),
            Some(Piece::new(PieceKind::Pawn, PieceColor::White))
        );
        assert_eq!(piece_on(&board, "d5"), None);
    }

    #[test]
    fn test_right_click_cancels_drag() {
        let mut board = widget();
        let before = board.board().clone();
        let clicked = Rc::new(RefCell::new(false));
        let flag = clicked.clone();
        board.callbacks_mut().on_right_click = Some(Box::new(move |_| *flag.borrow_mut() = true));
        board.pointer_down(PointerButton::Left, center(&board, "e2"));
        board.pointer_down(PointerButton::Right, center(&board, "e2"));
        assert_eq!(board.board(), &before);
        assert!(*clicked.borrow());
    }

    #[test]
    fn test_movement_disabled_blocks_pickup() {
        let mut board = widget();
        board.set_movement_enabled(false);
        board.pointer_down(PointerButton::Left, center(&board, "e2"));
        assert!(board.state.is_idle());
        assert!(piece_on(&board, "e2").is_some());
    }

    #[test]
    fn test_not_ready_ignores_pointer() {
        let mut board = Chessboard::new(BoardOptions::default()).unwrap();
        board.resize(480.0, 480.0, 1.0);
        board.pointer_down(PointerButton::Left, PointerPoint::new(270.0, 390.0));
        assert!(board.state.is_idle());
        assert!(!board.is_ready());
    }

    #[test]
    fn test_flip_twice_restores() {
        let mut board = widget();
        let before = board.board().clone();
        board.flip();
        assert_eq!(board.orientation(), Orientation::Black);
        assert_eq!(board.board(), &before); // storage never reorders
        board.flip();
        assert_eq!(board.orientation(), Orientation::White);
        assert_eq!(board.board(), &before);
    }

    #[test]
    fn test_drag_honors_flipped_orientation() {
        let mut board = widget();
        board.flip();
        // from black's seat e2 sits at view (1, 3)
        board.pointer_down(PointerButton::Left, center(&board, "e2"));
        board.pointer_up(PointerButton::Left, center(&board, "e4"));
        assert_eq!(
            piece_on(&board, "e4"),
            Some(Piece::new(PieceKind::Pawn, PieceColor::White))
        );
    }

    #[test]
    fn test_move_piece_scenario_e2_e4() {
        let mut board = widget();
        board.move_piece("e2", "e4").unwrap();
        assert_eq!(piece_on(&board, "e2"), None);
        assert_eq!(
            piece_on(&board, "e4"),
            Some(Piece::new(PieceKind::Pawn, PieceColor::White))
        );
    }

    #[test]
    fn test_put_and_remove() {
        let mut board = widget();
        board.put_piece(PieceKind::Queen, PieceColor::Black, "e4").unwrap();
        assert_eq!(
            piece_on(&board, "e4"),
            Some(Piece::new(PieceKind::Queen, PieceColor::Black))
        );
        board.remove_piece("e4").unwrap();
        assert_eq!(piece_on(&board, "e4"), None);
        assert!(board.move_piece("e9", "e4").is_err());
    }

    #[test]
    fn test_square_info_and_dimensions() {
        let mut board = widget();
        let info = board.get_square_info("a8").unwrap();
        assert_eq!(info.view, ViewSquare { row: 0, col: 0 });
        assert_eq!(info.origin, PointerPoint::new(0.0, 0.0));
        assert_eq!(info.center, PointerPoint::new(30.0, 30.0));

        board.flip();
        let info = board.get_square_info("a8").unwrap();
        assert_eq!(info.view, ViewSquare { row: 7, col: 7 });
        assert_eq!(info.origin, PointerPoint::new(420.0, 420.0));

        let dims = board.get_dimensions();
        assert_eq!(dims.pixel_size, 480.0);
        assert_eq!(dims.square_size, 60.0);
    }

    #[test]
    fn test_resize_callback_and_idempotence() {
        let mut board = widget();
        let sizes = Rc::new(RefCell::new(Vec::new()));
        let sink = sizes.clone();
        board.callbacks_mut().on_resize =
            Some(Box::new(move |pixel, square| sink.borrow_mut().push((pixel, square))));
        board.resize(320.0, 400.0, 1.0);
        board.resize(320.0, 400.0, 1.0);
        assert_eq!(*sizes.borrow(), vec![(320.0, 40.0), (320.0, 40.0)]);
        assert_eq!(board.get_dimensions().square_size, 40.0);
    }

    #[test]
    fn test_prompt_choice_places_piece() {
        let mut board = widget_with(BoardOptions {
            position: StartPosition::Placement("8/8/8/8/8/8/8/8".into()),
            ..BoardOptions::default()
        });
        let outcome = Rc::new(RefCell::new(None));
        let sink = outcome.clone();
        board
            .prompt_promotion(
                "e8",
                PieceColor::White,
                Box::new(move |ok, piece| *sink.borrow_mut() = Some((ok, piece))),
            )
            .unwrap();
        assert!(!board.movement_enabled());

        // choices run e8, e7, e6, e5: queen, rook, bishop, knight
        board.pointer_up(PointerButton::Left, center(&board, "e7"));
        let rook = Piece::new(PieceKind::Rook, PieceColor::White);
        assert_eq!(piece_on(&board, "e8"), Some(rook));
        assert_eq!(*outcome.borrow(), Some((true, Some(rook))));
        assert!(board.movement_enabled());
    }

    #[test]
    fn test_prompt_dismissal() {
        let mut board = widget();
        let outcome = Rc::new(RefCell::new(None));
        let sink = outcome.clone();
        board
            .prompt_promotion(
                "e8",
                PieceColor::White,
                Box::new(move |ok, piece| *sink.borrow_mut() = Some((ok, piece))),
            )
            .unwrap();
        board.pointer_up(PointerButton::Left, center(&board, "a1"));
        assert_eq!(*outcome.borrow(), Some((false, None)));
        assert!(board.movement_enabled());
    }

    #[test]
    fn test_prompt_suspends_movement() {
        let mut board = widget();
        board
            .prompt_promotion("e8", PieceColor::White, Box::new(|_, _| {}))
            .unwrap();
        let before = board.board().clone();
        board.pointer_down(PointerButton::Left, center(&board, "e2"));
        assert_eq!(board.board(), &before);
        // prompt overlay sits above the pieces on the transient surface
        let above = board.layers().in_order()[5];
        assert!(!above.ops().is_empty());
        assert!(board.layers().in_order()[0].is_blurred());
    }

    #[test]
    fn test_drag_into_promotion_prompt() {
        let mut board = widget_with(BoardOptions {
            position: StartPosition::Placement("8/P7/8/8/8/8/8/8".into()),
            ..BoardOptions::default()
        });
        let outcome = Rc::new(RefCell::new(None));
        let sink = outcome.clone();
        board.callbacks_mut().on_left_click_release = Some(Box::new(move |_| {
            let sink = sink.clone();
            DropVerdict::AwaitPromotion {
                color: PieceColor::White,
                on_choice: Box::new(move |ok, piece| *sink.borrow_mut() = Some((ok, piece))),
            }
        }));
        board.pointer_down(PointerButton::Left, center(&board, "a7"));
        board.pointer_up(PointerButton::Left, center(&board, "a8"));
        assert!(matches!(board.state, InteractionState::Prompting(_)));

        board.pointer_up(PointerButton::Left, center(&board, "a8"));
        let queen = Piece::new(PieceKind::Queen, PieceColor::White);
        assert_eq!(piece_on(&board, "a8"), Some(queen));
        assert_eq!(piece_on(&board, "a7"), None); // pawn consumed
        assert_eq!(*outcome.borrow(), Some((true, Some(queen))));
    }

    #[test]
    fn test_drag_promotion_dismissal_restores_pawn() {
        let mut board = widget_with(BoardOptions {
            position: StartPosition::Placement("8/P7/8/8/8/8/8/8".into()),
            ..BoardOptions::default()
        });
        board.callbacks_mut().on_left_click_release = Some(Box::new(|_| {
            DropVerdict::AwaitPromotion {
                color: PieceColor::White,
                on_choice: Box::new(|_, _| {}),
            }
        }));
        board.pointer_down(PointerButton::Left, center(&board, "a7"));
        board.pointer_up(PointerButton::Left, center(&board, "a8"));
        board.pointer_up(PointerButton::Left, center(&board, "h1"));
        let pawn = Piece::new(PieceKind::Pawn, PieceColor::White);
        assert_eq!(piece_on(&board, "a7"), Some(pawn));
        assert_eq!(piece_on(&board, "a8"), None);
    }

    #[test]
    fn test_on_load_fires() {
        let mut board = Chessboard::new(BoardOptions::default()).unwrap();
        let loaded = Rc::new(RefCell::new(false));
        let flag = loaded.clone();
        board.callbacks_mut().on_load = Some(Box::new(move || *flag.borrow_mut() = true));
        board.load_sprites(&StubSource).unwrap();
        assert!(*loaded.borrow());
        assert!(board.is_ready());
    }

    #[test]
    fn test_clamped_drop_outside_board() {
        let mut board = widget();
        board.pointer_down(PointerButton::Left, center(&board, "h2"));
        // release beyond the right edge clamps to the h-file
        board.pointer_up(PointerButton::Left, PointerPoint::new(1000.0, 250.0));
        assert_eq!(
            piece_on(&board, "h4"),
            Some(Piece::new(PieceKind::Pawn, PieceColor::White))
        );
    }
}
