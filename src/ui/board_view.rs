//! GPUI view that hosts a [`Chessboard`] widget.
//!
//! The view replays the widget's six surfaces in compositing order as
//! absolutely-positioned elements, forwards mouse events to the pointer
//! entry points, and keeps the widget sized to its panel.

use gpui::{
    Context, Div, Entity, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, SharedString,
    Subscription, Window, canvas, div, img, prelude::*, px, rgb,
};

use crate::interact::{PointerButton, PointerPoint};
use crate::render::{DrawOp, Surface};
use crate::ui::theme::{BLUR_DIM_OPACITY, BOARD_PADDING, PANEL_BG};
use crate::widget::Chessboard;

pub struct BoardView {
    board: Entity<Chessboard>,
    _subscription: Subscription,
}

impl BoardView {
    pub fn new(board: Entity<Chessboard>, cx: &mut Context<Self>) -> Self {
        let _subscription = cx.observe(&board, |_, _, cx| cx.notify());
        Self {
            board,
            _subscription,
        }
    }
}

/// Pointer position relative to the board's top-left corner.
fn board_point(position: gpui::Point<gpui::Pixels>) -> PointerPoint {
    let x: f32 = position.x.into();
    let y: f32 = position.y.into();
    PointerPoint::new(x - BOARD_PADDING, y - BOARD_PADDING)
}

fn render_op(op: &DrawOp, scale: f32) -> Div {
    match op {
        DrawOp::Rect {
            x,
            y,
            w,
            h,
            color,
            alpha,
        } => div()
            .absolute()
            .left(px(x / scale))
            .top(px(y / scale))
            .w(px(w / scale))
            .h(px(h / scale))
            .bg(rgb(*color))
            .opacity(*alpha),
        DrawOp::Sprite { handle, x, y, w, h } => div()
            .absolute()
            .left(px(x / scale))
            .top(px(y / scale))
            .w(px(w / scale))
            .h(px(h / scale))
            .child(img(SharedString::from(handle.path().to_owned())).size(px(w / scale))),
        DrawOp::Label { text, x, y, color, .. } => div()
            .absolute()
            .left(px(x / scale))
            .top(px(y / scale))
            .text_color(rgb(*color))
            .text_sm()
            .child(text.clone()),
    }
}

fn render_surface(surface: &Surface, scale: f32) -> Div {
    let ops: Vec<Div> = surface.ops().iter().map(|op| render_op(op, scale)).collect();
    let mut layer = div().absolute().top_0().left_0().size_full();
    if surface.is_blurred() {
        layer = layer.opacity(BLUR_DIM_OPACITY);
    }
    layer.children(ops)
}

impl Render for BoardView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let board_down = self.board.clone();
        let board_move = self.board.clone();
        let board_up = self.board.clone();
        let board_right_down = self.board.clone();
        let board_right_up = self.board.clone();
        let board_measure = self.board.clone();

        let widget = self.board.read(cx);
        let scale_factor = widget.layers().scale_factor().max(1.0);
        let board_edge = widget.get_dimensions().pixel_size / scale_factor;
        let layers: Vec<Div> = widget
            .layers()
            .in_order()
            .iter()
            .map(|surface| render_surface(surface, scale_factor))
            .collect();

        // stacked surfaces, bottom to top, inside one square container
        let surfaces = div()
            .absolute()
            .left(px(BOARD_PADDING))
            .top(px(BOARD_PADDING))
            .w(px(board_edge))
            .h(px(board_edge))
            .overflow_hidden()
            .children(layers);

        // measuring canvas keeps the widget sized to the panel
        let measure = canvas(
            move |bounds, _window, cx| {
                board_measure.update(cx, |board, cx| {
                    let width: f32 = bounds.size.width.into();
                    let height: f32 = bounds.size.height.into();
                    let edge = (width.min(height) - BOARD_PADDING * 2.0).max(0.0);
                    if (board.get_dimensions().pixel_size - edge).abs() > 0.5 {
                        board.resize(edge, edge, 1.0);
                        cx.notify();
                    }
                });
            },
            |_, _, _, _| {},
        )
        .absolute()
        .top_0()
        .left_0()
        .size_full();

        div()
            .id("board-panel")
            .relative()
            .size_full()
            .overflow_hidden()
            .bg(rgb(PANEL_BG))
            .child(measure)
            .child(surfaces)
            .on_mouse_down(
                MouseButton::Left,
                move |ev: &MouseDownEvent, _window, cx| {
                    board_down.update(cx, |board, cx| {
                        board.pointer_down(PointerButton::Left, board_point(ev.position));
                        cx.notify();
                    });
                },
            )
            .on_mouse_down(
                MouseButton::Right,
                move |ev: &MouseDownEvent, _window, cx| {
                    board_right_down.update(cx, |board, cx| {
                        board.pointer_down(PointerButton::Right, board_point(ev.position));
                        cx.notify();
                    });
                },
            )
            .on_mouse_move(move |ev: &MouseMoveEvent, _window, cx| {
                board_move.update(cx, |board, cx| {
                    let point = board_point(ev.position);
                    let edge = board.get_dimensions().pixel_size;
                    let outside =
                        point.x < 0.0 || point.y < 0.0 || point.x > edge || point.y > edge;
                    if outside {
                        board.pointer_leave(point);
                    } else {
                        board.pointer_move(point);
                    }
                    cx.notify();
                });
            })
            .on_mouse_up(MouseButton::Left, move |ev: &MouseUpEvent, _window, cx| {
                board_up.update(cx, |board, cx| {
                    board.pointer_up(PointerButton::Left, board_point(ev.position));
                    cx.notify();
                });
            })
            .on_mouse_up(MouseButton::Right, move |ev: &MouseUpEvent, _window, cx| {
                board_right_up.update(cx, |board, cx| {
                    board.pointer_up(PointerButton::Right, board_point(ev.position));
                    cx.notify();
                });
            })
    }
}
