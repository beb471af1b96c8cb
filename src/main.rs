//! Demo host application.
//!
//! Opens a GPUI window with a chessboard widget and wires up the legality
//! collaborator the widget expects from its host: shakmaty answers the
//! rules questions, the widget handles rendering and dragging. This is
//! also the reference for how a host drives promotion and the castling /
//! en-passant side effects through move descriptors.

use std::cell::RefCell;
use std::rc::Rc;

use gpui::{App, Application, Bounds, WindowBounds, WindowOptions, prelude::*, px, size};
use gpui_component::Root;
use shakmaty::san::San;
use shakmaty::{Chess, Color as SColor, File, Move, Position, Role, Square};

use canvasboard::interact::{Callbacks, DropVerdict};
use canvasboard::ui::theme::INITIAL_WINDOW_EDGE;
use canvasboard::ui::{BoardView, FileAssets};
use canvasboard::{BoardOptions, Chessboard, MoveDescriptor, PieceColor, PieceKind};

fn to_role(kind: PieceKind) -> Role {
    match kind {
        PieceKind::Pawn => Role::Pawn,
        PieceKind::Knight => Role::Knight,
        PieceKind::Bishop => Role::Bishop,
        PieceKind::Rook => Role::Rook,
        PieceKind::Queen => Role::Queen,
        PieceKind::King => Role::King,
    }
}

fn from_role(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn to_piece_color(color: SColor) -> PieceColor {
    match color {
        SColor::White => PieceColor::White,
        SColor::Black => PieceColor::Black,
    }
}

/// Resolve a from/to pair against the legal moves of `position`. For
/// castling, the user drags the king to its destination (g1/g8 or c1/c8).
fn find_legal(position: &Chess, from_sq: Square, to_sq: Square) -> Option<Move> {
    let legals = position.legal_moves();
    for m in &legals {
        let (move_from, move_to) = match m {
            Move::Normal { from, to, .. } => (*from, *to),
            Move::EnPassant { from, to, .. } => (*from, *to),
            Move::Castle { king, rook, .. } => {
                let king_dest = if rook.file() == File::H {
                    Square::from_coords(File::G, rook.rank())
                } else {
                    Square::from_coords(File::C, rook.rank())
                };
                (*king, king_dest)
            }
            Move::Put { .. } => continue,
        };
        if move_from == from_sq && move_to == to_sq {
            return Some(m.clone());
        }
    }
    None
}

fn find_promotion(position: &Chess, from_sq: Square, to_sq: Square, role: Role) -> Option<Move> {
    let legals = position.legal_moves();
    for m in &legals {
        if let Move::Normal {
            from,
            to,
            promotion: Some(promo),
            ..
        } = m
        {
            if *from == from_sq && *to == to_sq && *promo == role {
                return Some(m.clone());
            }
        }
    }
    None
}

/// Callbacks that make the widget play legal chess: illegal drops snap
/// back, promotions open the widget's prompt, castling and en passant
/// come back as descriptor side effects.
fn host_callbacks() -> Callbacks {
    let position = Rc::new(RefCell::new(Chess::default()));
    let mut callbacks = Callbacks::new();

    let pos_release = position.clone();
    callbacks.on_left_click_release = Some(Box::new(move |event| {
        let (Some(from), Some(to)) = (event.start_square.as_deref(), event.square.as_deref())
        else {
            return DropVerdict::Reject;
        };
        let (Ok(from_sq), Ok(to_sq)) = (from.parse::<Square>(), to.parse::<Square>()) else {
            return DropVerdict::Reject;
        };
        let current = pos_release.borrow().clone();
        let Some(m) = find_legal(&current, from_sq, to_sq) else {
            return DropVerdict::Reject;
        };

        // pawn reaching the last rank: let the widget prompt for the piece
        if let Move::Normal {
            role: Role::Pawn,
            promotion: Some(_),
            ..
        } = m
        {
            let pos_choice = pos_release.clone();
            return DropVerdict::AwaitPromotion {
                color: to_piece_color(current.turn()),
                on_choice: Box::new(move |ok, piece| {
                    let (true, Some(piece)) = (ok, piece) else {
                        return;
                    };
                    let current = pos_choice.borrow().clone();
                    if let Some(promotion) =
                        find_promotion(&current, from_sq, to_sq, to_role(piece.kind))
                    {
                        if let Ok(next) = current.play(promotion) {
                            *pos_choice.borrow_mut() = next;
                        }
                    }
                }),
            };
        }

        let san = San::from_move(&current, m.clone()).to_string();
        let en_passant = matches!(m, Move::EnPassant { .. });
        let captured = match &m {
            Move::Normal {
                capture: Some(role),
                ..
            } => Some(from_role(*role)),
            Move::EnPassant { .. } => Some(PieceKind::Pawn),
            _ => None,
        };
        let color = to_piece_color(current.turn());
        let next = match current.play(m) {
            Ok(next) => next,
            Err(_) => return DropVerdict::Reject,
        };
        *pos_release.borrow_mut() = next;

        DropVerdict::Move(MoveDescriptor {
            from: from.to_owned(),
            to: to.to_owned(),
            san,
            en_passant,
            flags: if en_passant { "e".into() } else { String::new() },
            captured,
            color,
        })
    }));

    callbacks
}

fn main() {
    Application::new()
        .with_assets(FileAssets::new())
        .run(|cx: &mut App| {
            gpui_component::init(cx);

            let bounds = Bounds::centered(
                None,
                size(px(INITIAL_WINDOW_EDGE), px(INITIAL_WINDOW_EDGE)),
                cx,
            );
            cx.open_window(
                WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(bounds)),
                    ..Default::default()
                },
                |window, cx| {
                    let board = cx.new(|_| {
                        let mut board = Chessboard::new(BoardOptions::default())
                            .expect("default options hold a valid position");
                        board.set_callbacks(host_callbacks());
                        if let Err(e) = board.load_sprites(&FileAssets::new()) {
                            eprintln!("Failed to load sprites: {}", e);
                        }
                        board
                    });
                    let view = cx.new(|cx| BoardView::new(board, cx));
                    cx.new(|cx| Root::new(view, window, cx))
                },
            )
            .unwrap();
        });
}
