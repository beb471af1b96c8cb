//! Sprite resolution and preloading.
//!
//! The widget never decodes images itself; a [`SpriteSource`] supplied by
//! the platform binding resolves an asset path to an opaque drawable
//! handle. Preloading runs once per widget, as one batch of independent
//! requests joined before the widget reports ready: the first failure
//! aborts the whole batch.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::{PROMOTION_KINDS, Piece, PieceColor};

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("failed to load sprite {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Opaque token for a decoded sprite. The platform binding decides what a
/// handle means; the compositor only records and compares them.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SpriteHandle(Arc<str>);

impl SpriteHandle {
    pub fn new(path: impl Into<Arc<str>>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

/// Resolves an asset path to a drawable handle, or fails with the reason.
pub trait SpriteSource {
    fn load(&self, path: &str) -> anyhow::Result<SpriteHandle>;
}

/// Asset filename for a piece sprite, following the original sprite set
/// naming: `Chess_<letter><l|d>t60.png`, with an `h` suffix before the
/// extension for the highlight variant.
pub fn sprite_filename(piece: Piece, highlight: bool) -> String {
    let shade = match piece.color {
        PieceColor::White => 'l',
        PieceColor::Black => 'd',
    };
    let suffix = if highlight { "h" } else { "" };
    format!("Chess_{}{}t60{}.png", piece.kind.letter(), shade, suffix)
}

/// The full set of preloaded sprite handles for one widget.
#[derive(Debug)]
pub struct SpriteSet {
    pieces: HashMap<Piece, SpriteHandle>,
    highlights: HashMap<Piece, SpriteHandle>,
}

impl SpriteSet {
    /// Load the 12 piece sprites, plus the 8 promotion-highlight variants
    /// when requested, relative to `base_path`. All requests are issued as
    /// one batch; any failure rejects the whole set.
    pub fn preload(
        source: &dyn SpriteSource,
        base_path: &str,
        include_highlights: bool,
    ) -> Result<Self, SpriteError> {
        let mut requests: Vec<(Piece, bool)> = Piece::all().map(|p| (p, false)).collect();
        if include_highlights {
            for color in [PieceColor::White, PieceColor::Black] {
                for kind in PROMOTION_KINDS {
                    requests.push((Piece::new(kind, color), true));
                }
            }
        }

        let mut pieces = HashMap::new();
        let mut highlights = HashMap::new();
        for (piece, highlight) in requests {
            let path = format!(
                "{}/{}",
                base_path.trim_end_matches('/'),
                sprite_filename(piece, highlight)
            );
            let handle = source
                .load(&path)
                .map_err(|source| SpriteError::Load { path, source })?;
            if highlight {
                highlights.insert(piece, handle);
            } else {
                pieces.insert(piece, handle);
            }
        }
        Ok(Self { pieces, highlights })
    }

    /// Pure lookup; `None` is the no-sprite sentinel for an empty square.
    pub fn resolve(&self, occupant: Option<Piece>) -> Option<&SpriteHandle> {
        occupant.and_then(|piece| self.pieces.get(&piece))
    }

    pub fn piece(&self, piece: Piece) -> Option<&SpriteHandle> {
        self.pieces.get(&piece)
    }

    pub fn highlight(&self, piece: Piece) -> Option<&SpriteHandle> {
        self.highlights.get(&piece)
    }
}
