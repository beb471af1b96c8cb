//! Filesystem-based asset source for the piece sprites.
//!
//! One struct serves both sides: GPUI pulls image bytes through
//! [`AssetSource`] when a sprite element is painted, and the widget's
//! preload walks the same candidate paths through [`SpriteSource`] so a
//! missing or unreadable file fails the batch up front.

use anyhow::anyhow;
use gpui::{AssetSource, SharedString};
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use crate::sprites::{SpriteHandle, SpriteSource};

/// Looks for assets next to the executable, then relative to the working
/// directory.
pub struct FileAssets {
    base_path: PathBuf,
}

impl FileAssets {
    pub fn new() -> Self {
        let base_path = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| std::env::current_dir().unwrap());
        Self { base_path }
    }

    fn candidates(&self, path: &str) -> [PathBuf; 3] {
        [
            self.base_path.join(path),
            PathBuf::from(path),
            std::env::current_dir().unwrap().join(path),
        ]
    }
}

impl Default for FileAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetSource for FileAssets {
    fn load(&self, path: &str) -> gpui::Result<Option<Cow<'static, [u8]>>> {
        for p in &self.candidates(path) {
            if let Ok(data) = fs::read(p) {
                return Ok(Some(Cow::Owned(data)));
            }
        }
        Ok(None)
    }

    fn list(&self, path: &str) -> gpui::Result<Vec<SharedString>> {
        let dir_path = self.base_path.join(path);
        let mut results = Vec::new();

        if let Ok(entries) = fs::read_dir(&dir_path) {
            for entry in entries.flatten() {
                if let Some(name) = entry.file_name().to_str() {
                    results.push(SharedString::from(name.to_string()));
                }
            }
        }
        Ok(results)
    }
}

impl SpriteSource for FileAssets {
    fn load(&self, path: &str) -> anyhow::Result<SpriteHandle> {
        for p in &self.candidates(path) {
            if fs::metadata(p).map(|m| m.is_file()).unwrap_or(false) {
                // the handle keeps the relative path; GPUI resolves it
                // again through AssetSource when the sprite is painted
                return Ok(SpriteHandle::new(path));
            }
        }
        Err(anyhow!("asset {path} not found"))
    }
}
