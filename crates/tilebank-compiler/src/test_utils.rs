//! Test doubles for the rasterization and event boundaries.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tilebank_core::{Project, Script};

use crate::event::{EventCompileError, EventContext};
use crate::observer::{Observer, Stage};
use crate::raster::{FRAME_BYTES, RasterError, Rasterizer, TileImage};

/// In-memory rasterizer keyed by file name.
///
/// Unknown images rasterize to a single blank tile, unknown sprite sheets
/// to one blank frame.
#[derive(Debug, Default)]
pub struct FakeRasterizer {
    images: HashMap<String, TileImage>,
    sprites: HashMap<String, usize>,
    failing: HashSet<String>,
}

impl FakeRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, filename: &str, image: TileImage) -> Self {
        self.images.insert(filename.to_string(), image);
        self
    }

    pub fn with_sprite(mut self, filename: &str, frames: usize) -> Self {
        self.sprites.insert(filename.to_string(), frames);
        self
    }

    pub fn failing(mut self, filename: &str) -> Self {
        self.failing.insert(filename.to_string());
        self
    }

    fn key(&self, path: &Path) -> Result<String, RasterError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.failing.contains(&name) {
            return Err(RasterError::Read {
                path: path.to_path_buf(),
                message: "unreadable".to_string(),
            });
        }
        Ok(name)
    }
}

impl Rasterizer for FakeRasterizer {
    fn image_tiles(&self, path: &Path) -> Result<TileImage, RasterError> {
        let key = self.key(path)?;
        Ok(self
            .images
            .get(&key)
            .cloned()
            .unwrap_or_else(|| solid_image(1, 1, 0)))
    }

    fn sprite_tiles(&self, path: &Path) -> Result<Vec<u8>, RasterError> {
        let key = self.key(path)?;
        let frames = self.sprites.get(&key).copied().unwrap_or(1);
        Ok(vec![0; frames * FRAME_BYTES])
    }
}

/// Every tile filled with `byte`.
pub fn solid_image(width: usize, height: usize, byte: u8) -> TileImage {
    TileImage {
        width,
        height,
        tiles: vec![[byte; 16]; width * height],
    }
}

/// Every tile distinct: tile `i` is filled with `i`.
pub fn distinct_image(width: usize, height: usize) -> TileImage {
    TileImage {
        width,
        height,
        tiles: (0..width * height).map(|i| [i as u8; 16]).collect(),
    }
}

pub fn project(json: &str) -> Project {
    Project::from_json(json).expect("valid project json")
}

/// Event compiler emitting `len` bytes of `0xEE` for every script.
pub fn fixed_blob(
    len: usize,
) -> impl Fn(&Script, &EventContext<'_>) -> Result<Vec<u8>, EventCompileError> {
    move |_, _| Ok(vec![0xEE; len])
}

/// Event compiler whose blob size depends on whether the context is
/// reduced.
pub fn sized_by_context(
    full: usize,
    reduced: usize,
) -> impl Fn(&Script, &EventContext<'_>) -> Result<Vec<u8>, EventCompileError> {
    move |_, context| {
        let len = if context.is_reduced() { reduced } else { full };
        Ok(vec![0xEE; len])
    }
}

#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub stages: Vec<Stage>,
    pub warnings: Vec<String>,
}

impl Observer for RecordingObserver {
    fn progress(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    fn warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}
