use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;

use tilebank_core::{AssetEntry, AssetPool, Scene};

use crate::raster::{FRAME_BYTES, RasterError, Rasterizer};
use crate::{Error, Result};

/// Runtime behavior class selected by frame count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpriteKind {
    #[default]
    Static,
    Actor,
    AnimatedActor,
}

impl SpriteKind {
    pub fn from_frames(frames: usize) -> Self {
        match frames {
            6 => SpriteKind::AnimatedActor,
            3 => SpriteKind::Actor,
            _ => SpriteKind::Static,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            SpriteKind::Static => 0,
            SpriteKind::Actor => 1,
            SpriteKind::AnimatedActor => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsedSprite {
    pub name: String,
    pub filename: String,
    /// Frame data, [`FRAME_BYTES`] per frame.
    pub data: Vec<u8>,
    pub frames: usize,
    pub kind: SpriteKind,
}

/// Rasterize every sprite sheet that is the player sprite or is worn by an
/// actor. Sheets are converted concurrently; pool order is catalog order.
pub fn precompile_sprites(
    catalog: &[AssetEntry],
    scenes: &[Scene],
    player_sprite_id: Option<&str>,
    rasterizer: &dyn Rasterizer,
    project_root: &Path,
) -> Result<AssetPool<String, UsedSprite>> {
    let worn: HashSet<&str> = scenes
        .iter()
        .flat_map(|scene| &scene.actors)
        .filter_map(|actor| actor.sprite_sheet_id.as_deref())
        .collect();

    let mut seen = HashSet::new();
    let used: Vec<&AssetEntry> = catalog
        .iter()
        .filter(|e| player_sprite_id == Some(e.id.as_str()) || worn.contains(e.id.as_str()))
        .filter(|e| seen.insert(e.id.as_str()))
        .collect();

    let paths: Vec<PathBuf> = used
        .iter()
        .map(|e| project_root.join("assets").join("sprites").join(&e.filename))
        .collect();
    let converted = rasterize_all(&paths, rasterizer);

    let mut pool = AssetPool::new();
    for (entry, data) in used.into_iter().zip(converted) {
        let data = data?;
        let frames = data.len() / FRAME_BYTES;
        pool.insert(
            entry.id.clone(),
            UsedSprite {
                name: entry.name.clone(),
                filename: entry.filename.clone(),
                data,
                frames,
                kind: SpriteKind::from_frames(frames),
            },
        );
    }
    Ok(pool)
}

/// Pool index of the player sprite: the configured sheet, else the first
/// animated-actor sheet.
pub fn resolve_player_sprite(
    sprites: &AssetPool<String, UsedSprite>,
    configured: Option<&str>,
) -> Result<usize> {
    configured
        .and_then(|id| sprites.index_of(id))
        .or_else(|| {
            sprites
                .values()
                .position(|s| s.kind == SpriteKind::AnimatedActor)
        })
        .ok_or(Error::NoPlayerSprite)
}

/// Convert sheets on a bounded set of scoped workers, preserving order.
fn rasterize_all(
    paths: &[PathBuf],
    rasterizer: &dyn Rasterizer,
) -> Vec<std::result::Result<Vec<u8>, RasterError>> {
    if paths.is_empty() {
        return Vec::new();
    }
    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    let chunk = paths.len().div_ceil(workers);

    thread::scope(|scope| {
        let handles: Vec<_> = paths
            .chunks(chunk)
            .map(|batch| {
                scope.spawn(move || {
                    batch
                        .iter()
                        .map(|path| rasterizer.sprite_tiles(path))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(results) => results,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}
