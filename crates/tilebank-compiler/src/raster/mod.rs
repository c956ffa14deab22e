//! Rasterization boundary: image files in, Game Boy tile data out.
//!
//! Conversion is pure and keyed by path, so implementations may be shared
//! across threads and memoized with [`CachedRasterizer`].

use std::path::{Path, PathBuf};

mod cache;
#[cfg(feature = "png")]
mod png;


pub use cache::CachedRasterizer;
#[cfg(feature = "png")]
pub use png::PngRasterizer;

/// Bytes in one 8x8 2bpp tile.
pub const TILE_BYTES: usize = 16;

/// Bytes in one 16x16 sprite frame (four tiles).
pub const FRAME_BYTES: usize = 4 * TILE_BYTES;

pub type Tile = [u8; TILE_BYTES];

/// A background image cut into tiles, one per map cell in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileImage {
    /// Width in tiles.
    pub width: usize,
    /// Height in tiles.
    pub height: usize,
    pub tiles: Vec<Tile>,
}

impl TileImage {
    /// All tiles concatenated, in map order.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.tiles.iter().flatten().copied().collect()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RasterError {
    #[error("failed to read '{}': {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("'{}' is {width}x{height} pixels, expected multiples of {multiple}", path.display())]
    BadDimensions {
        path: PathBuf,
        width: u32,
        height: u32,
        multiple: u32,
    },
}

/// Converts image files into tile data.
pub trait Rasterizer: Sync {
    /// Cut a background image into 8x8 tiles.
    fn image_tiles(&self, path: &Path) -> Result<TileImage, RasterError>;

    /// Convert a sprite sheet of 16x16 frames laid out horizontally into
    /// [`FRAME_BYTES`] bytes per frame.
    fn sprite_tiles(&self, path: &Path) -> Result<Vec<u8>, RasterError>;
}
