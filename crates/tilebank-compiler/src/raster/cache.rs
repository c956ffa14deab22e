//! Path-keyed memoization for rasterizers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::{RasterError, Rasterizer, TileImage};

/// Wraps a rasterizer and converts each path at most once.
///
/// Failures are not cached.
#[derive(Debug)]
pub struct CachedRasterizer<R> {
    inner: R,
    images: Mutex<HashMap<PathBuf, TileImage>>,
    sprites: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl<R: Rasterizer> CachedRasterizer<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            images: Mutex::new(HashMap::new()),
            sprites: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Number of distinct paths converted so far.
    pub fn cached_len(&self) -> usize {
        let images = self.images.lock().unwrap_or_else(PoisonError::into_inner);
        let sprites = self.sprites.lock().unwrap_or_else(PoisonError::into_inner);
        images.len() + sprites.len()
    }
}

impl<R: Rasterizer> Rasterizer for CachedRasterizer<R> {
    fn image_tiles(&self, path: &Path) -> Result<TileImage, RasterError> {
        if let Some(hit) = self
            .images
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
        {
            return Ok(hit.clone());
        }
        // Lock released before converting.
        let image = self.inner.image_tiles(path)?;
        self.images
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_path_buf(), image.clone());
        Ok(image)
    }

    fn sprite_tiles(&self, path: &Path) -> Result<Vec<u8>, RasterError> {
        if let Some(hit) = self
            .sprites
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
        {
            return Ok(hit.clone());
        }
        let data = self.inner.sprite_tiles(path)?;
        self.sprites
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_path_buf(), data.clone());
        Ok(data)
    }
}
