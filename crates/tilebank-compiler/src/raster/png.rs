//! PNG rasterizer producing 2bpp Game Boy tiles.
//!
//! Pixels are reduced to four shades by luminance, white = 0 through
//! black = 3. Each tile row is two bytes: low bit-plane then high
//! bit-plane, leftmost pixel in the most significant bit.

use std::path::Path;

use image::GrayImage;

use super::{FRAME_BYTES, RasterError, Rasterizer, TILE_BYTES, Tile, TileImage};

const TILE_SIZE: u32 = 8;
const FRAME_SIZE: u32 = 16;

#[derive(Clone, Copy, Debug, Default)]
pub struct PngRasterizer;

impl PngRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for PngRasterizer {
    fn image_tiles(&self, path: &Path) -> Result<TileImage, RasterError> {
        let img = load_gray(path)?;
        check_dimensions(path, &img, TILE_SIZE)?;

        let width = img.width() / TILE_SIZE;
        let height = img.height() / TILE_SIZE;
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for ty in 0..height {
            for tx in 0..width {
                tiles.push(encode_tile(&img, tx, ty));
            }
        }

        Ok(TileImage {
            width: width as usize,
            height: height as usize,
            tiles,
        })
    }

    fn sprite_tiles(&self, path: &Path) -> Result<Vec<u8>, RasterError> {
        let img = load_gray(path)?;
        check_dimensions(path, &img, FRAME_SIZE)?;

        let frames = img.width() / FRAME_SIZE;
        let mut data = Vec::with_capacity(frames as usize * FRAME_BYTES);
        for frame in 0..frames {
            let tx = frame * 2;
            // 8x16 sprite order: left column top to bottom, then right column.
            for (dx, dy) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
                data.extend_from_slice(&encode_tile(&img, tx + dx, dy));
            }
        }
        Ok(data)
    }
}

fn load_gray(path: &Path) -> Result<GrayImage, RasterError> {
    let img = image::open(path).map_err(|e| RasterError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(img.to_luma8())
}

fn check_dimensions(path: &Path, img: &GrayImage, multiple: u32) -> Result<(), RasterError> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 || width % multiple != 0 || height % multiple != 0 {
        return Err(RasterError::BadDimensions {
            path: path.to_path_buf(),
            width,
            height,
            multiple,
        });
    }
    Ok(())
}

/// Map a luminance value to a 2-bit shade index.
pub(super) fn shade(luma: u8) -> u8 {
    3 - (luma >> 6)
}

/// Encode the 8x8 tile at tile coordinates `(tx, ty)`.
pub(super) fn encode_tile(img: &GrayImage, tx: u32, ty: u32) -> Tile {
    let mut tile = [0u8; TILE_BYTES];
    for row in 0..TILE_SIZE {
        let mut lo = 0u8;
        let mut hi = 0u8;
        for col in 0..TILE_SIZE {
            let luma = img.get_pixel(tx * TILE_SIZE + col, ty * TILE_SIZE + row).0[0];
            let index = shade(luma);
            let bit = 7 - col;
            lo |= (index & 1) << bit;
            hi |= ((index >> 1) & 1) << bit;
        }
        tile[row as usize * 2] = lo;
        tile[row as usize * 2 + 1] = hi;
    }
    tile
}
