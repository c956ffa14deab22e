use std::collections::HashSet;
use std::path::Path;

use tilebank_core::{AssetEntry, AssetPool, Command, Scene};

use crate::raster::{Rasterizer, Tile, TileImage};
use crate::{EntityRef, Error, Result};

/// Unique tiles of one or more images.
pub type Tileset = Vec<Tile>;

/// Highest tile count a tileset blob can declare.
const MAX_TILESET_TILES: usize = u8::MAX as usize;

/// A background image referenced by at least one scene or script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsedImage {
    pub name: String,
    pub filename: String,
    /// Width in tiles.
    pub width: usize,
    /// Height in tiles.
    pub height: usize,
    /// Index into the tileset pool.
    pub tileset: usize,
    /// Tileset index per map cell, row-major.
    pub tilemap: Vec<u8>,
}

/// Rasterize every used catalog image.
///
/// Images keep catalog order; identical tilesets share one pool slot.
pub fn precompile_images(
    catalog: &[AssetEntry],
    scenes: &[Scene],
    rasterizer: &dyn Rasterizer,
    project_root: &Path,
) -> Result<(AssetPool<String, UsedImage>, AssetPool<Tileset>)> {
    let used = used_image_ids(scenes);
    let mut images = AssetPool::new();
    let mut tilesets = AssetPool::new();

    for entry in catalog.iter().filter(|e| used.contains(&e.id)) {
        if images.contains(entry.id.as_str()) {
            continue;
        }
        let path = project_root
            .join("assets")
            .join("backgrounds")
            .join(&entry.filename);
        let raster = rasterizer.image_tiles(&path)?;
        let (tileset, tilemap) = split_tileset(&raster);
        if tileset.len() > MAX_TILESET_TILES {
            return Err(Error::FieldOverflow {
                entity: EntityRef::Image(entry.id.clone()),
                field: "tile count",
                value: tileset.len(),
            });
        }

        // Indices are below the tile count, checked above.
        let tilemap = tilemap.into_iter().map(|i| i as u8).collect();
        let (tileset, fresh) = tilesets.insert(tileset, ());
        if !fresh {
            log::debug!("image '{}' reuses tileset {tileset}", entry.name);
        }

        images.insert(
            entry.id.clone(),
            UsedImage {
                name: entry.name.clone(),
                filename: entry.filename.clone(),
                width: raster.width,
                height: raster.height,
                tileset,
                tilemap,
            },
        );
    }

    Ok((images, tilesets))
}

/// Split an image into its unique tiles, in first-seen order, and the map
/// of indices into them.
pub fn split_tileset(image: &TileImage) -> (Tileset, Vec<usize>) {
    let mut unique: AssetPool<Tile> = AssetPool::new();
    let tilemap = image.tiles.iter().map(|tile| unique.intern(*tile)).collect();
    (unique.keys().copied().collect(), tilemap)
}

/// Ids of every image used as a scene background or loaded by a script.
fn used_image_ids(scenes: &[Scene]) -> HashSet<String> {
    let mut used: HashSet<String> = scenes
        .iter()
        .filter_map(|scene| scene.image_id.clone())
        .collect();

    for script in scenes.iter().flat_map(Scene::scripts) {
        used = script.fold(used, &mut |mut used: HashSet<String>, command: &Command| {
            match command {
                Command::LoadImage { image_id } => {
                    used.insert(image_id.clone());
                }
                Command::Custom { args, .. } => {
                    if let Some(id) = &args.image_id {
                        used.insert(id.clone());
                    }
                }
                _ => {}
            }
            used
        });
    }
    used
}
