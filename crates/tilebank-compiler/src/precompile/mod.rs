//! Deduplicating precompile pass.
//!
//! Walks the scene graph and every embedded script to build the asset
//! pools the rest of the compile indexes into:
//! - flags and strings, in traversal order
//! - images (with content-deduplicated tilesets), sprites and music, in
//!   catalog order filtered by use
//! - per-scene data with resolved image and sprite indices
//!
//! Project-validity errors are raised here, before anything is placed.

mod flags;
mod images;
mod music;
mod scenes;
mod sprites;
mod strings;
mod ui;

#[cfg(test)]
mod sprites_tests;

use tilebank_core::{AssetPool, Project};

use crate::observer::{Observer, Stage};
use crate::raster::Rasterizer;
use crate::{Config, Error, Result};

pub use flags::collect_flags;
pub use images::{Tileset, UsedImage, precompile_images, split_tileset};
pub use music::{UsedMusic, collect_music};
pub use scenes::{SceneActor, SceneData, precompile_scenes};
pub use sprites::{SpriteKind, UsedSprite, precompile_sprites, resolve_player_sprite};
pub use strings::{NO_STRINGS, collect_strings};
pub(crate) use strings::normalize as normalize_text;
pub use ui::{UiAssets, ensure_project_asset, precompile_ui};

/// Everything the link pass needs, borrowed from one project.
#[derive(Debug)]
pub struct Precompiled<'p> {
    pub flags: AssetPool<String>,
    pub strings: AssetPool<String>,
    pub images: AssetPool<String, UsedImage>,
    pub tilesets: AssetPool<Tileset>,
    pub ui: UiAssets,
    pub sprites: AssetPool<String, UsedSprite>,
    /// Sprite pool index of the player.
    pub player_sprite: usize,
    pub music: AssetPool<String, UsedMusic>,
    pub scenes: Vec<SceneData<'p>>,
}

/// Run every precompile stage in order.
pub fn precompile<'p>(
    project: &'p Project,
    rasterizer: &dyn Rasterizer,
    config: &Config,
    observer: &mut dyn Observer,
) -> Result<Precompiled<'p>> {
    if project.scenes.is_empty() {
        return Err(Error::NoScenes);
    }

    observer.progress(Stage::Flags);
    let flags = collect_flags(&project.scenes);

    observer.progress(Stage::Strings);
    let strings = collect_strings(&project.scenes);

    observer.progress(Stage::Images);
    let (images, tilesets) = precompile_images(
        &project.images,
        &project.scenes,
        rasterizer,
        &config.project_root,
    )?;

    observer.progress(Stage::UiImages);
    let ui = precompile_ui(rasterizer, config, observer)?;

    observer.progress(Stage::Sprites);
    let sprites = precompile_sprites(
        &project.sprite_sheets,
        &project.scenes,
        project.settings.player_sprite_sheet_id.as_deref(),
        rasterizer,
        &config.project_root,
    )?;
    let player_sprite = resolve_player_sprite(
        &sprites,
        project.settings.player_sprite_sheet_id.as_deref(),
    )?;

    observer.progress(Stage::Scenes);
    let music = collect_music(&project.scenes, &project.music);
    let scenes = precompile_scenes(&project.scenes, &images, &sprites, observer)?;

    log::info!(
        "pooled {} flags, {} strings, {} images, {} tilesets, {} sprites, {} music tracks",
        flags.len(),
        strings.len(),
        images.len(),
        tilesets.len(),
        sprites.len(),
        music.len(),
    );

    Ok(Precompiled {
        flags,
        strings,
        images,
        tilesets,
        ui,
        sprites,
        player_sprite,
        music,
        scenes,
    })
}
