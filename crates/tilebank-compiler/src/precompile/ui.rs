use std::fs;
use std::path::PathBuf;

use crate::observer::Observer;
use crate::raster::Rasterizer;
use crate::{Config, EntityRef, Error, Result};

pub const UI_IMAGE: &str = "assets/ui/ui.png";
pub const FONT_IMAGE: &str = "assets/ui/ascii.png";
pub const FRAME_IMAGE: &str = "assets/ui/frame.png";
pub const EMOTES_SPRITE: &str = "assets/ui/emotes.png";

/// Tile data of the fixed interface assets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiAssets {
    pub ui_tiles: Vec<u8>,
    pub font_tiles: Vec<u8>,
    pub frame_tiles: Vec<u8>,
    pub emotes_sprite: Vec<u8>,
}

pub fn precompile_ui(
    rasterizer: &dyn Rasterizer,
    config: &Config,
    observer: &mut dyn Observer,
) -> Result<UiAssets> {
    let mut image = |relative: &'static str| -> Result<Vec<u8>> {
        let path = ensure_project_asset(relative, config, observer)?;
        Ok(rasterizer.image_tiles(&path)?.to_bytes())
    };
    let ui_tiles = image(UI_IMAGE)?;
    let font_tiles = image(FONT_IMAGE)?;
    let frame_tiles = image(FRAME_IMAGE)?;

    let emotes = ensure_project_asset(EMOTES_SPRITE, config, observer)?;
    let emotes_sprite = rasterizer.sprite_tiles(&emotes)?;

    Ok(UiAssets {
        ui_tiles,
        font_tiles,
        frame_tiles,
        emotes_sprite,
    })
}

/// Path of a project asset, copying the template default into the
/// project first if the asset is missing.
pub fn ensure_project_asset(
    relative: &'static str,
    config: &Config,
    observer: &mut dyn Observer,
) -> Result<PathBuf> {
    let target = config.project_root.join(relative);
    if target.exists() {
        return Ok(target);
    }
    let Some(templates) = &config.template_root else {
        return Ok(target);
    };
    let source = templates.join(relative);
    if !source.exists() {
        return Ok(target);
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|err| Error::Io {
            path: parent.to_path_buf(),
            source: err,
        })?;
    }
    fs::copy(&source, &target).map_err(|err| Error::Io {
        path: target.clone(),
        source: err,
    })?;
    observer.warning(&format!(
        "{relative} was missing, copying default file to project assets"
    ));
    log::debug!("copied {} from {}", EntityRef::UiAsset(relative), source.display());
    Ok(target)
}
