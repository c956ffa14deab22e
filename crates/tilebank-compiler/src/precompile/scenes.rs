use tilebank_core::{Actor, AssetPool, Scene, Trigger};

use super::{SpriteKind, UsedImage, UsedSprite};
use crate::observer::Observer;
use crate::{Error, Result};

/// A scene with its references resolved against the pools.
#[derive(Debug, Clone)]
pub struct SceneData<'p> {
    pub scene: &'p Scene,
    /// Image pool index of the background.
    pub image: usize,
    /// Width in tiles.
    pub width: usize,
    /// Height in tiles.
    pub height: usize,
    /// Actors whose sprite sheet is pooled.
    pub actors: Vec<SceneActor<'p>>,
    /// Triggers with a non-trivial script.
    pub triggers: Vec<&'p Trigger>,
    /// Sprite pool indices worn by `actors`, first-seen order.
    pub sprites: Vec<usize>,
}

/// An actor with its sprite sheet resolved.
#[derive(Debug, Clone, Copy)]
pub struct SceneActor<'p> {
    pub actor: &'p Actor,
    /// Sprite pool index.
    pub sprite: usize,
    pub frames: usize,
    pub kind: SpriteKind,
}

impl SceneData<'_> {
    pub fn id(&self) -> &str {
        &self.scene.id
    }
}

pub fn precompile_scenes<'p>(
    scenes: &'p [Scene],
    images: &AssetPool<String, UsedImage>,
    sprites: &AssetPool<String, UsedSprite>,
    observer: &mut dyn Observer,
) -> Result<Vec<SceneData<'p>>> {
    scenes
        .iter()
        .enumerate()
        .map(|(index, scene)| resolve_scene(index, scene, images, sprites, observer))
        .collect()
}

fn resolve_scene<'p>(
    index: usize,
    scene: &'p Scene,
    images: &AssetPool<String, UsedImage>,
    sprites: &AssetPool<String, UsedSprite>,
    observer: &mut dyn Observer,
) -> Result<SceneData<'p>> {
    let (image, background) = scene
        .image_id
        .as_deref()
        .and_then(|id| Some((images.index_of(id)?, images.get(id)?)))
        .ok_or_else(|| Error::MissingSceneImage {
            index,
            name: scene.name.clone(),
        })?;

    let mut actors = Vec::with_capacity(scene.actors.len());
    let mut worn = Vec::new();
    for actor in &scene.actors {
        let Some((sprite, used)) = actor
            .sprite_sheet_id
            .as_deref()
            .and_then(|id| Some((sprites.index_of(id)?, sprites.get(id)?)))
        else {
            let message = format!(
                "scene '{}': dropping actor '{}' with unknown sprite sheet",
                scene.name, actor.id
            );
            log::warn!("{message}");
            observer.warning(&message);
            continue;
        };
        if !worn.contains(&sprite) {
            worn.push(sprite);
        }
        actors.push(SceneActor {
            actor,
            sprite,
            frames: used.frames,
            kind: used.kind,
        });
    }

    let triggers = scene
        .triggers
        .iter()
        .filter(|trigger| !trigger.script.is_trivial())
        .collect();

    Ok(SceneData {
        scene,
        image,
        width: background.width,
        height: background.height,
        actors,
        triggers,
        sprites: worn,
    })
}
