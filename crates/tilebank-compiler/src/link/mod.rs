//! Link pass: places every blob and record into banks.
//!
//! Placement order is fixed and decides every pointer:
//! 1. event blobs, per scene: scene script, actor scripts, trigger scripts
//! 2. tilesets
//! 3. images
//! 4. ui, font and frame tiles, then the emotes sprite
//! 5. sprites
//! 6. scene records

mod records;


use crate::bank::{BankAllocator, Pointer, place_blob};
use crate::emit::UiPointers;
use crate::event::{EventCompiler, EventContext, place_script};
use crate::observer::{Observer, Stage};
use crate::precompile::{Precompiled, SceneData};
use crate::{Config, EntityRef, Result};

pub use records::{
    ACTOR_RECORD_LEN, SPRITE_SLOT_BASE, SceneEvents, SpriteSlots, TRIGGER_RECORD_LEN,
    image_blob, scene_record, sprite_blob, tileset_blob,
};

/// Pointers of everything placed, per pool, plus the filled allocator.
#[derive(Debug)]
pub struct Linked {
    pub banked: BankAllocator,
    pub events: Vec<SceneEvents>,
    pub tilesets: Vec<Pointer>,
    pub images: Vec<Pointer>,
    pub ui: UiPointers,
    pub sprites: Vec<Pointer>,
    pub scenes: Vec<Pointer>,
}

/// Place all of `precompiled` into banks starting at `first_bank`.
pub fn link(
    precompiled: &Precompiled<'_>,
    compiler: &dyn EventCompiler,
    config: &Config,
    first_bank: u8,
    observer: &mut dyn Observer,
) -> Result<Linked> {
    let mut banked = BankAllocator::new(config.bank_size, first_bank);

    observer.progress(Stage::Events);
    let events = precompiled
        .scenes
        .iter()
        .map(|scene| place_events(scene, precompiled, compiler, config, &mut banked))
        .collect::<Result<Vec<_>>>()?;

    let tilesets = precompiled
        .tilesets
        .keys()
        .enumerate()
        .map(|(index, tileset)| {
            let blob = tileset_blob(index, tileset)?;
            place_blob(&mut banked, &blob, EntityRef::Tileset(index))
        })
        .collect::<Result<Vec<_>>>()?;

    let images = precompiled
        .images
        .iter()
        .map(|(id, image)| {
            let blob = image_blob(id, image)?;
            place_blob(&mut banked, &blob, EntityRef::Image(id.clone()))
        })
        .collect::<Result<Vec<_>>>()?;

    let assets = &precompiled.ui;
    let ui = UiPointers {
        ui: place_blob(&mut banked, &assets.ui_tiles, EntityRef::UiAsset("ui"))?,
        font: place_blob(&mut banked, &assets.font_tiles, EntityRef::UiAsset("font"))?,
        frame: place_blob(&mut banked, &assets.frame_tiles, EntityRef::UiAsset("frame"))?,
        emotes: place_blob(&mut banked, &assets.emotes_sprite, EntityRef::UiAsset("emotes"))?,
    };

    let sprites = precompiled
        .sprites
        .iter()
        .map(|(id, sprite)| {
            let blob = sprite_blob(id, sprite)?;
            place_blob(&mut banked, &blob, EntityRef::Sprite(id.clone()))
        })
        .collect::<Result<Vec<_>>>()?;

    let scenes = precompiled
        .scenes
        .iter()
        .zip(&events)
        .map(|(scene, scene_events)| {
            let record = scene_record(scene, scene_events)?;
            place_blob(&mut banked, &record, EntityRef::Scene(scene.id().to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    log::info!(
        "placed {} scenes across {} banks",
        scenes.len(),
        banked.banks().len()
    );

    Ok(Linked {
        banked,
        events,
        tilesets,
        images,
        ui,
        sprites,
        scenes,
    })
}

fn place_events(
    scene: &SceneData<'_>,
    precompiled: &Precompiled<'_>,
    compiler: &dyn EventCompiler,
    config: &Config,
    banked: &mut BankAllocator,
) -> Result<SceneEvents> {
    let context = EventContext::full(scene, precompiled);
    let policy = config.retry_placement;
    let scene_id = scene.id().to_string();

    let start = place_script(
        compiler,
        &scene.scene.script,
        &context,
        banked,
        policy,
        EntityRef::SceneScript {
            scene: scene_id.clone(),
        },
    )?;

    let actors = scene
        .actors
        .iter()
        .map(|entry| {
            let entity = EntityRef::ActorScript {
                scene: scene_id.clone(),
                actor: entry.actor.id.clone(),
            };
            place_script(compiler, &entry.actor.script, &context, banked, policy, entity)
        })
        .collect::<Result<Vec<_>>>()?;

    let triggers = scene
        .triggers
        .iter()
        .map(|trigger| {
            let entity = EntityRef::TriggerScript {
                scene: scene_id.clone(),
                trigger: trigger.id.clone(),
            };
            place_script(compiler, &trigger.script, &context, banked, policy, entity)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SceneEvents {
        scene: start,
        actors,
        triggers,
    })
}
