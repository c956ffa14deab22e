//! Fixed-layout records and asset blobs.

use std::collections::HashMap;

use crate::bank::Pointer;
use crate::precompile::{SceneData, Tileset, UsedImage, UsedSprite};
use crate::raster::TILE_BYTES;
use crate::{EntityRef, Error, Result};

/// First sprite slot available to a scene's actors.
pub const SPRITE_SLOT_BASE: usize = 6;

pub const ACTOR_RECORD_LEN: usize = 9;
pub const TRIGGER_RECORD_LEN: usize = 8;

/// Event pointers of one scene, in compile order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneEvents {
    pub scene: Pointer,
    pub actors: Vec<Pointer>,
    pub triggers: Vec<Pointer>,
}

/// Per-scene sprite slot table.
///
/// A sprite takes the cursor slot the first time an actor wears it; the
/// cursor then advances by the sprite's frame count.
#[derive(Clone, Debug)]
pub struct SpriteSlots {
    slots: HashMap<usize, usize>,
    cursor: usize,
}

impl Default for SpriteSlots {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            cursor: SPRITE_SLOT_BASE,
        }
    }
}

impl SpriteSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&mut self, sprite: usize, frames: usize) -> usize {
        if let Some(&slot) = self.slots.get(&sprite) {
            return slot;
        }
        let slot = self.cursor;
        self.slots.insert(sprite, slot);
        self.cursor += frames;
        slot
    }
}

/// Byte buffer whose narrowing writes fail with the owning entity.
struct RecordWriter {
    entity: EntityRef,
    out: Vec<u8>,
}

impl RecordWriter {
    fn new(entity: EntityRef) -> Self {
        Self {
            entity,
            out: Vec::new(),
        }
    }

    fn byte(&mut self, field: &'static str, value: usize) -> Result<()> {
        let byte = u8::try_from(value).map_err(|_| self.overflow(field, value))?;
        self.out.push(byte);
        Ok(())
    }

    fn word(&mut self, field: &'static str, value: usize) -> Result<()> {
        let word = u16::try_from(value).map_err(|_| self.overflow(field, value))?;
        self.out.extend_from_slice(&word.to_be_bytes());
        Ok(())
    }

    fn bytes(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
    }

    fn pointer(&mut self, pointer: Pointer) {
        self.out.extend_from_slice(&pointer.to_bytes());
    }

    fn overflow(&self, field: &'static str, value: usize) -> Error {
        Error::FieldOverflow {
            entity: self.entity.clone(),
            field,
            value,
        }
    }

    fn finish(self) -> Vec<u8> {
        self.out
    }
}

pub fn tileset_blob(index: usize, tileset: &Tileset) -> Result<Vec<u8>> {
    let mut w = RecordWriter::new(EntityRef::Tileset(index));
    w.byte("tile count", tileset.len())?;
    for tile in tileset {
        w.bytes(tile);
    }
    debug_assert_eq!(w.out.len(), 1 + tileset.len() * TILE_BYTES);
    Ok(w.finish())
}

pub fn image_blob(id: &str, image: &UsedImage) -> Result<Vec<u8>> {
    let mut w = RecordWriter::new(EntityRef::Image(id.to_string()));
    w.byte("tileset index", image.tileset)?;
    w.byte("width", image.width)?;
    w.byte("height", image.height)?;
    w.bytes(&image.tilemap);
    Ok(w.finish())
}

pub fn sprite_blob(id: &str, sprite: &UsedSprite) -> Result<Vec<u8>> {
    let mut w = RecordWriter::new(EntityRef::Sprite(id.to_string()));
    w.byte("frame count", sprite.frames)?;
    w.bytes(&sprite.data);
    Ok(w.finish())
}

/// Scene record: background, sprite table, actors, triggers, collisions
/// and the scene's own event pointer.
pub fn scene_record(scene: &SceneData<'_>, events: &SceneEvents) -> Result<Vec<u8>> {
    let mut w = RecordWriter::new(EntityRef::Scene(scene.id().to_string()));

    w.word("image index", scene.image)?;

    w.byte("sprite count", scene.sprites.len())?;
    for &sprite in &scene.sprites {
        w.byte("sprite index", sprite)?;
    }

    w.byte("actor count", scene.actors.len())?;
    write_actors(&mut w, scene, &events.actors)?;

    w.byte("trigger count", scene.triggers.len())?;
    write_triggers(&mut w, scene, &events.triggers);

    let collisions_len = (scene.width * scene.height).div_ceil(8);
    w.byte("collision length", collisions_len)?;
    let mut collisions = scene.scene.collisions.clone();
    collisions.resize(collisions_len, 0);
    w.bytes(&collisions);

    w.pointer(events.scene);
    Ok(w.finish())
}

fn write_actors(w: &mut RecordWriter, scene: &SceneData<'_>, events: &[Pointer]) -> Result<()> {
    let mut slots = SpriteSlots::new();
    for (entry, &event) in scene.actors.iter().zip(events) {
        let actor = entry.actor;
        w.byte("sprite slot", slots.slot(entry.sprite, entry.frames))?;
        w.bytes(&[
            entry.kind.code(),
            actor.x,
            actor.y,
            actor.direction.code(),
            actor.movement.code(),
        ]);
        w.pointer(event);
    }
    Ok(())
}

fn write_triggers(w: &mut RecordWriter, scene: &SceneData<'_>, events: &[Pointer]) {
    for (trigger, &event) in scene.triggers.iter().zip(events) {
        w.bytes(&[
            trigger.x,
            trigger.y,
            trigger.width.max(1),
            trigger.height.max(1),
            trigger.kind.code(),
        ]);
        w.pointer(event);
    }
}
