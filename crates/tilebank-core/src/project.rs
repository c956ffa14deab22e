//! Analysis layer: the immutable project a compile runs against.

use crate::raw::{self, RawActor, RawAsset, RawProject, RawScene, RawSettings, RawTrigger};
use crate::script::Script;

/// Root input of a compile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    pub settings: Settings,
    pub scenes: Vec<Scene>,
    pub images: Vec<AssetEntry>,
    pub sprite_sheets: Vec<AssetEntry>,
    pub music: Vec<AssetEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub start_scene_id: Option<String>,
    pub start_x: u8,
    pub start_y: u8,
    pub start_direction: Direction,
    pub player_sprite_sheet_id: Option<String>,
}

/// Catalog entry for an image, sprite sheet or music track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetEntry {
    pub id: String,
    pub name: String,
    pub filename: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub id: String,
    pub name: String,
    pub image_id: Option<String>,
    pub actors: Vec<Actor>,
    pub triggers: Vec<Trigger>,
    pub script: Script,
    /// Packed collision bitmap, one bit per tile.
    pub collisions: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Actor {
    pub id: String,
    pub x: u8,
    pub y: u8,
    pub sprite_sheet_id: Option<String>,
    pub direction: Direction,
    pub movement: Movement,
    pub script: Script,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trigger {
    pub id: String,
    pub x: u8,
    pub y: u8,
    pub width: u8,
    pub height: u8,
    pub kind: TriggerKind,
    pub script: Script,
}

/// Facing direction. Unrecognized names fall back to `Down`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Down,
    Left,
    Right,
    Up,
}

/// Actor movement mode. Unrecognized names fall back to `Static`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Movement {
    #[default]
    Static,
    PlayerInput,
    RandomFace,
    FaceInteraction,
    RandomWalk,
}

/// What fires a trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    /// Player walks onto the trigger area.
    #[default]
    Walk,
    /// Player presses the action button while on the area.
    Action,
}

impl Project {
    /// Parse project JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        raw::parse_project(json).map(Self::from)
    }

    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|scene| scene.id == id)
    }
}

impl Scene {
    /// Every script of the scene in traversal order: the scene's own script,
    /// then actors, then triggers, each in declaration order.
    pub fn scripts(&self) -> impl Iterator<Item = &Script> {
        std::iter::once(&self.script)
            .chain(self.actors.iter().map(|actor| &actor.script))
            .chain(self.triggers.iter().map(|trigger| &trigger.script))
    }
}

impl Direction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "up" => Some(Self::Up),
            _ => None,
        }
    }

    pub fn parse_or_default(name: Option<&str>) -> Self {
        name.and_then(Self::from_name).unwrap_or_default()
    }

    /// Runtime direction code.
    pub fn code(self) -> u8 {
        match self {
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 4,
            Self::Up => 8,
        }
    }

    /// Signed unit step `(dx, dy)` for this direction, y growing downwards.
    pub fn unit_offset(self) -> (i8, i8) {
        match self {
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
        }
    }
}

impl Movement {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "static" => Some(Self::Static),
            "playerInput" => Some(Self::PlayerInput),
            "randomFace" => Some(Self::RandomFace),
            "faceInteraction" => Some(Self::FaceInteraction),
            "randomWalk" => Some(Self::RandomWalk),
            _ => None,
        }
    }

    pub fn parse_or_default(name: Option<&str>) -> Self {
        name.and_then(Self::from_name).unwrap_or_default()
    }

    /// Runtime movement code.
    pub fn code(self) -> u8 {
        match self {
            Self::Static => 1,
            Self::PlayerInput => 2,
            Self::RandomFace => 3,
            Self::FaceInteraction => 4,
            Self::RandomWalk => 5,
        }
    }
}

impl TriggerKind {
    pub fn parse_or_default(name: Option<&str>) -> Self {
        match name {
            Some("action") => Self::Action,
            _ => Self::Walk,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Walk => 0,
            Self::Action => 1,
        }
    }
}

impl From<RawProject> for Project {
    fn from(raw: RawProject) -> Self {
        Self {
            settings: raw.settings.into(),
            scenes: raw.scenes.into_iter().map(Scene::from).collect(),
            images: raw.images.into_iter().map(AssetEntry::from).collect(),
            sprite_sheets: raw.sprite_sheets.into_iter().map(AssetEntry::from).collect(),
            music: raw.music.into_iter().map(AssetEntry::from).collect(),
        }
    }
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        Self {
            start_scene_id: raw.start_scene_id,
            start_x: raw.start_x.unwrap_or(0),
            start_y: raw.start_y.unwrap_or(0),
            start_direction: Direction::parse_or_default(raw.start_direction.as_deref()),
            player_sprite_sheet_id: raw.player_sprite_sheet_id,
        }
    }
}

impl From<RawAsset> for AssetEntry {
    fn from(raw: RawAsset) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            filename: raw.filename,
        }
    }
}

impl From<RawScene> for Scene {
    fn from(raw: RawScene) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            image_id: raw.image_id,
            actors: raw.actors.into_iter().map(Actor::from).collect(),
            triggers: raw.triggers.into_iter().map(Trigger::from).collect(),
            script: raw.script.into(),
            collisions: raw.collisions,
        }
    }
}

impl From<RawActor> for Actor {
    fn from(raw: RawActor) -> Self {
        Self {
            id: raw.id,
            x: raw.x,
            y: raw.y,
            sprite_sheet_id: raw.sprite_sheet_id,
            direction: Direction::parse_or_default(raw.direction.as_deref()),
            movement: Movement::parse_or_default(raw.movement_type.as_deref()),
            script: raw.script.into(),
        }
    }
}

impl From<RawTrigger> for Trigger {
    fn from(raw: RawTrigger) -> Self {
        Self {
            id: raw.id,
            x: raw.x,
            y: raw.y,
            width: raw.width,
            height: raw.height,
            kind: TriggerKind::parse_or_default(raw.trigger.as_deref()),
            script: raw.script.into(),
        }
    }
}
