//! Identification of the entity a compile error is about.

use std::fmt;

/// The project entity a placed blob or record belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    SceneScript { scene: String },
    ActorScript { scene: String, actor: String },
    TriggerScript { scene: String, trigger: String },
    Tileset(usize),
    Image(String),
    Sprite(String),
    Scene(String),
    UiAsset(&'static str),
    StringTable,
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SceneScript { scene } => write!(f, "script of scene '{scene}'"),
            Self::ActorScript { scene, actor } => {
                write!(f, "script of actor '{actor}' in scene '{scene}'")
            }
            Self::TriggerScript { scene, trigger } => {
                write!(f, "script of trigger '{trigger}' in scene '{scene}'")
            }
            Self::Tileset(index) => write!(f, "tileset #{index}"),
            Self::Image(id) => write!(f, "image '{id}'"),
            Self::Sprite(id) => write!(f, "sprite sheet '{id}'"),
            Self::Scene(id) => write!(f, "scene '{id}'"),
            Self::UiAsset(name) => write!(f, "ui asset '{name}'"),
            Self::StringTable => write!(f, "string table"),
        }
    }
}
