//! Deserialization layer: 1:1 mapping to the project JSON.
//!
//! Every field the editor may omit is defaulted here so that the analysis
//! layer never has to deal with partially-filled records.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProject {
    #[serde(default)]
    pub settings: RawSettings,
    #[serde(default)]
    pub scenes: Vec<RawScene>,
    #[serde(default)]
    pub images: Vec<RawAsset>,
    #[serde(default)]
    pub sprite_sheets: Vec<RawAsset>,
    #[serde(default)]
    pub music: Vec<RawAsset>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSettings {
    pub start_scene_id: Option<String>,
    pub start_x: Option<u8>,
    pub start_y: Option<u8>,
    pub start_direction: Option<String>,
    pub player_sprite_sheet_id: Option<String>,
}

/// Catalog entry for an image, sprite sheet or music track.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAsset {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScene {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub image_id: Option<String>,
    #[serde(default)]
    pub actors: Vec<RawActor>,
    #[serde(default)]
    pub triggers: Vec<RawTrigger>,
    #[serde(default)]
    pub script: Vec<RawCommand>,
    #[serde(default)]
    pub collisions: Vec<u8>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActor {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub x: u8,
    #[serde(default)]
    pub y: u8,
    pub sprite_sheet_id: Option<String>,
    pub direction: Option<String>,
    pub movement_type: Option<String>,
    #[serde(default)]
    pub script: Vec<RawCommand>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrigger {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub x: u8,
    #[serde(default)]
    pub y: u8,
    #[serde(default)]
    pub width: u8,
    #[serde(default)]
    pub height: u8,
    pub trigger: Option<String>,
    #[serde(default)]
    pub script: Vec<RawCommand>,
}

/// One node of an event tree, exactly as the editor stores it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCommand {
    pub command: String,
    #[serde(default)]
    pub args: Option<RawArgs>,
    #[serde(default)]
    pub children: Option<RawChildren>,
}

/// Union of every argument a command may carry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArgs {
    pub flag: Option<String>,
    pub text: Option<String>,
    pub image_id: Option<String>,
    pub music_id: Option<String>,
    pub scene_id: Option<String>,
    pub actor_id: Option<String>,
    pub x: Option<u8>,
    pub y: Option<u8>,
    pub direction: Option<String>,
    /// Duration in seconds.
    pub time: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChildren {
    #[serde(rename = "true", default)]
    pub then: Vec<RawCommand>,
    #[serde(rename = "false", default)]
    pub otherwise: Vec<RawCommand>,
}

/// Parse project JSON into the raw layer.
pub fn parse_project(json: &str) -> Result<RawProject, serde_json::Error> {
    serde_json::from_str(json)
}
