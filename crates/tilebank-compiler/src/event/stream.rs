//! Reference event compiler: a flat, big-endian command stream.
//!
//! Blob layout:
//! - byte 0: table flags (bit 0 image table, bit 1 music table)
//! - image table, if present: count (u8), then per image
//!   `pool index (u16), width (u8), height (u8)`
//! - music table, if present: count (u8), then one pool index (u8) per track
//! - commands, terminated by [`opcode::END`]
//!
//! `IF_FLAG` carries both branches inline, each prefixed with its byte
//! length, so the stream stays position-independent.

use tilebank_core::{Command, Script};

use super::{EventCompileError, EventCompiler, EventContext};
use crate::precompile::normalize_text;

pub mod opcode {
    pub const END: u8 = 0x00;
    pub const TEXT: u8 = 0x01;
    pub const SET_FLAG: u8 = 0x02;
    pub const CLEAR_FLAG: u8 = 0x03;
    pub const IF_FLAG: u8 = 0x04;
    pub const SWITCH_SCENE: u8 = 0x05;
    pub const WAIT: u8 = 0x06;
    pub const CAMERA_SHAKE: u8 = 0x07;
    pub const MUSIC_PLAY: u8 = 0x08;
    pub const MUSIC_STOP: u8 = 0x09;
    pub const LOAD_IMAGE: u8 = 0x0A;
    pub const ACTOR_SET_DIRECTION: u8 = 0x0B;
}

pub const HAS_IMAGE_TABLE: u8 = 0b01;
pub const HAS_MUSIC_TABLE: u8 = 0b10;

/// Actor operand addressing the player.
pub const PLAYER_ACTOR: u8 = 0;

#[derive(Clone, Copy, Debug, Default)]
pub struct CommandStreamCompiler;

impl EventCompiler for CommandStreamCompiler {
    fn compile(
        &self,
        script: &Script,
        context: &EventContext<'_>,
    ) -> Result<Vec<u8>, EventCompileError> {
        let mut stream = Stream {
            context,
            out: Vec::new(),
        };
        stream.tables()?;
        stream.script(script)?;
        stream.out.push(opcode::END);
        Ok(stream.out)
    }
}

struct Stream<'c, 'a> {
    context: &'c EventContext<'a>,
    out: Vec<u8>,
}

type EncodeResult = Result<(), EventCompileError>;

impl Stream<'_, '_> {
    fn tables(&mut self) -> EncodeResult {
        let mut flags = 0;
        if self.context.images.is_some() {
            flags |= HAS_IMAGE_TABLE;
        }
        if self.context.music.is_some() {
            flags |= HAS_MUSIC_TABLE;
        }
        self.out.push(flags);

        if let Some(images) = self.context.images {
            self.byte(images.len(), "image table size")?;
            for (index, image) in images.values().enumerate() {
                self.word(index, "image index")?;
                self.byte(image.width, "image width")?;
                self.byte(image.height, "image height")?;
            }
        }
        if let Some(music) = self.context.music {
            self.byte(music.len(), "music table size")?;
            for index in 0..music.len() {
                self.byte(index, "music index")?;
            }
        }
        Ok(())
    }

    fn script(&mut self, script: &Script) -> EncodeResult {
        script
            .commands()
            .iter()
            .try_for_each(|command| self.command(command))
    }

    fn command(&mut self, command: &Command) -> EncodeResult {
        match command {
            // The stream carries a single terminator, appended by the caller.
            Command::End => {}
            Command::Text { text } => {
                let pooled = self.context.strings.index_of(&normalize_text(text));
                let index = resolve(pooled, "string", text)?;
                self.out.push(opcode::TEXT);
                self.word(index, "string index")?;
            }
            Command::SetFlag { flag } => self.flag(opcode::SET_FLAG, flag)?,
            Command::ClearFlag { flag } => self.flag(opcode::CLEAR_FLAG, flag)?,
            Command::IfFlag {
                flag,
                then,
                otherwise,
            } => {
                self.flag(opcode::IF_FLAG, flag)?;
                self.branch(then)?;
                self.branch(otherwise)?;
            }
            Command::SwitchScene {
                scene_id,
                x,
                y,
                direction,
            } => {
                let scene = self.context.scenes.iter().position(|s| s.id() == scene_id);
                let index = resolve(scene, "scene", scene_id)?;
                self.out.push(opcode::SWITCH_SCENE);
                self.word(index, "scene index")?;
                self.out.extend_from_slice(&[*x, *y, direction.code()]);
            }
            Command::Wait { frames } => self.out.extend_from_slice(&[opcode::WAIT, *frames]),
            Command::CameraShake { frames } => {
                self.out.extend_from_slice(&[opcode::CAMERA_SHAKE, *frames])
            }
            Command::PlayMusic { music_id } => {
                let music = self
                    .context
                    .music
                    .ok_or(EventCompileError::MissingContext { what: "music" })?;
                let index = match music_id {
                    Some(id) => resolve(music.index_of(id.as_str()), "music track", id)?,
                    None => {
                        resolve((!music.is_empty()).then_some(0), "music track", "<default>")?
                    }
                };
                self.out.push(opcode::MUSIC_PLAY);
                self.byte(index, "music index")?;
            }
            Command::StopMusic => self.out.push(opcode::MUSIC_STOP),
            Command::LoadImage { image_id } => {
                let images = self
                    .context
                    .images
                    .ok_or(EventCompileError::MissingContext { what: "image" })?;
                let index = resolve(images.index_of(image_id.as_str()), "image", image_id)?;
                self.out.push(opcode::LOAD_IMAGE);
                self.byte(index, "image index")?;
            }
            Command::ActorSetDirection {
                actor_id,
                direction,
            } => {
                let actor = self.actor_operand(actor_id)?;
                self.out
                    .extend_from_slice(&[opcode::ACTOR_SET_DIRECTION, actor, direction.code()]);
            }
            Command::Custom { name, .. } => {
                log::debug!("no encoding for '{name}', skipped");
            }
        }
        Ok(())
    }

    fn flag(&mut self, op: u8, flag: &str) -> EncodeResult {
        let index = resolve(self.context.flags.index_of(flag), "flag", flag)?;
        self.out.push(op);
        self.word(index, "flag index")
    }

    /// Length-prefixed nested script.
    fn branch(&mut self, script: &Script) -> EncodeResult {
        let mut nested = Stream {
            context: self.context,
            out: Vec::new(),
        };
        nested.script(script)?;
        self.word(nested.out.len(), "branch length")?;
        self.out.extend_from_slice(&nested.out);
        Ok(())
    }

    /// Actors are addressed by position in the scene's actor table, after
    /// the player.
    fn actor_operand(&self, actor_id: &str) -> Result<u8, EventCompileError> {
        if actor_id == "player" {
            return Ok(PLAYER_ACTOR);
        }
        let position = self
            .context
            .scene
            .actors
            .iter()
            .position(|entry| entry.actor.id == actor_id);
        let index = resolve(position, "actor", actor_id)? + 1;
        u8::try_from(index).map_err(|_| EventCompileError::OutOfRange {
            what: "actor index",
            value: index,
        })
    }

    fn byte(&mut self, value: usize, what: &'static str) -> EncodeResult {
        let byte =
            u8::try_from(value).map_err(|_| EventCompileError::OutOfRange { what, value })?;
        self.out.push(byte);
        Ok(())
    }

    fn word(&mut self, value: usize, what: &'static str) -> EncodeResult {
        let word =
            u16::try_from(value).map_err(|_| EventCompileError::OutOfRange { what, value })?;
        self.out.extend_from_slice(&word.to_be_bytes());
        Ok(())
    }
}

fn resolve(
    index: Option<usize>,
    kind: &'static str,
    id: &str,
) -> Result<usize, EventCompileError> {
    index.ok_or_else(|| EventCompileError::UnresolvedReference {
        kind,
        id: id.to_string(),
    })
}
