//! Event compiler boundary and the retry policy around it.
//!
//! A script compiles to one position-independent blob. The compiler sees
//! the pools through an [`EventContext`]; a reduced context drops the image
//! and music tables, producing a smaller blob for the retry path.

mod retry;
mod stream;


use tilebank_core::{AssetPool, Script};

use crate::precompile::{Precompiled, SceneData, UsedImage, UsedMusic};

pub use retry::place_script;
pub use stream::{CommandStreamCompiler, opcode};

/// Pools visible to one script compilation.
#[derive(Clone, Copy, Debug)]
pub struct EventContext<'a> {
    /// Scene owning the script.
    pub scene: &'a SceneData<'a>,
    pub scenes: &'a [SceneData<'a>],
    pub strings: &'a AssetPool<String>,
    pub flags: &'a AssetPool<String>,
    pub images: Option<&'a AssetPool<String, UsedImage>>,
    pub music: Option<&'a AssetPool<String, UsedMusic>>,
}

impl<'a> EventContext<'a> {
    /// Context with every pool.
    pub fn full(scene: &'a SceneData<'a>, precompiled: &'a Precompiled<'a>) -> Self {
        Self {
            scene,
            scenes: &precompiled.scenes,
            strings: &precompiled.strings,
            flags: &precompiled.flags,
            images: Some(&precompiled.images),
            music: Some(&precompiled.music),
        }
    }

    /// The same context without the image and music pools.
    pub fn reduced(self) -> Self {
        Self {
            images: None,
            music: None,
            ..self
        }
    }

    pub fn is_reduced(&self) -> bool {
        self.images.is_none() && self.music.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EventCompileError {
    #[error("the {what} table is not available in this context")]
    MissingContext { what: &'static str },

    #[error("unknown {kind} '{id}'")]
    UnresolvedReference { kind: &'static str, id: String },

    #[error("{what} {value} does not fit its operand")]
    OutOfRange { what: &'static str, value: usize },

    #[error("{0}")]
    Other(String),
}

/// Compiles one script into a bytecode blob.
///
/// Must be pure: the same script and context always yield the same bytes.
pub trait EventCompiler {
    fn compile(
        &self,
        script: &Script,
        context: &EventContext<'_>,
    ) -> Result<Vec<u8>, EventCompileError>;
}

impl<F> EventCompiler for F
where
    F: Fn(&Script, &EventContext<'_>) -> Result<Vec<u8>, EventCompileError>,
{
    fn compile(
        &self,
        script: &Script,
        context: &EventContext<'_>,
    ) -> Result<Vec<u8>, EventCompileError> {
        self(script, context)
    }
}
