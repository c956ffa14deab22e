//! Tilebank compiler: turns a project into banked binary data and C sources.
//!
//! The pipeline runs strictly in order:
//! - `precompile` - deduplicated asset pools and per-scene data
//! - `link` - event compilation and placement of every record into banks
//! - `bank` - the bin-packing allocator and bank source export
//! - `emit` - pointer tables, string banks and music bank assignment
//!
//! `raster` and `event` define the two external boundaries: pixel-to-tile
//! conversion and script-to-bytecode compilation.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::path::PathBuf;

pub mod bank;
mod compile;
mod config;
pub mod emit;
mod entity;
pub mod event;
pub mod link;
mod observer;
pub mod precompile;
pub mod raster;

#[cfg(test)]
mod compile_tests;
#[cfg(test)]
pub mod test_utils;

pub use bank::{BankAllocator, Pointer};
pub use compile::{Output, Summary, compile};
pub use config::{Config, RetryPlacement};
pub use emit::MusicTrack;
pub use entity::EntityRef;
pub use event::{CommandStreamCompiler, EventCompileError, EventCompiler, EventContext};
pub use observer::{Callbacks, LogObserver, NoopObserver, Observer, Stage};
pub use raster::{CachedRasterizer, RasterError, Rasterizer, TileImage};

#[cfg(feature = "png")]
pub use raster::PngRasterizer;

/// Errors that abort a compile. No output is produced when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no scenes are included in the project")]
    NoScenes,

    #[error("scene #{index} '{name}' has missing or no image assigned")]
    MissingSceneImage { index: usize, name: String },

    #[error("player sprite has not been set and no animated actor sprite sheet exists")]
    NoPlayerSprite,

    /// A single blob is larger than a whole bank.
    #[error("{entity} needs {size} bytes but a bank holds only {capacity}")]
    BankOverflow {
        entity: EntityRef,
        size: usize,
        capacity: usize,
    },

    #[error("{entity} would open bank {bank}, past the last addressable bank 255")]
    OutOfBanks { entity: EntityRef, bank: usize },

    /// A value does not fit the byte field of its record.
    #[error("{entity}: {field} value {value} does not fit in a byte")]
    FieldOverflow {
        entity: EntityRef,
        field: &'static str,
        value: usize,
    },

    #[error("failed to compile events for {entity}: {source}")]
    EventCompile {
        entity: EntityRef,
        #[source]
        source: EventCompileError,
    },

    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error("failed to prepare '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for compile operations.
pub type Result<T> = std::result::Result<T, Error>;
