#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for tilebank projects.
//!
//! Two layers:
//! - **Deserialization layer** (`raw`): 1:1 mapping to the project JSON
//! - **Analysis layer** (`project`, `script`): typed scenes, actors, triggers
//!   and event scripts consumed by the compiler
//!
//! `AssetPool` is the ordered, deduplicated collection every compile stage
//! indexes into.

mod pool;
pub mod project;
pub mod raw;
pub mod script;


pub use pool::AssetPool;
pub use project::{
    Actor, AssetEntry, Direction, Movement, Project, Scene, Settings, Trigger, TriggerKind,
};
pub use script::{Command, CommandArgs, Script};
