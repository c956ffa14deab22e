//! Textual artifacts: pointer tables, string banks and music bank slots.
//!
//! Every integer literal goes through [`hex8`] or [`hex16`] so the output
//! matches the target assembler's literal syntax.

mod data_ptrs;
mod literal;
mod music;
mod strings;

#[cfg(test)]
mod strings_tests;

pub use data_ptrs::{
    DataPtrs, PointerTables, StartScene, UiPointers, data_ptrs_header, data_ptrs_source,
};
pub use literal::{hex8, hex16};
pub use music::{MusicTrack, assign_music_banks};
pub use strings::{
    STRING_TEXT_BYTES, STRING_RECORD_WIDTH, StringBank, chunk_strings, overlong_strings,
    string_bank_source,
};
#[cfg(test)]
pub(crate) use strings::record_text;
