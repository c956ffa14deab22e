//! Compile configuration.

use std::path::{Path, PathBuf};

use crate::bank::{GB_MAX_BANK_SIZE, MIN_DATA_BANK};
use crate::{Error, Result};

/// Maximum string records per string-table bank.
pub const STRINGS_PER_BANK: usize = 430;

/// Round-robin bank slots music tracks are spread over.
pub const NUM_MUSIC_BANKS: usize = 8;

/// Which blob is placed when a full-context event blob overflows the
/// current bank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RetryPlacement {
    /// Place the reduced-context blob; fall back to the original when the
    /// reduced compile fails.
    #[default]
    Reduced,
    /// Always place the original blob. Matches output of older toolchains
    /// byte for byte.
    Original,
}

/// Configuration for a compile.
#[derive(Clone, Debug)]
pub struct Config {
    pub(crate) bank_size: usize,
    pub(crate) bank_offset: u8,
    pub(crate) strings_per_bank: usize,
    pub(crate) music_bank_slots: usize,
    pub(crate) retry_placement: RetryPlacement,
    pub(crate) project_root: PathBuf,
    pub(crate) template_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bank_size: GB_MAX_BANK_SIZE,
            bank_offset: MIN_DATA_BANK,
            strings_per_bank: STRINGS_PER_BANK,
            music_bank_slots: NUM_MUSIC_BANKS,
            retry_placement: RetryPlacement::default(),
            project_root: PathBuf::from("."),
            template_root: None,
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capacity of one bank in bytes.
    pub fn bank_size(mut self, value: usize) -> Self {
        self.bank_size = value;
        self
    }

    /// Set the first bank number available to this compile.
    pub fn bank_offset(mut self, value: u8) -> Self {
        self.bank_offset = value;
        self
    }

    /// Set the maximum number of string records per string bank.
    pub fn strings_per_bank(mut self, value: usize) -> Self {
        self.strings_per_bank = value;
        self
    }

    /// Set the number of round-robin music bank slots.
    pub fn music_bank_slots(mut self, value: usize) -> Self {
        self.music_bank_slots = value;
        self
    }

    pub fn retry_placement(mut self, value: RetryPlacement) -> Self {
        self.retry_placement = value;
        self
    }

    /// Set the project directory assets are resolved against.
    pub fn project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = path.into();
        self
    }

    /// Set the directory default UI assets are copied from.
    pub fn template_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_root = Some(path.into());
        self
    }

    pub fn get_bank_size(&self) -> usize {
        self.bank_size
    }

    pub fn get_bank_offset(&self) -> u8 {
        self.bank_offset
    }

    pub fn get_project_root(&self) -> &Path {
        &self.project_root
    }

    /// Reject values the pipeline cannot honor.
    pub fn validate(&self) -> Result<()> {
        // Offsets are emitted as 16-bit values.
        if self.bank_size == 0 || self.bank_size > 0x1_0000 {
            return Err(Error::InvalidConfig(format!(
                "bank size must be between 1 and 65536 bytes, got {}",
                self.bank_size
            )));
        }
        if self.strings_per_bank == 0 {
            return Err(Error::InvalidConfig(
                "strings per bank must be at least 1".to_string(),
            ));
        }
        if self.music_bank_slots == 0 {
            return Err(Error::InvalidConfig(
                "music bank slots must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
