//! Bin-packing bank allocator.
//!
//! Blobs are appended to the cursor bank, the last one opened. A blob that
//! does not fit opens the next bank; earlier banks are never revisited, so
//! placement order decides every pointer.

mod export;

#[cfg(test)]
mod allocator_tests;
#[cfg(test)]
mod export_tests;

pub use export::{bank_source, banks_header};

use crate::{EntityRef, Error, Result};

/// Capacity of one switchable ROM bank.
pub const GB_MAX_BANK_SIZE: usize = 16384;

/// First bank free for data; lower banks hold the engine.
pub const MIN_DATA_BANK: u8 = 17;

/// Stable reference to a placed blob.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pointer {
    pub bank: u8,
    pub offset: u16,
}

impl Pointer {
    pub fn new(bank: u8, offset: u16) -> Self {
        Self { bank, offset }
    }

    /// Record encoding: bank, then the offset high byte first.
    pub fn to_bytes(self) -> [u8; 3] {
        let [hi, lo] = self.offset.to_be_bytes();
        [self.bank, hi, lo]
    }
}

/// One opened bank and the bytes placed in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bank {
    pub number: u8,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    #[error("blob of {size} bytes exceeds bank capacity {capacity}")]
    Oversized { size: usize, capacity: usize },

    #[error("bank {bank} is past the last addressable bank")]
    OutOfBanks { bank: usize },
}

#[derive(Clone, Debug)]
pub struct BankAllocator {
    capacity: usize,
    first_bank: u8,
    banks: Vec<Bank>,
}

impl BankAllocator {
    /// `capacity` must not exceed the 16-bit offset space.
    pub fn new(capacity: usize, first_bank: u8) -> Self {
        debug_assert!(capacity <= 0x10000);
        Self {
            capacity,
            first_bank,
            banks: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn first_bank(&self) -> u8 {
        self.first_bank
    }

    /// Whether `blob` fits the cursor bank. Before the first push the
    /// cursor is an empty bank. A full bank has no addressable offset left,
    /// not even for an empty blob.
    pub fn fits(&self, blob: &[u8]) -> bool {
        let used = self.cursor_used();
        used < self.capacity && used + blob.len() <= self.capacity
    }

    /// Place `blob` in the cursor bank, opening the next bank if it does
    /// not fit.
    pub fn push(&mut self, blob: &[u8]) -> std::result::Result<Pointer, AllocError> {
        if blob.len() > self.capacity {
            return Err(AllocError::Oversized {
                size: blob.len(),
                capacity: self.capacity,
            });
        }
        if self.banks.is_empty() || !self.fits(blob) {
            self.open_bank()?;
        }

        let cursor = self.banks.len() - 1;
        let bank = &mut self.banks[cursor];
        let offset = bank.data.len();
        bank.data.extend_from_slice(blob);

        log::trace!("placed {} bytes at {}:{offset:#06x}", blob.len(), bank.number);
        // Offsets stay below `capacity`, which fits in 16 bits.
        Ok(Pointer::new(bank.number, offset as u16))
    }

    /// Bytes at `pointer`, if that range has been placed.
    pub fn read(&self, pointer: Pointer, len: usize) -> Option<&[u8]> {
        let index = usize::from(pointer.bank.checked_sub(self.first_bank)?);
        let start = usize::from(pointer.offset);
        self.banks.get(index)?.data.get(start..start.checked_add(len)?)
    }

    pub fn banks(&self) -> &[Bank] {
        &self.banks
    }

    pub fn into_banks(self) -> Vec<Bank> {
        self.banks
    }

    /// Number of the first bank after every opened one.
    pub fn next_free_bank(&self) -> usize {
        usize::from(self.first_bank) + self.banks.len()
    }

    fn cursor_used(&self) -> usize {
        self.banks.last().map_or(0, |bank| bank.data.len())
    }

    fn open_bank(&mut self) -> std::result::Result<(), AllocError> {
        let bank = self.next_free_bank();
        let number = u8::try_from(bank).map_err(|_| AllocError::OutOfBanks { bank })?;
        log::debug!("opening bank {number}");
        self.banks.push(Bank {
            number,
            data: Vec::with_capacity(self.capacity),
        });
        Ok(())
    }
}

/// Push `blob`, attributing a failure to `entity`.
pub(crate) fn place_blob(
    banked: &mut BankAllocator,
    blob: &[u8],
    entity: EntityRef,
) -> Result<Pointer> {
    banked.push(blob).map_err(|err| match err {
        AllocError::Oversized { size, capacity } => Error::BankOverflow {
            entity,
            size,
            capacity,
        },
        AllocError::OutOfBanks { bank } => Error::OutOfBanks { entity, bank },
    })
}
