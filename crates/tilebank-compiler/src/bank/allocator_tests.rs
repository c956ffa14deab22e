use super::{AllocError, BankAllocator, Pointer};

#[test]
fn pointer_bytes_are_bank_then_big_endian_offset() {
    assert_eq!(Pointer::new(18, 0x1234).to_bytes(), [18, 0x12, 0x34]);
    assert_eq!(Pointer::default().to_bytes(), [0, 0, 0]);
}

#[test]
fn fresh_allocator_fits_up_to_capacity() {
    let banked = BankAllocator::new(8, 17);

    assert!(banked.fits(&[0; 8]));
    assert!(!banked.fits(&[0; 9]));
    assert!(banked.banks().is_empty());
}

#[test]
fn fills_current_bank_before_opening_next() {
    let mut banked = BankAllocator::new(8, 17);

    let a = banked.push(&[1, 2, 3]).unwrap();
    let b = banked.push(&[4, 5, 6, 7, 8]).unwrap();
    let c = banked.push(&[9]).unwrap();

    assert_eq!(a, Pointer::new(17, 0));
    assert_eq!(b, Pointer::new(17, 3));
    assert_eq!(c, Pointer::new(18, 0));
    assert_eq!(banked.banks().len(), 2);
    assert_eq!(banked.next_free_bank(), 19);
}

#[test]
fn earlier_banks_are_never_revisited() {
    let mut banked = BankAllocator::new(8, 20);

    banked.push(&[0; 6]).unwrap();
    banked.push(&[0; 6]).unwrap();
    // Bank 20 has room for two bytes, but the cursor is bank 21.
    let p = banked.push(&[0; 2]).unwrap();

    assert_eq!(p, Pointer::new(21, 6));
}

#[test]
fn placed_bytes_are_stable() {
    let mut banked = BankAllocator::new(16, 17);
    let blobs: Vec<Vec<u8>> = (1..=7u8).map(|n| vec![n; n as usize]).collect();

    let pointers: Vec<Pointer> = blobs.iter().map(|b| banked.push(b).unwrap()).collect();

    for (pointer, blob) in pointers.iter().zip(&blobs) {
        assert_eq!(banked.read(*pointer, blob.len()), Some(blob.as_slice()));
    }
    for bank in banked.banks() {
        assert!(bank.data.len() <= 16);
    }
}

#[test]
fn full_bank_blob_is_accepted() {
    let mut banked = BankAllocator::new(4, 17);
    banked.push(&[1]).unwrap();

    let p = banked.push(&[2; 4]).unwrap();

    assert_eq!(p, Pointer::new(18, 0));
}

#[test]
fn oversized_blob_is_rejected() {
    let mut banked = BankAllocator::new(4, 17);

    let err = banked.push(&[0; 5]).unwrap_err();

    assert_eq!(
        err,
        AllocError::Oversized {
            size: 5,
            capacity: 4
        }
    );
    assert!(banked.banks().is_empty());
}

#[test]
fn bank_numbers_stop_at_255() {
    let mut banked = BankAllocator::new(1, 254);
    banked.push(&[0]).unwrap();
    banked.push(&[0]).unwrap();

    let err = banked.push(&[0]).unwrap_err();

    assert_eq!(err, AllocError::OutOfBanks { bank: 256 });
    assert_eq!(err.to_string(), "bank 256 is past the last addressable bank");
}

#[test]
fn read_outside_placed_range() {
    let mut banked = BankAllocator::new(8, 17);
    let p = banked.push(&[1, 2]).unwrap();

    assert_eq!(banked.read(p, 3), None);
    assert_eq!(banked.read(Pointer::new(16, 0), 1), None);
    assert_eq!(banked.read(Pointer::new(18, 0), 1), None);
}

#[test]
fn empty_blob_after_full_bank_opens_next() {
    let mut banked = BankAllocator::new(4, 17);
    banked.push(&[1; 4]).unwrap();

    assert!(!banked.fits(&[]));
    let p = banked.push(&[]).unwrap();

    assert_eq!(p, Pointer::new(18, 0));
    assert_eq!(banked.read(p, 0), Some(&[][..]));
}

#[test]
fn full_size_bank_offsets_stay_in_range() {
    let mut banked = BankAllocator::new(0x10000, 17);
    banked.push(&vec![0; 0x10000]).unwrap();

    let p = banked.push(&[]).unwrap();

    assert_eq!(p, Pointer::new(18, 0));
}
