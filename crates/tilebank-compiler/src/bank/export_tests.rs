use super::{Bank, bank_source, banks_header};

#[test]
fn header_lists_every_bank() {
    let banks = vec![
        Bank {
            number: 19,
            data: vec![1],
        },
        Bank {
            number: 20,
            data: vec![2],
        },
    ];

    insta::assert_snapshot!(banks_header(&banks), @r"
    #ifndef BANKS_H
    #define BANKS_H

    #define NUM_DATA_BANKS 2

    extern const unsigned char bank_19_data[];
    extern const unsigned char bank_20_data[];

    #endif
    ");
}

#[test]
fn source_wraps_sixteen_bytes_per_line() {
    let bank = Bank {
        number: 17,
        data: (0..18).collect(),
    };

    insta::assert_snapshot!(bank_source(&bank), @r"
    #pragma bank=17

    const unsigned char bank_17_data[] = {
    0x00,0x01,0x02,0x03,0x04,0x05,0x06,0x07,0x08,0x09,0x0A,0x0B,0x0C,0x0D,0x0E,0x0F,
    0x10,0x11
    };
    ");
}

#[test]
fn empty_bank_keeps_initializer_non_empty() {
    let bank = Bank {
        number: 18,
        data: Vec::new(),
    };

    insta::assert_snapshot!(bank_source(&bank), @r"
    #pragma bank=18

    const unsigned char bank_18_data[] = {
    0x00
    };
    ");
}
