use tilebank_core::AssetPool;

use super::{
    STRING_RECORD_WIDTH, StringBank, chunk_strings, overlong_strings, record_text,
    string_bank_source,
};

fn owned(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn chunks_fill_banks_in_order() {
    let strings = owned(&["a", "b", "c", "d", "e"]);

    let banks = chunk_strings(&strings, 17, 2).unwrap();

    let layout: Vec<(u8, usize)> = banks.iter().map(|b| (b.number, b.strings.len())).collect();
    assert_eq!(layout, vec![(17, 2), (18, 2), (19, 1)]);
    assert_eq!(banks[2].strings, ["e".to_string()]);
}

#[test]
fn chunks_past_last_bank_fail() {
    let strings = owned(&["a", "b", "c"]);

    assert_eq!(chunk_strings(&strings, 255, 1), Err(256));
}

#[test]
fn source_upper_cases_and_escapes() {
    let strings = owned(&["Hello \"you\"", "two\nlines"]);
    let bank = StringBank {
        number: 17,
        strings: &strings,
    };

    insta::assert_snapshot!(string_bank_source(&bank), @r#"
    #pragma bank=17

    const unsigned char strings_17[][38] = {
    "HELLO \"YOU\"",
    "TWO\nLINES"
    };
    "#);
}

#[test]
fn long_text_is_truncated_to_record() {
    let long = "x".repeat(40);
    let strings = vec![long.clone()];
    let bank = StringBank {
        number: 20,
        strings: &strings,
    };

    let source = string_bank_source(&bank);

    assert!(source.contains(&format!("\"{}\"", "X".repeat(37))));
    assert!(!source.contains(&"X".repeat(38)));

    let pool: AssetPool<String> = [long, "short".to_string()].into_iter().collect();
    let overlong: Vec<&str> = overlong_strings(&pool).collect();
    assert_eq!(overlong.len(), 1);
}

#[test]
fn multibyte_text_is_truncated_by_bytes() {
    let accented = "é".repeat(20);
    let sharp = "ß".repeat(30);
    let strings = vec![accented.clone(), sharp.clone()];
    let bank = StringBank {
        number: 17,
        strings: &strings,
    };

    let source = string_bank_source(&bank);

    let records: Vec<&str> = source
        .lines()
        .filter_map(|line| line.trim_end_matches(',').strip_prefix('"')?.strip_suffix('"'))
        .collect();
    assert_eq!(records, ["É".repeat(18), "S".repeat(37)]);
    for record in records {
        assert!(record.len() < STRING_RECORD_WIDTH);
    }

    let pool: AssetPool<String> = [accented, sharp, "ok".to_string()].into_iter().collect();
    let overlong: Vec<&str> = overlong_strings(&pool).collect();
    assert_eq!(overlong.len(), 2);
}

#[test]
fn truncation_keeps_char_boundaries() {
    let text = format!("{}€", "a".repeat(35));

    assert_eq!(record_text(&text), "a".repeat(35));
    assert_eq!(record_text("short"), "short");
}
