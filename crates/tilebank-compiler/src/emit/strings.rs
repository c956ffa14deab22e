use std::fmt::Write;

use tilebank_core::AssetPool;

/// Width of one string record, terminator included.
pub const STRING_RECORD_WIDTH: usize = 38;

/// Text bytes a string record can hold.
pub const STRING_TEXT_BYTES: usize = STRING_RECORD_WIDTH - 1;

/// Strings stored in one reserved bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringBank<'a> {
    pub number: u8,
    pub strings: &'a [String],
}

/// Split the pool into banks of at most `per_bank` records, numbered from
/// `first_bank`. Bank numbers past 255 are not representable and are
/// returned as `Err` with the offending number.
pub fn chunk_strings<'a>(
    strings: &'a [String],
    first_bank: u8,
    per_bank: usize,
) -> Result<Vec<StringBank<'a>>, usize> {
    strings
        .chunks(per_bank.max(1))
        .enumerate()
        .map(|(index, strings)| {
            let bank = usize::from(first_bank) + index;
            let number = u8::try_from(bank).map_err(|_| bank)?;
            Ok(StringBank { number, strings })
        })
        .collect()
}

/// Pooled strings whose upper-cased form is longer than a record holds.
pub fn overlong_strings(strings: &AssetPool<String>) -> impl Iterator<Item = &str> {
    strings
        .keys()
        .filter(|s| s.to_uppercase().len() > STRING_TEXT_BYTES)
        .map(String::as_str)
}

/// `strings_<n>.c`: one fixed-width record per string.
pub fn string_bank_source(bank: &StringBank<'_>) -> String {
    let records: Vec<String> = bank.strings.iter().map(|s| prepare(s)).collect();

    let mut out = String::new();
    writeln!(out, "#pragma bank={}\n", bank.number).unwrap();
    writeln!(
        out,
        "const unsigned char strings_{}[][{STRING_RECORD_WIDTH}] = {{",
        bank.number
    )
    .unwrap();
    out.push_str(&records.join(",\n"));
    out.push_str("\n};\n");
    out
}

/// Upper-cased, truncated to a record, quoted and escaped.
fn prepare(text: &str) -> String {
    let upper = text.to_uppercase();
    let escaped = record_text(&upper)
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    format!("\"{escaped}\"")
}

/// Longest prefix of `text` that fits a record without splitting a
/// UTF-8 sequence.
pub(crate) fn record_text(text: &str) -> &str {
    if text.len() <= STRING_TEXT_BYTES {
        return text;
    }
    let end = (0..=STRING_TEXT_BYTES)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0);
    &text[..end]
}
