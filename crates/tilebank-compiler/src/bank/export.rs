//! C source export of placed banks.

use std::fmt::Write;

use super::Bank;
use crate::emit::hex8;

const BYTES_PER_LINE: usize = 16;

/// `banks.h`: the bank count and one extern per bank data array.
pub fn banks_header(banks: &[Bank]) -> String {
    let mut out = String::new();
    out.push_str("#ifndef BANKS_H\n#define BANKS_H\n\n");
    writeln!(out, "#define NUM_DATA_BANKS {}\n", banks.len()).unwrap();
    for bank in banks {
        writeln!(out, "extern const unsigned char bank_{}_data[];", bank.number).unwrap();
    }
    out.push_str("\n#endif\n");
    out
}

/// `bank_<n>.c`: the bank's bytes as a data array in that bank.
pub fn bank_source(bank: &Bank) -> String {
    let mut out = String::new();
    writeln!(out, "#pragma bank={}\n", bank.number).unwrap();
    writeln!(out, "const unsigned char bank_{}_data[] = {{", bank.number).unwrap();

    if bank.data.is_empty() {
        // C rejects empty initializer lists.
        out.push_str(&hex8(0));
        out.push('\n');
    }
    let lines: Vec<String> = bank
        .data
        .chunks(BYTES_PER_LINE)
        .map(|line| line.iter().map(|&b| hex8(b)).collect::<Vec<_>>().join(","))
        .collect();
    if !lines.is_empty() {
        out.push_str(&lines.join(",\n"));
        out.push('\n');
    }

    out.push_str("};\n");
    out
}
