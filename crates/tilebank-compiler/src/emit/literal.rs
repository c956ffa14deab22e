/// Byte literal, `0x%02X`.
pub fn hex8(value: u8) -> String {
    format!("0x{value:02X}")
}

/// Word literal, `0x%04X`.
pub fn hex16(value: u16) -> String {
    format!("0x{value:04X}")
}
