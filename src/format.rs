//! Renders the accumulator as the headline string for a given base. Formatting is a pure
//! function of the value and the base.

use crate::number::{Radix, DIGIT_SEPARATOR};

pub const HEX_DIGITS: usize = 16;
/// Hex digits per group: one 16 bit quad.
pub const HEX_GROUP: usize = 4;
/// Bits shown by the binary view.
pub const BINARY_TAIL_BITS: u32 = 16;
pub const TRUNCATION_MARKER: &str = "...";

pub fn format_result(value: u64, radix: Radix) -> String {
  match radix {
    Radix::Hexadecimal => format_hex(value),
    Radix::Decimal     => value.to_string(),
    Radix::Binary      => format_binary_tail(value)
  }
}

/// `0x` followed by all sixteen uppercase digits in groups of four, e.g. `0x0000_0000_0000_0030`.
pub fn format_hex(value: u64) -> String {
  let raw = format!("{:0width$X}", value, width = HEX_DIGITS);
  let mut out = String::with_capacity(2 + HEX_DIGITS + HEX_DIGITS / HEX_GROUP - 1);
  out.push_str("0x");
  for (i, digit) in raw.chars().enumerate() {
    if i > 0 && i % HEX_GROUP == 0 {
      out.push(DIGIT_SEPARATOR);
    }
    out.push(digit);
  }
  out
}

/**
  The low sixteen bits behind a `0b` prefix. When any higher bit is set the truncation marker
  goes between the prefix and the bits, e.g. `0b...0000000000000001` for `0x10001`.
*/
pub fn format_binary_tail(value: u64) -> String {
  let marker = match value >> BINARY_TAIL_BITS {
    0 => "",
    _ => TRUNCATION_MARKER
  };
  format!(
    "0b{}{:0width$b}",
    marker,
    value & 0xFFFF,
    width = BINARY_TAIL_BITS as usize
  )
}
