/*!
  Reads a single console token as a 64 bit unsigned number.

  A token is trimmed and stripped of every digit group separator (`_`) before anything else
  happens, so `0b1010_1111` and `0x_dead_beef` are ordinary numbers. The radix is chosen by
  prefix, checked in this order:

    ```text
    0x | 0X   hexadecimal, at most 16 digits
    0b | 0B   binary, at most 64 digits
    0d | 0D   decimal
    (none)    decimal
    ```

  There is no sign and no arithmetic; one token is one value.
*/

use nom::{
  branch::alt,
  bytes::complete::{tag_no_case, take_while},
  combinator::{opt, value},
  error::ErrorKind,
  IResult
};
use strum_macros::{Display as StrumDisplay, EnumString};

use crate::error::ParseError;

pub const DIGIT_SEPARATOR: char = '_';

/// The numeral systems the calculator reads and displays. The same value selects both the
/// parse path of a prefixed token and the base of the headline result.
#[derive(StrumDisplay, EnumString, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Radix {
  #[strum(serialize = "hex")]
  Hexadecimal,
  #[strum(serialize = "dec")]
  Decimal,
  #[strum(serialize = "bin")]
  Binary,
}

impl Radix {
  pub fn value(&self) -> u32 {
    match self {
      Radix::Hexadecimal => 16,
      Radix::Decimal     => 10,
      Radix::Binary      => 2
    }
  }

  /// The most digits a token in this radix may carry. Decimal is bounded by value instead.
  pub fn max_digits(&self) -> Option<usize> {
    match self {
      Radix::Hexadecimal => Some(16),
      Radix::Binary      => Some(64),
      Radix::Decimal     => None
    }
  }
}

impl Default for Radix {
  fn default() -> Self {
    Radix::Hexadecimal
  }
}

type ParseResult<'a, O> = IResult<&'a str, O, (&'a str, ErrorKind)>;

fn radix_prefix(input: &str) -> ParseResult<'_, Radix> {
  alt((
    value(Radix::Hexadecimal, tag_no_case("0x")),
    value(Radix::Binary,      tag_no_case("0b")),
    value(Radix::Decimal,     tag_no_case("0d")),
  ))(input)
}

/// Splits `input` into its leading run of digits valid in `radix` and whatever follows.
fn leading_digits(input: &str, radix: Radix) -> ParseResult<'_, &str> {
  take_while(move |c: char| c.is_digit(radix.value()))(input)
}

/**
  Parses `token` into a `u64`.

  Errors are reported in the order they are detected: an empty digit string, then the first
  character that is not a digit of the selected radix, then a digit count over the radix
  maximum, and finally (decimal only) a value that does not fit in 64 bits.
*/
pub fn parse_number(token: &str) -> Result<u64, ParseError> {
  let cleaned: String =
    token.trim()
         .chars()
         .filter(|c| *c != DIGIT_SEPARATOR)
         .collect();

  let (body, prefix) =
    opt(radix_prefix)(cleaned.as_str()).unwrap_or((cleaned.as_str(), None));

  parse_digits(body, prefix.unwrap_or(Radix::Decimal))
}

/// Parses an unprefixed, separator free digit string in the given radix.
pub fn parse_digits(body: &str, radix: Radix) -> Result<u64, ParseError> {
  if body.is_empty() {
    return Err(ParseError::EmptyInput);
  }

  let (rest, digits) = leading_digits(body, radix).unwrap_or((body, ""));
  let overlong = radix.max_digits().filter(|max| digits.len() > *max);

  // Binary digits are counted while scanning, so an overlong run is reported
  // even when a bad character follows it.
  if let (Radix::Binary, Some(max)) = (radix, overlong) {
    return Err(ParseError::TooManyDigits{ max });
  }

  if let Some(c) = rest.chars().next() {
    return Err(ParseError::InvalidDigit(c));
  }

  if let Some(max) = overlong {
    return Err(ParseError::TooManyDigits{ max });
  }

  // Digits are validated above, so the only remaining failure is overflow.
  u64::from_str_radix(digits, radix.value()).map_err(|_| ParseError::OutOfRange)
}


#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  #[test]
  fn hex_prefixes(){
    assert_eq!(parse_number("0x1A2B"), Ok(0x1A2B));
    assert_eq!(parse_number("0X1a2b"), Ok(0x1A2B));
    assert_eq!(parse_number("0xFFFFFFFFFFFFFFFF"), Ok(u64::max_value()));
    assert_eq!(parse_number("  0xdead_beef  "), Ok(0xDEAD_BEEF));
  }

  #[test]
  fn hex_digit_limit(){
    assert_eq!(parse_number("0x0000000000000001"), Ok(1));
    assert_eq!(
      parse_number("0x00000000000000001"),
      Err(ParseError::TooManyDigits{ max: 16 })
    );
    // Separators do not count as digits.
    assert_eq!(parse_number("0x0000_0000_0000_0001"), Ok(1));
  }

  #[test]
  fn invalid_digit_is_reported_before_length(){
    assert_eq!(parse_number("0xGG"), Err(ParseError::InvalidDigit('G')));
    assert_eq!(
      parse_number("0x0000000000000000000G"),
      Err(ParseError::InvalidDigit('G'))
    );
  }

  #[test]
  fn binary(){
    assert_eq!(parse_number("0b1010_1111"), Ok(0xAF));
    assert_eq!(parse_number("0B1"), Ok(1));
    assert_eq!(parse_number(&format!("0b{}", "1".repeat(64))), Ok(u64::max_value()));
    assert_eq!(
      parse_number(&format!("0b{}", "1".repeat(65))),
      Err(ParseError::TooManyDigits{ max: 64 })
    );
    assert_eq!(parse_number("0b102"), Err(ParseError::InvalidDigit('2')));
  }

  #[test]
  fn overlong_binary_is_reported_before_later_bad_digit(){
    assert_eq!(
      parse_number(&format!("0b{}2", "1".repeat(65))),
      Err(ParseError::TooManyDigits{ max: 64 })
    );
    // A bad digit inside the first 64 still wins.
    assert_eq!(
      parse_number(&format!("0b12{}", "1".repeat(70))),
      Err(ParseError::InvalidDigit('2'))
    );
  }

  #[test]
  fn decimal(){
    assert_eq!(parse_number("1234"), Ok(1234));
    assert_eq!(parse_number("0d42"), Ok(42));
    assert_eq!(parse_number("0D1_000_000"), Ok(1_000_000));
    assert_eq!(parse_number("007"), Ok(7));
    assert_eq!(parse_number("18446744073709551615"), Ok(u64::max_value()));
    assert_eq!(parse_number("18446744073709551616"), Err(ParseError::OutOfRange));
    assert_eq!(parse_number("+5"), Err(ParseError::InvalidDigit('+')));
    assert_eq!(parse_number("12ab"), Err(ParseError::InvalidDigit('a')));
    assert_eq!(parse_number("1 2"), Err(ParseError::InvalidDigit(' ')));
  }

  #[test]
  fn empty_tokens(){
    assert_eq!(parse_number(""), Err(ParseError::EmptyInput));
    assert_eq!(parse_number("   "), Err(ParseError::EmptyInput));
    assert_eq!(parse_number("___"), Err(ParseError::EmptyInput));
    assert_eq!(parse_number("0x"), Err(ParseError::EmptyInput));
    assert_eq!(parse_number("0b_"), Err(ParseError::EmptyInput));
    assert_eq!(parse_number("0d"), Err(ParseError::EmptyInput));
  }

  #[test]
  fn radix_names(){
    assert_eq!("hex".parse::<Radix>(), Ok(Radix::Hexadecimal));
    assert_eq!(Radix::Binary.to_string(), "bin");
  }

  proptest! {
    #[test]
    fn any_hex_token_parses_exactly(v in any::<u64>()) {
      prop_assert_eq!(parse_number(&format!("0x{:x}", v)), Ok(v));
      prop_assert_eq!(parse_number(&format!("0x{:016X}", v)), Ok(v));
    }

    #[test]
    fn any_decimal_token_parses_exactly(v in any::<u64>()) {
      prop_assert_eq!(parse_number(&v.to_string()), Ok(v));
    }
  }
}
