/*!
  Operations the calculator understands, and the console spellings that select them.

  Symbol and word forms are aliases of the same operation. Matching is exact after trimming
  and ignores ASCII case; there is no prefix matching, so `ad` or `hexa` are not operations
  and fall through to number parsing.

    ```text
    +  add        -  subtract     &  and     |  or     ^  xor
    ~  invert     <<              >>
    hex           dec             bin
    ```
*/

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{EnumIter, EnumString};

use crate::number::Radix;

/**
  Operations of the calculator.

  As with any `repr(u8)` enum, variants are numbered consecutively from zero. Binary operations
  come first, then the unary operation, then the display switches, so that an operation's kind
  is determined by a single comparison of its code. Consequently, the order the variants are
  listed below is significant.
  Order-dependencies:
    ```text
    Operation::kind()
    ```
*/
#[derive(
  EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
  Clone,      Copy,     Eq, PartialEq,    Debug,        Hash
)]
#[repr(u8)]
pub enum Operation {
  // Binary operations //
  #[strum(serialize = "+", serialize = "add")]
  Add,
  #[strum(serialize = "-", serialize = "subtract")]
  Subtract,
  #[strum(serialize = "&", serialize = "and")]
  And,
  #[strum(serialize = "|", serialize = "or")]
  Or,
  #[strum(serialize = "^", serialize = "xor")]
  Xor,
  #[strum(serialize = "<<")]
  ShiftLeft,
  #[strum(serialize = ">>")]
  ShiftRight,
  // Code 7

  // Unary operation //
  #[strum(serialize = "~", serialize = "invert")]
  Invert,
  // Code 8

  // Display switches //
  #[strum(serialize = "hex")]
  ShowHex,
  #[strum(serialize = "dec")]
  ShowDec,
  #[strum(serialize = "bin")]
  ShowBin,
}

pub const MAX_BINARY_CODE: u8 = 7u8;
pub const MAX_UNARY_CODE: u8 = 8u8;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum OperationKind {
  /// Waits for a right hand operand.
  Binary,
  /// Applies to the accumulator immediately.
  Unary,
  /// Changes the base of the headline result only.
  DisplayMode,
}

impl Operation {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  pub fn kind(&self) -> OperationKind {
    match self.code() {
      value if value < MAX_BINARY_CODE => OperationKind::Binary,
      value if value < MAX_UNARY_CODE  => OperationKind::Unary,
      _value                           => OperationKind::DisplayMode
    }
  }

  pub fn is_binary(&self) -> bool {
    self.kind() == OperationKind::Binary
  }

  /// The text shown on the operation row of the display.
  pub fn label(&self) -> &'static str {
    match self {
      Operation::Add        => "add",
      Operation::Subtract   => "subtract",
      Operation::And        => "and",
      Operation::Or         => "or",
      Operation::Xor        => "xor",
      Operation::ShiftLeft  => "<<",
      Operation::ShiftRight => ">>",
      Operation::Invert     => "invert",
      Operation::ShowHex    => "display hex",
      Operation::ShowDec    => "display dec",
      Operation::ShowBin    => "display bin",
    }
  }

  /// The base a display switch selects, `None` for arithmetic operations.
  pub fn display_radix(&self) -> Option<Radix> {
    match self {
      Operation::ShowHex => Some(Radix::Hexadecimal),
      Operation::ShowDec => Some(Radix::Decimal),
      Operation::ShowBin => Some(Radix::Binary),
      _                  => None
    }
  }

  /**
    Applies a binary operation with the accumulator on the left. Addition and subtraction wrap
    modulo 2^64. Shift amounts are reduced to their low six bits, so shifting by 64 is the same
    as shifting by 0. Non-binary operations return the accumulator unchanged.
  */
  pub fn apply(&self, accumulator: u64, operand: u64) -> u64 {
    let shift = (operand & 63) as u32;
    match self {
      Operation::Add        => accumulator.wrapping_add(operand),
      Operation::Subtract   => accumulator.wrapping_sub(operand),
      Operation::And        => accumulator & operand,
      Operation::Or         => accumulator | operand,
      Operation::Xor        => accumulator ^ operand,
      Operation::ShiftLeft  => accumulator << shift,
      Operation::ShiftRight => accumulator >> shift,
      _                     => accumulator
    }
  }
}

impl Display for Operation {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.label())
  }
}

/// Classifies `token` as an operation, or `None` if it should be read as a number.
pub fn resolve_operator(token: &str) -> Option<Operation> {
  Operation::from_str(&token.trim().to_ascii_lowercase()).ok()
}
