/*!
  Classifies a whole console line. A line is exactly one token: a command, an operation, or a
  number. Commands are single characters and must be the entire (trimmed) line, so `cc` or
  `quit` are not commands; they fall through to number parsing and are reported as invalid.
*/

use std::fmt::{Display, Formatter};

use crate::error::ParseError;
use crate::number::parse_number;
use crate::operation::{resolve_operator, Operation};

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Token {
  Clear,
  Quit,
  Operator(Operation),
  Number(u64),
  Invalid(ParseError)
}

impl Token {
  /// Commands are checked first, then operations, and anything else is read as a number.
  pub fn resolve(line: &str) -> Token {
    let line = line.trim();

    match line {
      "c" | "C" => return Token::Clear,
      "q" | "Q" => return Token::Quit,
      _         => {}
    }

    if let Some(operation) = resolve_operator(line) {
      return Token::Operator(operation);
    }

    match parse_number(line) {
      Ok(value) => Token::Number(value),
      Err(e)    => Token::Invalid(e)
    }
  }
}

impl Display for Token {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      Token::Clear => {
        write!(f, "clear")
      }

      Token::Quit => {
        write!(f, "quit")
      }

      Token::Operator(operation) => {
        write!(f, "operator {}", operation)
      }

      Token::Number(value) => {
        write!(f, "number 0x{:016X}", value)
      }

      Token::Invalid(e) => {
        write!(f, "invalid number ({})", e)
      }

    }
  }
}
