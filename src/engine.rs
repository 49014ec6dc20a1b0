//! The calculator state machine. One `Engine` owns all state of a session; it is created with
//! the session, changed in place by each accepted line, and dropped at the end.

use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};
use tracing::debug;

use crate::error::ParseError;
use crate::format::format_result;
use crate::number::Radix;
use crate::operation::{Operation, OperationKind};
use crate::token::Token;

/// What the engine expects next. The pending operator lives in `ExpectArg`, so an operator is
/// pending exactly when the engine is waiting for its argument.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum State {
  /// A number is an immediate load; an operator is queued.
  ExpectAny,
  /// A binary operator is queued and the next number is its right hand operand.
  ExpectArg(Operation)
}

impl Display for State {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      State::ExpectAny     => write!(f, "ExpectAny"),
      State::ExpectArg(op) => write!(f, "ExpectArg({})", op)
    }
  }
}

/// The result of feeding one line to the engine.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Outcome {
  /// State changed; the display needs redrawing.
  Updated,
  /// The session should end.
  Quit,
  /// The line was not a valid number. Nothing changed.
  Rejected(ParseError)
}

/// Everything the renderer needs from the engine.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Snapshot<'a> {
  pub accumulator             : u64,
  pub radix                   : Radix,
  pub echo                    : &'a str,
  pub last_token_was_operator : bool,
  pub show_operation          : bool,
  pub operation_label         : &'a str
}

pub struct Engine {
  accumulator             : u64,
  state                   : State,
  radix                   : Radix,

  // Operation row //
  labelled                : Option<Operation>, // Last operator whose label is on display
  show_operation          : bool,

  // Echo row //
  echo                    : String,            // The last accepted line, trimmed
  last_token_was_operator : bool,
}

impl Engine {

  pub fn new() -> Engine {
    Engine {
      accumulator             : 0,
      state                   : State::ExpectAny,
      radix                   : Radix::default(),
      labelled                : None,
      show_operation          : false,
      echo                    : String::new(),
      last_token_was_operator : false,
    }
  }

  // region Accessors

  pub fn accumulator(&self) -> u64 {
    self.accumulator
  }

  pub fn state(&self) -> State {
    self.state
  }

  pub fn pending(&self) -> Option<Operation> {
    match self.state {
      State::ExpectArg(op) => Some(op),
      State::ExpectAny     => None
    }
  }

  pub fn radix(&self) -> Radix {
    self.radix
  }

  /// The operation label, empty when no operation is labelled.
  pub fn operation_label(&self) -> &'static str {
    self.labelled.map(|op| op.label()).unwrap_or("")
  }

  pub fn show_operation(&self) -> bool {
    self.show_operation
  }

  pub fn echo(&self) -> &str {
    &self.echo
  }

  pub fn last_token_was_operator(&self) -> bool {
    self.last_token_was_operator
  }

  pub fn snapshot(&self) -> Snapshot<'_> {
    Snapshot {
      accumulator             : self.accumulator,
      radix                   : self.radix,
      echo                    : &self.echo,
      last_token_was_operator : self.last_token_was_operator,
      show_operation          : self.show_operation,
      operation_label         : self.operation_label()
    }
  }

  // endregion

  // region Transitions

  /// Resolves and applies one console line.
  pub fn accept(&mut self, line: &str) -> Outcome {
    let line = line.trim();
    let token = Token::resolve(line);
    debug!(%line, %token, state = %self.state, "resolved");
    self.apply(token, line)
  }

  /// Applies an already resolved token. `line` is what the user typed, kept for the echo row.
  pub fn apply(&mut self, token: Token, line: &str) -> Outcome {
    match token {

      Token::Quit => {
        return Outcome::Quit;
      }

      Token::Invalid(e) => {
        return Outcome::Rejected(e);
      }

      Token::Clear => {
        self.accumulator    = 0;
        self.state          = State::ExpectAny;
        self.labelled       = None;
        self.show_operation = false;
        self.last_token_was_operator = false;
      }

      Token::Operator(operation) => {
        self.operate(operation);
        self.last_token_was_operator = true;
      }

      Token::Number(value) => {
        self.load(value);
        self.last_token_was_operator = false;
      }

    } // end match on token

    self.echo.clear();
    self.echo.push_str(line);
    Outcome::Updated
  }

  fn operate(&mut self, operation: Operation) {
    match operation.kind() {

      OperationKind::DisplayMode => {
        if let Some(radix) = operation.display_radix() {
          self.radix = radix;
        }
        // An arithmetic label stays, otherwise the switch labels itself. A queued operator
        // stays queued.
        let arithmetic_label =
          self.labelled.map_or(false, |op| op.kind() != OperationKind::DisplayMode);
        if !arithmetic_label {
          self.labelled = Some(operation);
        }
        self.show_operation = true;
      }

      OperationKind::Unary => {
        self.accumulator    = !self.accumulator;
        self.state          = State::ExpectAny;
        self.labelled       = Some(operation);
        self.show_operation = true;
      }

      OperationKind::Binary => {
        self.state          = State::ExpectArg(operation);
        self.labelled       = Some(operation);
        self.show_operation = true;
      }

    }
  }

  fn load(&mut self, value: u64) {
    match self.state {

      State::ExpectAny => {
        // Immediate load; the only transition besides clear that blanks the operation row.
        self.accumulator    = value;
        self.labelled       = None;
        self.show_operation = false;
        debug!(accumulator = self.accumulator, "immediate load");
      }

      State::ExpectArg(operation) => {
        // The operation row stays as it is.
        self.accumulator = operation.apply(self.accumulator, value);
        self.state       = State::ExpectAny;
        debug!(accumulator = self.accumulator, %operation, operand = value, "applied");
      }

    }
  }

  // endregion
}

impl Default for Engine {
  fn default() -> Self {
    Engine::new()
  }
}

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Display for Engine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Register", ubl->"Contents"]);

    table.add_row(row![r->"Accumulator", format_result(self.accumulator, Radix::Hexadecimal)]);
    table.add_row(row![r->"State", self.state]);
    table.add_row(row![r->"Display", self.radix]);
    table.add_row(row![r->"Operation", format!(
      "{}{}",
      self.operation_label(),
      match self.show_operation { true => "", false => " (hidden)" }
    )]);
    table.add_row(row![r->"Echo", format!(
      "{}{}",
      self.echo,
      match self.last_token_was_operator { true => " (hidden)", false => "" }
    )]);

    write!(f, "{}", table)
  }
}
