/*!
  A 64 bit multi-base calculator that draws its state on a small monochrome display.

  The pipeline for one console line is this:
  ```text
  line -> [`token::Token::resolve`] -> `Token` -> [`engine::Engine::apply`] ->⋯

  ⋯-> `Snapshot` -> [`display::render`] -> `Surface` -> push
  ```
  `Token::resolve` checks for the `c`/`q` commands, then for an operation
  ([`operation::resolve_operator`]), and finally reads a number ([`number::parse_number`]).
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod format;
pub mod number;
pub mod operation;
pub mod session;
pub mod token;

pub use engine::{Engine, Outcome, Snapshot, State};
pub use error::{ConfigError, ParseError, SessionError, SurfaceError};
pub use number::{parse_number, Radix};
pub use operation::{resolve_operator, Operation, OperationKind};
pub use session::Session;
pub use token::Token;
