//! Error types for every fallible layer of the calculator. Only `ParseError` can
//! arise from user input, and the session always recovers from it.

use std::io;

use thiserror::Error;

/// Why a token could not be read as a 64 bit unsigned number.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum ParseError {
  #[error("no digits")]
  EmptyInput,

  #[error("invalid digit `{0}`")]
  InvalidDigit(char),

  #[error("more than {max} digits")]
  TooManyDigits { max: usize },

  #[error("does not fit in 64 bits")]
  OutOfRange,
}

/// Failure to hand a finished frame to the device.
#[derive(Debug, Error)]
pub enum SurfaceError {
  #[error("failed to push frame: {0}")]
  Io(#[from] io::Error),
}

/// Display geometry that no surface can be built from.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ConfigError {
  #[error("display width must be positive")]
  ZeroWidth,

  #[error("display height must be a positive multiple of {row_height}, got {height}")]
  BadHeight { height: u32, row_height: u32 },

  #[error("display of {width}x{height} pixels is too large")]
  TooLarge { width: u32, height: u32 },
}

/// Anything that ends a console session early.
#[derive(Debug, Error)]
pub enum SessionError {
  #[error("console I/O error: {0}")]
  Io(#[from] io::Error),

  #[error(transparent)]
  Surface(#[from] SurfaceError),
}
