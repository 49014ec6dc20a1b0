//! Command line and environment configuration.

use clap::Parser;

use crate::display::ROW_HEIGHT;
use crate::error::ConfigError;

pub const DEFAULT_WIDTH: u32 = 128;
pub const DEFAULT_HEIGHT: u32 = 64;

#[derive(Parser, Debug, Clone, Eq, PartialEq)]
#[command(name = "bitcalc")]
#[command(version)]
#[command(about = "64 bit multi-base calculator on a small monochrome display", long_about = None)]
pub struct Args {
  /// Display width in pixels
  #[arg(long, default_value_t = DEFAULT_WIDTH, env = "BITCALC_WIDTH")]
  pub width: u32,

  /// Display height in pixels, a multiple of 8
  #[arg(long, default_value_t = DEFAULT_HEIGHT, env = "BITCALC_HEIGHT")]
  pub height: u32,

  /// Do not print the prompt before each line
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

/// Geometry of the display, fixed for the life of a session.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct DisplayConfig {
  pub width  : u32,
  pub height : u32
}

impl DisplayConfig {
  pub fn new(width: u32, height: u32) -> Result<DisplayConfig, ConfigError> {
    if width == 0 {
      return Err(ConfigError::ZeroWidth);
    }
    if height == 0 || height % ROW_HEIGHT != 0 {
      return Err(ConfigError::BadHeight{ height, row_height: ROW_HEIGHT });
    }
    // Pixel coordinates are `i32` and the framebuffer holds `width * pages` bytes.
    let limit = i32::max_value() as u32;
    if height > limit || width > limit / (height / ROW_HEIGHT) {
      return Err(ConfigError::TooLarge{ width, height });
    }
    Ok(DisplayConfig{ width, height })
  }

  pub fn text_rows(&self) -> u32 {
    self.height / ROW_HEIGHT
  }
}

impl Default for DisplayConfig {
  fn default() -> Self {
    DisplayConfig{ width: DEFAULT_WIDTH, height: DEFAULT_HEIGHT }
  }
}

impl Args {
  pub fn display(&self) -> Result<DisplayConfig, ConfigError> {
    DisplayConfig::new(self.width, self.height)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults(){
    let args = Args::try_parse_from(&["bitcalc"]).unwrap();
    assert_eq!(args.display(), Ok(DisplayConfig::default()));
    assert!(!args.quiet);
    assert_eq!(DisplayConfig::default().text_rows(), 8);
  }

  #[test]
  fn small_panel(){
    let args = Args::try_parse_from(&["bitcalc", "--height", "32", "-q"]).unwrap();
    assert_eq!(args.display().map(|d| d.text_rows()), Ok(4));
    assert!(args.quiet);
  }

  #[test]
  fn bad_geometry(){
    assert_eq!(DisplayConfig::new(0, 64), Err(ConfigError::ZeroWidth));
    assert_eq!(
      DisplayConfig::new(128, 30),
      Err(ConfigError::BadHeight{ height: 30, row_height: 8 })
    );
    assert!(Args::try_parse_from(&["bitcalc", "--width", "wide"]).is_err());
  }

  #[test]
  fn oversized_geometry(){
    assert_eq!(
      DisplayConfig::new(u32::max_value(), 64),
      Err(ConfigError::TooLarge{ width: u32::max_value(), height: 64 })
    );
    // 8 pages of this width would overflow the framebuffer size.
    let wide = i32::max_value() as u32 / 4;
    assert_eq!(
      DisplayConfig::new(wide, 64),
      Err(ConfigError::TooLarge{ width: wide, height: 64 })
    );
    assert!(DisplayConfig::new(i32::max_value() as u32 / 8, 64).is_ok());

    let args = Args::try_parse_from(&["bitcalc", "--width", "4294967295"]).unwrap();
    assert!(matches!(args.display(), Err(ConfigError::TooLarge{ .. })));
  }
}
