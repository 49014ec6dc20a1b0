//! The contract between the calculator and a monochrome pixel display.

use std::fmt::{Display, Formatter};

use crate::error::SurfaceError;

/// Pixel height of a text row. Rows are addressed by index from the top of the canvas.
pub const ROW_HEIGHT: u32 = 8;
/// Horizontal advance of one character, a 5 pixel glyph plus 1 pixel of spacing.
pub const CHAR_ADVANCE: u32 = 6;

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Align {
  Left,
  Center,
  Right
}

/// A pixel rectangle. The origin may lie off canvas; surfaces clip.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct Rect {
  pub x      : i32,
  pub y      : i32,
  pub width  : u32,
  pub height : u32
}

impl Rect {
  pub fn new(x: i32, y: i32, width: u32, height: u32) -> Rect {
    Rect{ x, y, width, height }
  }

  pub fn right(&self) -> i32 {
    self.x + self.width as i32
  }

  pub fn bottom(&self) -> i32 {
    self.y + self.height as i32
  }

  pub fn contains(&self, x: i32, y: i32) -> bool {
    x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
  }

  /// Whether `(x, y)` lies on the one pixel border of the rectangle.
  pub fn on_border(&self, x: i32, y: i32) -> bool {
    self.contains(x, y)
      && (x == self.x || x == self.right() - 1 || y == self.y || y == self.bottom() - 1)
  }
}

impl Display for Rect {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}x{}@({}, {})", self.width, self.height, self.x, self.y)
  }
}

/// Left edge in pixels of `text` on a canvas `width` pixels wide.
pub fn aligned_x(text: &str, width: u32, align: Align) -> i32 {
  let text_width = (text.chars().count() as u32 * CHAR_ADVANCE) as i32;
  match align {
    Align::Left   => 0,
    Align::Center => ((width as i32 - text_width) / 2).max(0),
    Align::Right  => (width as i32 - text_width).max(0)
  }
}

/**
  A fixed size monochrome canvas addressed by text rows and pixels. Drawing only changes the
  canvas; nothing reaches the device until `push`, which always sends the whole frame.

  The geometry is fixed when the surface is built and is queried by callers, never assumed.
*/
pub trait Surface {
  fn width(&self) -> u32;
  fn height(&self) -> u32;

  fn row_height(&self) -> u32 {
    ROW_HEIGHT
  }

  fn text_rows(&self) -> u32 {
    self.height() / self.row_height()
  }

  /// Replaces the contents of `row` with `text`, aligned within the canvas width.
  fn print_line(&mut self, text: &str, row: u32, align: Align) {
    let x = aligned_x(text, self.width(), align);
    self.print_at(text, row, x);
  }

  /// Replaces the contents of `row` with `text` starting `x` pixels from the left edge.
  fn print_at(&mut self, text: &str, row: u32, x: i32);

  fn clear_row(&mut self, row: u32);

  /// Blanks the whole canvas.
  fn clear(&mut self);

  fn set_pixel(&mut self, x: i32, y: i32, on: bool);

  fn fill_rect(&mut self, rect: Rect) {
    for y in rect.y..rect.bottom() {
      for x in rect.x..rect.right() {
        self.set_pixel(x, y, true);
      }
    }
  }

  fn outline_rect(&mut self, rect: Rect) {
    for y in rect.y..rect.bottom() {
      for x in rect.x..rect.right() {
        if rect.on_border(x, y) {
          self.set_pixel(x, y, true);
        }
      }
    }
  }

  /// Sends the entire canvas to the device in one transfer.
  fn push(&mut self) -> Result<(), SurfaceError>;
}
