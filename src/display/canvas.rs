/*!
  An in-memory monochrome framebuffer that stands in for the panel on a development host.

  Pixels are stored the way page-addressed controllers such as the SSD1306 expect them: the
  canvas is split into pages of 8 pixel rows, and each byte holds one 8 pixel column of a page
  with the top pixel in the least significant bit. The buffer is `width * height / 8` bytes.

  Glyph rasterization belongs to the font layer, which the host build does not have, so text
  is kept per row as a run of characters rather than as pixels. A push writes the whole frame
  to the sink: text rows as text, every other row as quadrant block art with each character
  covering 2 x 2 pixels.
*/

use std::io::Write;

use tracing::trace;

use crate::config::DisplayConfig;
use crate::display::surface::{Surface, CHAR_ADVANCE, ROW_HEIGHT};
use crate::error::{ConfigError, SurfaceError};

/// Block characters indexed by a 2 x 2 pixel mask: top left 1, top right 2, bottom left 4,
/// bottom right 8.
const QUADRANTS: [char; 16] = [
  ' ', '▘', '▝', '▀', '▖', '▌', '▞', '▛',
  '▗', '▚', '▐', '▜', '▄', '▙', '▟', '█'
];

#[derive(Clone, Eq, PartialEq, Debug)]
struct TextRun {
  x    : i32,
  text : String
}

pub struct Canvas<W: Write> {
  width  : u32,
  height : u32,
  pages  : u32,
  buffer : Vec<u8>,      // width * pages bytes, page major
  text   : Vec<Option<TextRun>>,
  sink   : W,
  pushes : usize
}

impl<W: Write> Canvas<W> {

  /// Builds a blank canvas. The height must be a positive multiple of the row height.
  pub fn new(width: u32, height: u32, sink: W) -> Result<Self, ConfigError> {
    Ok(Canvas::with_config(DisplayConfig::new(width, height)?, sink))
  }

  pub fn with_config(config: DisplayConfig, sink: W) -> Self {
    let pages = config.text_rows();
    Canvas {
      width  : config.width,
      height : config.height,
      pages,
      buffer : vec![0; (config.width * pages) as usize],
      text   : vec![None; pages as usize],
      sink,
      pushes : 0
    }
  }

  // region Inspection

  pub fn pixel(&self, x: i32, y: i32) -> bool {
    match self.offset(x, y) {
      Some((index, mask)) => self.buffer[index] & mask != 0,
      None                => false
    }
  }

  /// The text currently on `row`, if any.
  pub fn row_text(&self, row: u32) -> Option<&str> {
    self.text
        .get(row as usize)
        .and_then(|run| run.as_ref())
        .map(|run| run.text.as_str())
  }

  /// Pixel offset of the text on `row`, if any.
  pub fn row_text_x(&self, row: u32) -> Option<i32> {
    self.text
        .get(row as usize)
        .and_then(|run| run.as_ref())
        .map(|run| run.x)
  }

  /// The raw page-organized framebuffer.
  pub fn buffer(&self) -> &[u8] {
    &self.buffer
  }

  /// How many frames have been pushed.
  pub fn pushes(&self) -> usize {
    self.pushes
  }

  pub fn sink(&self) -> &W {
    &self.sink
  }

  pub fn into_sink(self) -> W {
    self.sink
  }

  // endregion

  /// Byte index and bit mask of a pixel, `None` when it lies off canvas.
  fn offset(&self, x: i32, y: i32) -> Option<(usize, u8)> {
    if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
      return None;
    }
    let (x, y) = (x as u32, y as u32);
    let index = (y / ROW_HEIGHT) * self.width + x;
    Some((index as usize, 1u8 << (y % ROW_HEIGHT)))
  }

  fn frame_width(&self) -> usize {
    ((self.width + 1) / 2) as usize
  }

  fn write_pixel_band(&self, out: &mut String, page: u32) {
    let top = (page * ROW_HEIGHT) as i32;
    for pair in 0..(ROW_HEIGHT / 2) as i32 {
      let y = top + pair * 2;
      out.push('|');
      for column in 0..self.frame_width() as i32 {
        let x = column * 2;
        let mask =
            (self.pixel(x, y)         as usize)
          | (self.pixel(x + 1, y)     as usize) << 1
          | (self.pixel(x, y + 1)     as usize) << 2
          | (self.pixel(x + 1, y + 1) as usize) << 3;
        out.push(QUADRANTS[mask]);
      }
      out.push_str("|\n");
    }
  }

  fn write_text_row(&self, out: &mut String, run: &TextRun) {
    let columns = self.frame_width();
    let indent = (run.x.max(0) as usize / 2).min(columns);
    let line: String =
      std::iter::repeat(' ')
        .take(indent)
        .chain(run.text.chars())
        .chain(std::iter::repeat(' '))
        .take(columns)
        .collect();
    out.push('|');
    out.push_str(&line);
    out.push_str("|\n");
  }

  /// The frame as it is written to the sink on `push`.
  pub fn frame(&self) -> String {
    let border = format!("+{}+\n", "-".repeat(self.frame_width()));
    let mut out = border.clone();
    for page in 0..self.pages {
      match &self.text[page as usize] {
        Some(run) => self.write_text_row(&mut out, run),
        None      => self.write_pixel_band(&mut out, page)
      }
    }
    out.push_str(&border);
    out
  }
}

impl<W: Write> Surface for Canvas<W> {
  fn width(&self) -> u32 {
    self.width
  }

  fn height(&self) -> u32 {
    self.height
  }

  fn print_at(&mut self, text: &str, row: u32, x: i32) {
    if row >= self.pages {
      return;
    }
    self.clear_row(row);

    let x = x.max(0);
    let room = (self.width as i32 - x).max(0) as u32 / CHAR_ADVANCE;
    let text: String = text.chars().take(room as usize).collect();
    if !text.is_empty() {
      self.text[row as usize] = Some(TextRun{ x, text });
    }
  }

  fn clear_row(&mut self, row: u32) {
    if row >= self.pages {
      return;
    }
    let start = (row * self.width) as usize;
    let end = start + self.width as usize;
    for byte in &mut self.buffer[start..end] {
      *byte = 0;
    }
    self.text[row as usize] = None;
  }

  fn clear(&mut self) {
    for byte in self.buffer.iter_mut() {
      *byte = 0;
    }
    for run in self.text.iter_mut() {
      *run = None;
    }
  }

  fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
    if let Some((index, mask)) = self.offset(x, y) {
      match on {
        true  => self.buffer[index] |= mask,
        false => self.buffer[index] &= !mask
      }
    }
  }

  fn push(&mut self) -> Result<(), SurfaceError> {
    let frame = self.frame();
    self.sink.write_all(frame.as_bytes())?;
    self.sink.flush()?;
    self.pushes += 1;
    trace!(bytes = self.buffer.len(), pushes = self.pushes, "pushed full frame");
    Ok(())
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::display::surface::{Align, Rect};

  fn canvas() -> Canvas<Vec<u8>> {
    Canvas::new(128, 64, Vec::new()).unwrap()
  }

  #[test]
  fn rejects_bad_geometry(){
    assert!(matches!(Canvas::new(0, 64, Vec::new()), Err(ConfigError::ZeroWidth)));
    assert!(matches!(
      Canvas::new(128, 60, Vec::new()),
      Err(ConfigError::BadHeight{ height: 60, row_height: 8 })
    ));
    assert!(matches!(
      Canvas::new(u32::max_value(), 64, Vec::new()),
      Err(ConfigError::TooLarge{ .. })
    ));
  }

  #[test]
  fn geometry(){
    let c = canvas();
    assert_eq!(c.text_rows(), 8);
    assert_eq!(c.buffer().len(), 128 * 8);
  }

  #[test]
  fn page_layout(){
    let mut c = canvas();
    c.set_pixel(3, 9, true);
    // Page 1, column 3, bit 1.
    assert_eq!(c.buffer()[128 + 3], 0b10);
    assert!(c.pixel(3, 9));
    c.set_pixel(3, 9, false);
    assert!(!c.pixel(3, 9));
    // Off canvas writes are clipped.
    c.set_pixel(-1, 0, true);
    c.set_pixel(128, 64, true);
    assert!(c.buffer().iter().all(|b| *b == 0));
  }

  #[test]
  fn rectangles(){
    let mut c = canvas();
    c.fill_rect(Rect::new(10, 10, 5, 5));
    assert!((10..15).all(|x| (10..15).all(|y| c.pixel(x, y))));

    c.outline_rect(Rect::new(20, 10, 5, 5));
    assert!(c.pixel(20, 10));
    assert!(c.pixel(24, 14));
    assert!(!c.pixel(22, 12));
  }

  #[test]
  fn text_rows(){
    let mut c = canvas();
    c.print_line("42", 0, Align::Left);
    c.print_line("mid", 3, Align::Center);
    assert_eq!(c.row_text(0), Some("42"));
    assert_eq!(c.row_text_x(3), Some(55));
    c.clear_row(0);
    assert_eq!(c.row_text(0), None);
    // Only 21 characters fit in 128 pixels.
    c.print_line(&"x".repeat(30), 1, Align::Left);
    assert_eq!(c.row_text(1).map(str::len), Some(21));
    c.clear();
    assert_eq!(c.row_text(3), None);
  }

  #[test]
  fn clear_row_only_touches_its_page(){
    let mut c = canvas();
    c.set_pixel(0, 7, true);
    c.set_pixel(0, 8, true);
    c.clear_row(1);
    assert!(c.pixel(0, 7));
    assert!(!c.pixel(0, 8));
  }

  #[test]
  fn push_writes_one_frame(){
    let mut c = Canvas::new(8, 16, Vec::new()).unwrap();
    c.print_line("hi", 0, Align::Left);
    c.fill_rect(Rect::new(0, 8, 2, 2));
    c.push().unwrap();
    assert_eq!(c.pushes(), 1);

    let frame = String::from_utf8(c.into_sink()).unwrap();
    let lines: Vec<&str> = frame.lines().collect();
    assert_eq!(lines[0], "+----+");
    // One text line for row 0, then four block lines for row 1.
    assert_eq!(lines[1], "|h   |");
    assert_eq!(lines[2], "|█   |");
    assert_eq!(lines[3], "|    |");
    assert_eq!(lines.len(), 7);
  }
}
