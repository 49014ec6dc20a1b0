/*!
  Layout of the 64 bit visualization: 4 rows of 16 cells in the bottom 4 text rows, centered
  horizontally.

  Row 0 (top) shows bits 63..48, row 3 shows bits 15..0, and within a row the leftmost column
  is the most significant bit of its 16 bit slice. Each cell is `CELL_WIDTH` pixels wide with
  one extra pixel after every 4 columns so the nibbles read apart. A `BOX_SIZE` square is
  centered in each cell: filled for a set bit, outlined for a clear bit.
*/

use crate::display::surface::{Rect, Surface};

pub const GRID_ROWS: u32 = 4;
pub const GRID_COLUMNS: u32 = 16;
pub const CELL_WIDTH: u32 = 7;
pub const BOX_SIZE: u32 = 5;
pub const NIBBLE_GAP: u32 = 1;

pub const GRID_WIDTH: u32 = GRID_COLUMNS * CELL_WIDTH + (GRID_COLUMNS / 4 - 1) * NIBBLE_GAP;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct BitCell {
  pub row    : u32,
  pub column : u32,
  /// 0 is the least significant bit.
  pub bit    : u32,
  pub rect   : Rect
}

impl BitCell {
  pub fn is_set(&self, value: u64) -> bool {
    (value >> self.bit) & 1 == 1
  }
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct BitGridLayout {
  first_row  : u32,
  row_height : u32,
  origin_x   : i32
}

impl BitGridLayout {

  /**
    Lays the grid out for a canvas `width` pixels wide with `text_rows` rows of `row_height`
    pixels. Returns `None` if the canvas has fewer than `GRID_ROWS` text rows. The origin is
    negative when the canvas is narrower than the grid.
  */
  pub fn new(width: u32, text_rows: u32, row_height: u32) -> Option<BitGridLayout> {
    if text_rows < GRID_ROWS {
      return None;
    }
    Some(BitGridLayout {
      first_row : text_rows - GRID_ROWS,
      row_height,
      origin_x  : (width as i32 - GRID_WIDTH as i32) / 2
    })
  }

  pub fn for_surface<S: Surface + ?Sized>(surface: &S) -> Option<BitGridLayout> {
    BitGridLayout::new(surface.width(), surface.text_rows(), surface.row_height())
  }

  /// The text row holding grid row 0.
  pub fn first_row(&self) -> u32 {
    self.first_row
  }

  /// The text rows the grid occupies, top to bottom.
  pub fn text_rows(&self) -> std::ops::Range<u32> {
    self.first_row..self.first_row + GRID_ROWS
  }

  /// Left edge in pixels of column 0.
  pub fn origin_x(&self) -> i32 {
    self.origin_x
  }

  pub fn bit_index(row: u32, column: u32) -> u32 {
    63 - row * GRID_COLUMNS - column
  }

  pub fn cell(&self, row: u32, column: u32) -> BitCell {
    let margin_x = ((CELL_WIDTH - BOX_SIZE) / 2) as i32;
    let margin_y = (self.row_height.saturating_sub(BOX_SIZE) / 2) as i32;

    let x = self.origin_x
      + (column * CELL_WIDTH) as i32
      + ((column / 4) * NIBBLE_GAP) as i32
      + margin_x;
    let y = ((self.first_row + row) * self.row_height) as i32 + margin_y;

    BitCell {
      row,
      column,
      bit  : BitGridLayout::bit_index(row, column),
      rect : Rect::new(x, y, BOX_SIZE, BOX_SIZE)
    }
  }

  /// All 64 cells, row by row, left to right.
  pub fn cells(&self) -> impl Iterator<Item = BitCell> + '_ {
    (0..GRID_ROWS).flat_map(move |row| {
      (0..GRID_COLUMNS).map(move |column| self.cell(row, column))
    })
  }

  /// Draws every cell of `value`. Rows are expected to be blank already.
  pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, value: u64) {
    for cell in self.cells() {
      match cell.is_set(value) {
        true  => surface.fill_rect(cell.rect),
        false => surface.outline_rect(cell.rect)
      }
    }
  }
}
