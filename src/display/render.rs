/*!
  Composes one frame from an engine snapshot. The layout, from the top of the canvas:

    ```text
    row 0           the line just typed, only if it was a number
    row 1           `OPERATION: <label>`
    row rows-5      the result in the active base, centered
    rows-4..rows-1  the bit grid
    ```

  On a canvas with fewer than 5 rows the headline is dropped, and with fewer than 4 the grid
  is dropped too. Every call ends with exactly one full-frame push.
*/

use tracing::debug;

use crate::display::bitgrid::{BitGridLayout, GRID_ROWS};
use crate::display::surface::{Align, Surface};
use crate::engine::Snapshot;
use crate::error::SurfaceError;
use crate::format::format_result;

pub const ECHO_ROW: u32 = 0;
pub const OPERATION_ROW: u32 = 1;
pub const OPERATION_PREFIX: &str = "OPERATION: ";

/// The headline row sits directly above the grid.
pub fn headline_row(text_rows: u32) -> Option<u32> {
  text_rows.checked_sub(GRID_ROWS + 1)
}

pub fn render<S: Surface + ?Sized>(snapshot: &Snapshot<'_>, surface: &mut S)
  -> Result<(), SurfaceError>
{
  surface.clear();

  // Row 0 echoes the input only when it was a number.
  match !snapshot.last_token_was_operator && !snapshot.echo.is_empty() {
    true  => surface.print_line(snapshot.echo, ECHO_ROW, Align::Left),
    false => surface.clear_row(ECHO_ROW)
  }

  match snapshot.show_operation && !snapshot.operation_label.is_empty() {
    true  => {
      let line = format!("{}{}", OPERATION_PREFIX, snapshot.operation_label);
      surface.print_line(&line, OPERATION_ROW, Align::Left);
    }
    false => surface.clear_row(OPERATION_ROW)
  }

  let headline = format_result(snapshot.accumulator, snapshot.radix);
  if let Some(row) = headline_row(surface.text_rows()) {
    surface.print_line(&headline, row, Align::Center);
  }

  if let Some(layout) = BitGridLayout::for_surface(&*surface) {
    for row in layout.text_rows() {
      surface.clear_row(row);
    }
    layout.draw(surface, snapshot.accumulator);
  }

  debug!(%headline, "frame composed");
  surface.push()
}
