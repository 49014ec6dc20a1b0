/*!
  Everything between the engine and the panel.

  The calculator draws through the `Surface` trait, which addresses the canvas both by pixel
  and by 8 pixel text row. On a 128 x 64 panel there are 8 text rows:

    ```text
    0   echo of the last number typed
    1   OPERATION: <label>
    2
    3   headline result
    4   ┐
    5   │ bit grid, bits 63..0
    6   │
    7   ┘
    ```

  The composer only ever pushes whole frames. `Canvas` is the host implementation of the
  trait; it keeps a page-organized framebuffer and writes each pushed frame as text.
*/

mod bitgrid;
mod canvas;
mod render;
mod surface;

pub use bitgrid::{BitCell, BitGridLayout, BOX_SIZE, CELL_WIDTH, GRID_COLUMNS, GRID_ROWS,
                  GRID_WIDTH, NIBBLE_GAP};
pub use canvas::Canvas;
pub use render::{headline_row, render, OPERATION_PREFIX};
pub use surface::{aligned_x, Align, Rect, Surface, CHAR_ADVANCE, ROW_HEIGHT};
