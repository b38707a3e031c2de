//! Visible window over the document
//!
//! Offsets are in (row, rendered column) space. [`Viewport::scroll`] is
//! recomputed from the cursor before every frame; the renderer only reads
//! the offsets it leaves behind.

use crate::document::Cursor;

/// Scroll offsets and text-area size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub row_off: usize,
    pub col_off: usize,
    /// Rows available for text (window height minus status and message bars)
    pub screen_rows: usize,
    pub screen_cols: usize,
}

impl Viewport {
    /// Number of lines the status and message bars take
    pub const BAR_ROWS: usize = 2;

    pub fn new(screen_rows: usize, screen_cols: usize) -> Self {
        Self {
            row_off: 0,
            col_off: 0,
            screen_rows,
            screen_cols,
        }
    }

    /// Viewport for a terminal window of the given size
    pub fn for_window(window_rows: usize, window_cols: usize) -> Self {
        Self::new(window_rows.saturating_sub(Self::BAR_ROWS), window_cols)
    }

    /// Move the window so that (`cursor.cy`, `rx`) is visible
    pub fn scroll(&mut self, cursor: Cursor, rx: usize) {
        if cursor.cy < self.row_off {
            self.row_off = cursor.cy;
        }
        if cursor.cy >= self.row_off + self.screen_rows {
            self.row_off = (cursor.cy + 1).saturating_sub(self.screen_rows);
        }
        if rx < self.col_off {
            self.col_off = rx;
        }
        if rx >= self.col_off + self.screen_cols {
            self.col_off = (rx + 1).saturating_sub(self.screen_cols);
        }
    }
}
