//! Document model
//!
//! An ordered list of rows plus the dirty flag and the file the document is
//! bound to. Row indices are line numbers. Only [`Document::delete_char`]
//! and [`Document::insert_newline`] (through row insert/delete) change the
//! number of rows during editing; every other edit changes a row's length.
//!
//! Editing operations take the cursor by `&mut` so that the cursor math
//! that goes with each edit (join point, split point) lives beside it.

mod row;

use std::path::{Path, PathBuf};

pub use row::{Row, TAB_STOP};

/// Cursor position in raw coordinates
///
/// `cy` indexes a row, or equals the row count when the cursor sits on the
/// empty line past the end. `cx` is a byte offset into that row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub cx: usize,
    pub cy: usize,
}

impl Cursor {
    pub fn new(cx: usize, cy: usize) -> Self {
        Self { cx, cy }
    }
}

/// The text being edited
#[derive(Debug, Clone, Default)]
pub struct Document {
    rows: Vec<Row>,
    dirty: bool,
    path: Option<PathBuf>,
}

impl Document {
    /// Create an empty, unnamed document
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a clean document from lines read from `path`
    pub fn from_lines<I, L>(path: impl Into<PathBuf>, lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let mut doc = Self::new();
        for line in lines {
            doc.insert_row(doc.row_count(), line);
        }
        doc.path = Some(path.into());
        doc.dirty = false;
        doc
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Length of row `at`, 0 past the end
    pub fn row_len(&self, at: usize) -> usize {
        self.rows.get(at).map_or(0, Row::len)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called after the buffer has been written out
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// Rendered column of the cursor; 0 on the line past the end
    pub fn cursor_rx(&self, cursor: Cursor) -> usize {
        self.rows
            .get(cursor.cy)
            .map_or(0, |row| row.cx_to_rx(cursor.cx))
    }

    /// Insert a row before `at`; no-op unless `at` is in `0..=row_count`
    pub fn insert_row(&mut self, at: usize, text: impl Into<Vec<u8>>) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(text));
        self.dirty = true;
    }

    /// Remove row `at`; no-op when out of range
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.dirty = true;
    }

    /// Insert `byte` at the cursor and move past it
    ///
    /// On the line past the end an empty row is appended first.
    pub fn insert_char(&mut self, cursor: &mut Cursor, byte: u8) {
        if cursor.cy > self.rows.len() {
            return;
        }
        if cursor.cy == self.rows.len() {
            self.insert_row(self.rows.len(), Vec::new());
        }
        let row = &mut self.rows[cursor.cy];
        cursor.cx = cursor.cx.min(row.len());
        row.insert_char(cursor.cx, byte);
        cursor.cx += 1;
        self.dirty = true;
    }

    /// Backspace at the cursor
    ///
    /// Deletes the byte before the cursor, or at column 0 joins the row onto
    /// the end of the previous one and leaves the cursor at the join point.
    /// No-op at the start of the document and on the line past the end.
    pub fn delete_char(&mut self, cursor: &mut Cursor) {
        if cursor.cy >= self.rows.len() {
            return;
        }
        cursor.cx = cursor.cx.min(self.rows[cursor.cy].len());
        if cursor.cx == 0 && cursor.cy == 0 {
            return;
        }

        if cursor.cx > 0 {
            self.rows[cursor.cy].delete_char(cursor.cx - 1);
            cursor.cx -= 1;
            self.dirty = true;
        } else {
            let joined = self.rows.remove(cursor.cy);
            cursor.cy -= 1;
            let prev = &mut self.rows[cursor.cy];
            cursor.cx = prev.len();
            prev.append(joined.chars());
            self.dirty = true;
        }
    }

    /// Break the line at the cursor and move to the start of the new row
    ///
    /// At column 0 an empty row is inserted above the current one.
    pub fn insert_newline(&mut self, cursor: &mut Cursor) {
        if cursor.cy > self.rows.len() {
            return;
        }
        if cursor.cx == 0 || cursor.cy == self.rows.len() {
            self.insert_row(cursor.cy, Vec::new());
        } else {
            let tail = self.rows[cursor.cy].split_off(cursor.cx);
            self.insert_row(cursor.cy + 1, tail);
        }
        cursor.cy += 1;
        cursor.cx = 0;
    }

    /// Serialize for saving: every row followed by a newline
    pub fn to_text(&self) -> Vec<u8> {
        let len = self.rows.iter().map(|row| row.len() + 1).sum();
        let mut buf = Vec::with_capacity(len);
        for row in &self.rows {
            buf.extend_from_slice(row.chars());
            buf.push(b'\n');
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn doc(lines: &[&str]) -> Document {
        Document::from_lines("test.txt", lines.iter().copied())
    }

    fn contents(doc: &Document) -> Vec<String> {
        doc.rows()
            .iter()
            .map(|row| String::from_utf8_lossy(row.chars()).into_owned())
            .collect()
    }

    #[test]
    fn test_from_lines_is_clean() {
        let d = doc(&["ab\tc", "de"]);
        assert_eq!(d.row_count(), 2);
        assert!(!d.is_dirty());
        assert_eq!(d.path(), Some(Path::new("test.txt")));
    }

    #[test]
    fn test_cursor_rx_past_tab() {
        let d = doc(&["ab\tc", "de"]);
        assert_eq!(d.cursor_rx(Cursor::new(3, 0)), 8);
        assert_eq!(d.cursor_rx(Cursor::new(0, 2)), 0);
    }

    #[test]
    fn test_insert_row_bounds() {
        let mut d = doc(&["a"]);
        d.insert_row(5, "x");
        assert_eq!(d.row_count(), 1);
        assert!(!d.is_dirty());
        d.insert_row(1, "b");
        d.insert_row(0, "z");
        assert_eq!(contents(&d), vec!["z", "a", "b"]);
        assert!(d.is_dirty());
    }

    #[test]
    fn test_delete_row_bounds() {
        let mut d = doc(&["a", "b"]);
        d.delete_row(2);
        assert!(!d.is_dirty());
        d.delete_row(0);
        assert_eq!(contents(&d), vec!["b"]);
        assert!(d.is_dirty());
    }

    #[test]
    fn test_insert_char_past_end_appends_row() {
        let mut d = Document::new();
        let mut cursor = Cursor::default();
        d.insert_char(&mut cursor, b'h');
        d.insert_char(&mut cursor, b'i');
        assert_eq!(contents(&d), vec!["hi"]);
        assert_eq!(cursor, Cursor::new(2, 0));
        assert!(d.is_dirty());
    }

    #[test]
    fn test_insert_char_clamps_column() {
        let mut d = doc(&["ab"]);
        let mut cursor = Cursor::new(9, 0);
        d.insert_char(&mut cursor, b'c');
        assert_eq!(contents(&d), vec!["abc"]);
        assert_eq!(cursor, Cursor::new(3, 0));
    }

    #[test]
    fn test_delete_char_within_row() {
        let mut d = doc(&["abc"]);
        let mut cursor = Cursor::new(2, 0);
        d.delete_char(&mut cursor);
        assert_eq!(contents(&d), vec!["ac"]);
        assert_eq!(cursor, Cursor::new(1, 0));
    }

    #[test]
    fn test_delete_char_joins_rows() {
        let mut d = doc(&["ab", "cd"]);
        let mut cursor = Cursor::new(0, 1);
        d.delete_char(&mut cursor);
        assert_eq!(contents(&d), vec!["abcd"]);
        assert_eq!(cursor, Cursor::new(2, 0));
        assert_eq!(d.row(0).unwrap().render(), b"abcd");
    }

    #[test]
    fn test_delete_char_at_document_start_is_noop() {
        let mut d = doc(&["ab", "cd"]);
        let mut cursor = Cursor::new(0, 0);
        d.delete_char(&mut cursor);
        assert_eq!(contents(&d), vec!["ab", "cd"]);
        assert_eq!(cursor, Cursor::new(0, 0));
        assert!(!d.is_dirty());
    }

    #[test]
    fn test_delete_char_past_end_is_noop() {
        let mut d = doc(&["ab"]);
        let mut cursor = Cursor::new(0, 1);
        d.delete_char(&mut cursor);
        assert_eq!(contents(&d), vec!["ab"]);
        assert_eq!(cursor, Cursor::new(0, 1));
    }

    #[test]
    fn test_newline_at_column_zero_inserts_above() {
        let mut d = doc(&["ab"]);
        let mut cursor = Cursor::new(0, 0);
        d.insert_newline(&mut cursor);
        assert_eq!(contents(&d), vec!["", "ab"]);
        assert_eq!(cursor, Cursor::new(0, 1));
    }

    #[test]
    fn test_newline_splits_row() {
        let mut d = doc(&["ab\tcd"]);
        let mut cursor = Cursor::new(2, 0);
        d.insert_newline(&mut cursor);
        assert_eq!(contents(&d), vec!["ab", "\tcd"]);
        assert_eq!(d.row(1).unwrap().render(), b"        cd");
        assert_eq!(cursor, Cursor::new(0, 1));
    }

    #[test]
    fn test_newline_at_end_then_backspace_rejoins() {
        let mut d = doc(&["hello", "x"]);
        let mut cursor = Cursor::new(5, 0);
        d.insert_newline(&mut cursor);
        assert_eq!(contents(&d), vec!["hello", "", "x"]);
        d.delete_char(&mut cursor);
        assert_eq!(contents(&d), vec!["hello", "x"]);
        assert_eq!(cursor, Cursor::new(5, 0));
    }

    #[test]
    fn test_newline_past_end_appends_row() {
        let mut d = doc(&["a"]);
        let mut cursor = Cursor::new(0, 1);
        d.insert_newline(&mut cursor);
        assert_eq!(contents(&d), vec!["a", ""]);
        assert_eq!(cursor, Cursor::new(0, 2));
    }

    #[test]
    fn test_to_text_terminates_every_row() {
        assert_eq!(doc(&["ab\tc", "de"]).to_text(), b"ab\tc\nde\n");
        assert_eq!(Document::new().to_text(), b"");
        assert_eq!(doc(&[""]).to_text(), b"\n");
    }

    fn lines() -> impl Strategy<Value = Vec<Vec<u8>>> {
        prop::collection::vec(
            prop::collection::vec(prop_oneof![Just(b'\t'), 0x20u8..0x7f], 0..12),
            1..6,
        )
    }

    proptest! {
        #[test]
        fn prop_insert_then_backspace_restores(lines in lines(), cy in 0usize..8, cx in 0usize..16, byte in 0x20u8..0x7f) {
            let mut d = Document::from_lines("p.txt", lines.clone());
            let cy = cy.min(d.row_count() - 1);
            let cx = cx.min(d.row_len(cy));
            let mut cursor = Cursor::new(cx, cy);
            d.insert_char(&mut cursor, byte);
            d.delete_char(&mut cursor);
            prop_assert_eq!(cursor, Cursor::new(cx, cy));
            let original = Document::from_lines("p.txt", lines);
            prop_assert_eq!(d.rows(), original.rows());
        }

        #[test]
        fn prop_split_then_join_restores(lines in lines(), cy in 0usize..8, cx in 0usize..16) {
            let mut d = Document::from_lines("p.txt", lines.clone());
            let cy = cy.min(d.row_count() - 1);
            let cx = cx.min(d.row_len(cy));
            let mut cursor = Cursor::new(cx, cy);
            d.insert_newline(&mut cursor);
            d.delete_char(&mut cursor);
            prop_assert_eq!(cursor, Cursor::new(cx, cy));
            let original = Document::from_lines("p.txt", lines);
            prop_assert_eq!(d.rows(), original.rows());
        }
    }
}
