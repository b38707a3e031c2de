//! A single line of text
//!
//! A row keeps the bytes as typed and a rendered copy with every tab
//! expanded to spaces up to the next tab stop. The rendered copy is rebuilt
//! by every mutating method before it returns.

/// Width of a tab stop in rendered columns
pub const TAB_STOP: usize = 8;

/// One line of the document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// Raw bytes, tabs included
    chars: Vec<u8>,
    /// Display form with tabs expanded
    render: Vec<u8>,
}

impl Row {
    pub fn new(chars: impl Into<Vec<u8>>) -> Self {
        let mut row = Self {
            chars: chars.into(),
            render: Vec::new(),
        };
        row.update();
        row
    }

    /// Raw content
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// Rendered content
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// Length of the raw content
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Length of the rendered content
    pub fn render_len(&self) -> usize {
        self.render.len()
    }

    /// Convert a raw offset into a rendered column
    ///
    /// Offsets past the end are treated as the end of the row.
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for &byte in self.chars.iter().take(cx) {
            if byte == b'\t' {
                rx += (TAB_STOP - 1) - (rx % TAB_STOP);
            }
            rx += 1;
        }
        rx
    }

    /// Insert a byte at `at`, clamping to the end of the row
    pub fn insert_char(&mut self, at: usize, byte: u8) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, byte);
        self.update();
    }

    /// Delete the byte at `at`; no-op when out of range
    pub fn delete_char(&mut self, at: usize) -> bool {
        if at >= self.chars.len() {
            return false;
        }
        self.chars.remove(at);
        self.update();
        true
    }

    /// Append bytes to the end of the row
    pub fn append(&mut self, bytes: &[u8]) {
        self.chars.extend_from_slice(bytes);
        self.update();
    }

    /// Cut the row at `at`, returning everything from `at` onward
    pub fn split_off(&mut self, at: usize) -> Vec<u8> {
        let at = at.min(self.chars.len());
        let tail = self.chars.split_off(at);
        self.update();
        tail
    }

    fn update(&mut self) {
        self.render.clear();
        for &byte in &self.chars {
            if byte == b'\t' {
                self.render.push(b' ');
                while self.render.len() % TAB_STOP != 0 {
                    self.render.push(b' ');
                }
            } else {
                self.render.push(byte);
            }
        }
    }
}
