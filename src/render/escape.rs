//! VT100 output sequences used to draw a frame

pub const HIDE_CURSOR: &[u8] = b"\x1b[?25l";
pub const SHOW_CURSOR: &[u8] = b"\x1b[?25h";
pub const CURSOR_HOME: &[u8] = b"\x1b[H";
/// Erase from the cursor to the end of the line (EL 0)
pub const CLEAR_LINE: &[u8] = b"\x1b[K";
/// Erase the whole display (ED 2)
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J";
/// SGR 7
pub const REVERSE_VIDEO: &[u8] = b"\x1b[7m";
/// SGR 0
pub const RESET_ATTRS: &[u8] = b"\x1b[m";
pub const NEWLINE: &[u8] = b"\r\n";

/// Absolute cursor position (CUP); `row` and `col` are 0-based
pub fn cursor_position(row: usize, col: usize) -> Vec<u8> {
    format!("\x1b[{};{}H", row + 1, col + 1).into_bytes()
}
