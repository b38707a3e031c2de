//! Frame composition
//!
//! Every refresh is a full redraw built into one buffer and written with a
//! single call, in this order:
//!
//! 1. hide cursor, home cursor
//! 2. one line per text row (content, welcome banner or `~` filler)
//! 3. reverse-video status bar
//! 4. message bar, while the last message is younger than the timeout
//! 5. cursor placement, show cursor

pub mod escape;

use std::time::{Duration, Instant};

use crate::document::{Cursor, Document};
use crate::view::Viewport;

/// Glyph drawn on screen rows past the end of the document
pub const FILLER: u8 = b'~';

/// Width of the file name shown in the status bar
const STATUS_NAME_WIDTH: usize = 20;

/// The last status message and when it was set
#[derive(Debug, Clone)]
pub struct StatusMessage {
    text: String,
    set_at: Instant,
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self {
            text: String::new(),
            set_at: Instant::now(),
        }
    }
}

impl StatusMessage {
    pub fn set(&mut self, text: impl Into<String>) {
        self.set_at_time(text, Instant::now());
    }

    pub fn set_at_time(&mut self, text: impl Into<String>, at: Instant) {
        self.text = text.into();
        self.set_at = at;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text, if it should still be on screen at `now`
    pub fn visible(&self, now: Instant, timeout: Duration) -> Option<&str> {
        if self.text.is_empty() || now.saturating_duration_since(self.set_at) >= timeout {
            return None;
        }
        Some(&self.text)
    }
}

/// Builds terminal frames
#[derive(Debug, Clone)]
pub struct Renderer {
    message_timeout: Duration,
    banner: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl Renderer {
    pub fn new(message_timeout: Duration) -> Self {
        Self {
            message_timeout,
            banner: format!("Millia editor -- version {}", crate::VERSION),
        }
    }

    pub fn message_timeout(&self) -> Duration {
        self.message_timeout
    }

    /// Compose one frame
    ///
    /// `view` must already have been scrolled for `cursor`.
    pub fn draw_frame(
        &self,
        doc: &Document,
        view: &Viewport,
        cursor: Cursor,
        message: &StatusMessage,
        now: Instant,
    ) -> Vec<u8> {
        let mut buf = Vec::with_capacity((view.screen_rows + 2) * (view.screen_cols + 8));

        buf.extend_from_slice(escape::HIDE_CURSOR);
        buf.extend_from_slice(escape::CURSOR_HOME);

        self.draw_rows(&mut buf, doc, view);
        self.draw_status_bar(&mut buf, doc, view, cursor);
        self.draw_message_bar(&mut buf, view, message, now);

        let rx = doc.cursor_rx(cursor);
        buf.extend_from_slice(&escape::cursor_position(
            cursor.cy.saturating_sub(view.row_off),
            rx.saturating_sub(view.col_off),
        ));
        buf.extend_from_slice(escape::SHOW_CURSOR);

        tracing::trace!(bytes = buf.len(), "frame composed");
        buf
    }

    fn draw_rows(&self, buf: &mut Vec<u8>, doc: &Document, view: &Viewport) {
        for y in 0..view.screen_rows {
            match doc.row(y + view.row_off) {
                Some(row) => {
                    let render = row.render();
                    let start = view.col_off.min(render.len());
                    let end = (view.col_off + view.screen_cols).min(render.len());
                    buf.extend_from_slice(&render[start..end]);
                }
                None if doc.is_empty() && y == view.screen_rows / 3 => {
                    self.draw_banner(buf, view.screen_cols);
                }
                None => buf.push(FILLER),
            }

            buf.extend_from_slice(escape::CLEAR_LINE);
            buf.extend_from_slice(escape::NEWLINE);
        }
    }

    fn draw_banner(&self, buf: &mut Vec<u8>, cols: usize) {
        let banner = &self.banner.as_bytes()[..self.banner.len().min(cols)];
        let mut padding = (cols - banner.len()) / 2;
        if padding > 0 {
            buf.push(FILLER);
            padding -= 1;
        }
        buf.resize(buf.len() + padding, b' ');
        buf.extend_from_slice(banner);
    }

    fn draw_status_bar(&self, buf: &mut Vec<u8>, doc: &Document, view: &Viewport, cursor: Cursor) {
        let cols = view.screen_cols;
        let (left, right) = status_segments(doc, cursor);

        buf.extend_from_slice(escape::REVERSE_VIDEO);

        let mut len = left.len().min(cols);
        buf.extend_from_slice(&left.as_bytes()[..len]);
        while len < cols {
            if cols - len == right.len() {
                buf.extend_from_slice(right.as_bytes());
                break;
            }
            buf.push(b' ');
            len += 1;
        }

        buf.extend_from_slice(escape::RESET_ATTRS);
        buf.extend_from_slice(escape::NEWLINE);
    }

    fn draw_message_bar(
        &self,
        buf: &mut Vec<u8>,
        view: &Viewport,
        message: &StatusMessage,
        now: Instant,
    ) {
        buf.extend_from_slice(escape::CLEAR_LINE);
        if let Some(text) = message.visible(now, self.message_timeout) {
            let text = text.as_bytes();
            buf.extend_from_slice(&text[..text.len().min(view.screen_cols)]);
        }
    }
}

/// Left and right halves of the status bar
///
/// Left: file name (at most 20 characters, `[No Name]` when unbound), a
/// `(modified)` marker and the row count. Right: `current/total` rows.
pub fn status_segments(doc: &Document, cursor: Cursor) -> (String, String) {
    let name = doc
        .path()
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|| "[No Name]".to_string());

    let marker = if doc.is_dirty() { " (modified)" } else { "" };
    let left = format!(
        "{:.width$}{} - {} lines",
        name,
        marker,
        doc.row_count(),
        width = STATUS_NAME_WIDTH
    );

    let right = format!("{}/{}", cursor.cy + 1, doc.row_count());
    (left, right)
}
