//! The editing session
//!
//! Owns the document, cursor and viewport, and runs the loop: draw a frame,
//! read one key, dispatch it. The session talks to the outside world only
//! through a [`ByteSource`] for keys, a [`Write`] for frames and a
//! [`Storage`] for files.
//!
//! # Key bindings
//!
//! | Key                     | Action                                  |
//! |-------------------------|-----------------------------------------|
//! | Enter                   | split the line at the cursor            |
//! | Ctrl-Q                  | quit (repeated while there are changes) |
//! | Ctrl-S                  | save, prompting for a name if unbound   |
//! | Arrows                  | move; vertical moves clamp the column   |
//! | PageUp / PageDown       | move one screen                         |
//! | Home / End              | start / end of line                     |
//! | Backspace, Ctrl-H       | delete before the cursor                |
//! | Delete                  | delete under the cursor                 |
//! | Ctrl-L, Escape          | redraw                                  |
//! | printable ASCII, Tab    | insert                                  |

mod storage;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub use storage::{FsStorage, Storage};

use crate::document::{Cursor, Document};
use crate::error::{EditorError, EditorResult};
use crate::input::{read_key, ByteSource, Key, KeyDecoder, BACKSPACE};
use crate::render::{Renderer, StatusMessage};
use crate::view::Viewport;

/// Message shown when the editor starts
pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit";

/// Prompt used when saving an unnamed document; `%s` is the typed input
pub const SAVE_AS_PROMPT: &str = "Save as: %s";

/// What the loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Tunables for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Consecutive Ctrl-Q presses needed to quit with unsaved changes
    pub quit_times: u32,
    /// How long a status message stays on screen
    pub message_timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            quit_times: 3,
            message_timeout: Duration::from_secs(5),
        }
    }
}

/// An interactive editing session over one document
pub struct EditSession<I, O, S = FsStorage> {
    doc: Document,
    cursor: Cursor,
    view: Viewport,
    renderer: Renderer,
    message: StatusMessage,
    quit_times: u32,
    quit_remaining: u32,
    decoder: KeyDecoder,
    input: I,
    output: O,
    storage: S,
}

impl<I, O, S> EditSession<I, O, S>
where
    I: ByteSource,
    O: Write,
    S: Storage,
{
    pub fn new(input: I, output: O, storage: S, view: Viewport, options: SessionOptions) -> Self {
        let quit_times = options.quit_times.max(1);
        Self {
            doc: Document::new(),
            cursor: Cursor::default(),
            view,
            renderer: Renderer::new(options.message_timeout),
            message: StatusMessage::default(),
            quit_times,
            quit_remaining: quit_times,
            decoder: KeyDecoder::new(),
            input,
            output,
            storage,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn viewport(&self) -> &Viewport {
        &self.view
    }

    pub fn message(&self) -> &StatusMessage {
        &self.message
    }

    /// Ctrl-Q presses still needed before an unsaved document is abandoned
    pub fn quit_remaining(&self) -> u32 {
        self.quit_remaining
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn set_message(&mut self, text: impl Into<String>) {
        self.message.set(text);
    }

    /// Load `path` into a fresh document
    ///
    /// A path that does not exist yet gives an empty document bound to it;
    /// the file is created by the first save.
    pub fn open(&mut self, path: impl AsRef<Path>) -> EditorResult<()> {
        let path = path.as_ref();
        let lines = match self.storage.read_lines(path) {
            Ok(lines) => lines,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "new file");
                Vec::new()
            }
            Err(source) => {
                return Err(EditorError::Open {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        tracing::info!(path = %path.display(), rows = lines.len(), "opened");
        self.doc = Document::from_lines(path, lines);
        self.cursor = Cursor::default();
        self.view.row_off = 0;
        self.view.col_off = 0;
        Ok(())
    }

    /// Run until the user quits
    pub fn run(&mut self) -> EditorResult<()> {
        loop {
            self.refresh_screen()?;
            if self.process_keypress()? == Control::Quit {
                return Ok(());
            }
        }
    }

    /// Scroll to the cursor and write one full frame
    pub fn refresh_screen(&mut self) -> EditorResult<()> {
        let rx = self.doc.cursor_rx(self.cursor);
        self.view.scroll(self.cursor, rx);

        let frame = self.renderer.draw_frame(
            &self.doc,
            &self.view,
            self.cursor,
            &self.message,
            Instant::now(),
        );
        tracing::debug!(bytes = frame.len(), row_off = self.view.row_off, "frame");
        self.output.write_all(&frame)?;
        self.output.flush()?;
        Ok(())
    }

    /// Read one key and act on it
    pub fn process_keypress(&mut self) -> EditorResult<Control> {
        let key = read_key(&mut self.decoder, &mut self.input)?;
        self.handle_key(key)
    }

    /// Act on one decoded key
    pub fn handle_key(&mut self, key: Key) -> EditorResult<Control> {
        tracing::debug!(?key, cursor = ?self.cursor, "key");

        match key {
            Key::Char(b'\r') => self.doc.insert_newline(&mut self.cursor),
            k if k.is_ctrl(b'q') => {
                if self.confirm_quit() {
                    return Ok(Control::Quit);
                }
                return Ok(Control::Continue);
            }
            k if k.is_ctrl(b's') => self.save()?,
            Key::Home => self.cursor.cx = 0,
            Key::End => {
                if self.cursor.cy < self.doc.row_count() {
                    self.cursor.cx = self.doc.row_len(self.cursor.cy);
                }
            }
            Key::Char(BACKSPACE) => self.doc.delete_char(&mut self.cursor),
            k if k.is_ctrl(b'h') => self.doc.delete_char(&mut self.cursor),
            Key::Delete => {
                self.move_cursor(Key::Right);
                self.doc.delete_char(&mut self.cursor);
            }
            Key::PageUp | Key::PageDown => self.move_page(key),
            Key::Up | Key::Down | Key::Left | Key::Right => self.move_cursor(key),
            Key::Escape => {},
            k if k.is_ctrl(b'l') => {},
            Key::Char(byte) if byte == b'\t' || is_printable(byte) => {
                self.doc.insert_char(&mut self.cursor, byte)
            }
            Key::Char(byte) => tracing::debug!(byte, "ignored control byte"),
        }

        self.quit_remaining = self.quit_times;
        Ok(Control::Continue)
    }

    /// Count down a quit request; true once the session may end
    fn confirm_quit(&mut self) -> bool {
        if !self.doc.is_dirty() {
            return true;
        }
        self.quit_remaining = self.quit_remaining.saturating_sub(1);
        if self.quit_remaining == 0 {
            tracing::warn!("quitting with unsaved changes");
            return true;
        }

        let n = self.quit_remaining;
        self.set_message(format!(
            "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more time{} to quit.",
            n,
            if n == 1 { "" } else { "s" }
        ));
        false
    }

    /// Write the document out, asking for a file name first if it has none
    pub fn save(&mut self) -> EditorResult<()> {
        let path = match self.doc.path() {
            Some(path) => path.to_path_buf(),
            None => match self.prompt(SAVE_AS_PROMPT)? {
                Some(name) => PathBuf::from(name),
                None => {
                    tracing::warn!("save aborted");
                    self.set_message("Save aborted");
                    return Ok(());
                }
            },
        };

        let text = self.doc.to_text();
        self.storage
            .write(&path, &text)
            .map_err(|source| EditorError::Save {
                path: path.clone(),
                source,
            })?;

        self.doc.set_path(&path);
        self.doc.mark_clean();
        tracing::info!(path = %path.display(), bytes = text.len(), "saved");
        self.set_message(format!("{} bytes written to disk", text.len()));
        Ok(())
    }

    /// Collect a line of input in the message bar
    ///
    /// `template` contains `%s` where the typed text is shown. Enter confirms
    /// non-empty input; Escape cancels and returns `None`.
    pub fn prompt(&mut self, template: &str) -> EditorResult<Option<String>> {
        let mut buf = String::new();

        loop {
            self.set_message(template.replacen("%s", &buf, 1));
            self.refresh_screen()?;

            match read_key(&mut self.decoder, &mut self.input)? {
                Key::Delete | Key::Char(BACKSPACE) => {
                    buf.pop();
                }
                k if k.is_ctrl(b'h') => {
                    buf.pop();
                }
                Key::Escape => {
                    self.set_message("");
                    return Ok(None);
                }
                Key::Char(b'\r') => {
                    if !buf.is_empty() {
                        self.set_message("");
                        return Ok(Some(buf));
                    }
                }
                Key::Char(byte) if is_printable(byte) => buf.push(char::from(byte)),
                _ => {},
            }
        }
    }

    fn move_cursor(&mut self, key: Key) {
        let rows = self.doc.row_count();
        let cursor = &mut self.cursor;

        match key {
            Key::Left => {
                if cursor.cx > 0 {
                    cursor.cx -= 1;
                } else if cursor.cy > 0 {
                    cursor.cy -= 1;
                    cursor.cx = self.doc.row_len(cursor.cy);
                }
            }
            Key::Right => {
                if cursor.cy < rows {
                    if cursor.cx < self.doc.row_len(cursor.cy) {
                        cursor.cx += 1;
                    } else {
                        cursor.cy += 1;
                        cursor.cx = 0;
                    }
                }
            }
            Key::Up => {
                cursor.cy = cursor.cy.saturating_sub(1);
                self.clamp_cx();
            }
            Key::Down => {
                if cursor.cy < rows {
                    cursor.cy += 1;
                }
                self.clamp_cx();
            }
            _ => {},
        }
    }

    fn move_page(&mut self, key: Key) {
        let screen_rows = self.view.screen_rows;
        let (step, top) = if key == Key::PageUp {
            (Key::Up, self.view.row_off)
        } else {
            let bottom = (self.view.row_off + screen_rows).saturating_sub(1);
            (Key::Down, bottom.min(self.doc.row_count()))
        };

        self.cursor.cy = top;
        for _ in 0..screen_rows {
            self.move_cursor(step);
        }
        self.clamp_cx();
    }

    fn clamp_cx(&mut self) {
        let len = self.doc.row_len(self.cursor.cy);
        if self.cursor.cx > len {
            self.cursor.cx = len;
        }
    }
}

fn is_printable(byte: u8) -> bool {
    byte.is_ascii() && !byte.is_ascii_control()
}
