//! Keyboard input decoding
//!
//! Turns the raw byte stream delivered by a terminal in raw mode into
//! logical keys. Plain bytes (printable characters and control codes) pass
//! through as [`Key::Char`]; VT100/xterm escape sequences for the cursor
//! and navigation keys are resolved by [`KeyDecoder`].

mod decoder;

use std::collections::VecDeque;

pub use decoder::{KeyDecoder, Step};

use crate::error::{EditorError, EditorResult};

/// The escape byte that starts every special-key sequence
pub const ESC: u8 = 0x1b;

/// Byte sent by the Backspace key in raw mode
pub const BACKSPACE: u8 = 0x7f;

/// Byte produced by holding Ctrl while pressing `key`
pub const fn ctrl(key: u8) -> u8 {
    key & 0x1f
}

/// A decoded key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A literal byte: printable character or control code
    Char(u8),

    // Cursor keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Delete,

    /// A lone Escape press, or an escape sequence we do not recognize
    Escape,
}

impl Key {
    /// True for the byte produced by Ctrl+`key`
    pub fn is_ctrl(self, key: u8) -> bool {
        self == Key::Char(ctrl(key))
    }
}

/// A source of raw input bytes
///
/// `Ok(None)` means the read timed out without delivering a byte. Raw mode
/// configures the terminal with a short timeout, so a lone Escape press
/// shows up as ESC followed by a timeout.
pub trait ByteSource {
    fn read_byte(&mut self) -> EditorResult<Option<u8>>;
}

/// Block until one complete key has been decoded
///
/// The first byte is retried through timeouts. Bytes after an ESC are read
/// at most once each; a timeout there ends the sequence as [`Key::Escape`].
/// `decoder` carries an escape sequence that was opened by the previous
/// key's lookahead, so pass the same decoder on every call.
pub fn read_key<S: ByteSource + ?Sized>(
    decoder: &mut KeyDecoder,
    source: &mut S,
) -> EditorResult<Key> {
    if !decoder.is_pending() {
        let first = loop {
            if let Some(byte) = source.read_byte()? {
                break byte;
            }
        };
        if let Step::Key(key) = decoder.advance(first) {
            return Ok(key);
        }
    }

    loop {
        match source.read_byte()? {
            Some(byte) => {
                if let Step::Key(key) = decoder.advance(byte) {
                    return Ok(key);
                }
            }
            None => return Ok(decoder.flush()),
        }
    }
}

/// A scripted event for [`ScriptedInput`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scripted {
    Byte(u8),
    Timeout,
}

/// Replays a fixed script of bytes and timeouts
///
/// Fails with [`EditorError::InputClosed`] once the script runs out, so a
/// session driven by it cannot spin forever.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    events: VecDeque<Scripted>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a script from raw bytes with no timeouts in between
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut input = Self::new();
        input.push_bytes(bytes);
        input
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.events.extend(bytes.iter().copied().map(Scripted::Byte));
        self
    }

    pub fn push_timeout(&mut self) -> &mut Self {
        self.events.push_back(Scripted::Timeout);
        self
    }

    /// Number of events not yet consumed
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl ByteSource for ScriptedInput {
    fn read_byte(&mut self) -> EditorResult<Option<u8>> {
        match self.events.pop_front() {
            Some(Scripted::Byte(byte)) => Ok(Some(byte)),
            Some(Scripted::Timeout) => Ok(None),
            None => Err(EditorError::InputClosed),
        }
    }
}
