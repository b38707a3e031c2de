//! Escape sequence decoder
//!
//! A small deterministic state machine with a fixed lookahead of three
//! bytes after ESC. Recognized sequences:
//!
//! - `ESC [ <digit> ~`: 1/7 Home, 3 Delete, 4/8 End, 5 PageUp, 6 PageDown
//! - `ESC [ <letter>`: A Up, B Down, C Right, D Left, H Home, F End
//! - `ESC O <letter>`: H Home, F End
//!
//! Anything else that starts with ESC decodes to [`Key::Escape`]. An ESC
//! that arrives while a sequence is still open belongs to the next key: the
//! open sequence ends as [`Key::Escape`] and the decoder starts matching
//! again from that ESC. The decoder keeps this state between keys, so the
//! same instance must be used for the whole stream.

use super::{Key, ESC};

/// Decoder state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    /// After ESC
    Escape,
    /// After `ESC [`
    Csi,
    /// After `ESC [ <digit>`
    CsiParam(u8),
    /// After `ESC O`
    Ss3,
}

/// Outcome of feeding one byte to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// More bytes are needed to finish the sequence
    Pending,
    /// A complete key was decoded; the decoder is back in the ground state
    Key(Key),
}

/// Push-style key decoder
#[derive(Debug, Clone)]
pub struct KeyDecoder {
    state: State,
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self {
            state: State::Ground,
        }
    }

    /// True while in the middle of an escape sequence
    pub fn is_pending(&self) -> bool {
        self.state != State::Ground
    }

    /// Feed one byte
    pub fn advance(&mut self, byte: u8) -> Step {
        let (next, step) = match self.state {
            State::Ground => {
                if byte == ESC {
                    (State::Escape, Step::Pending)
                } else {
                    (State::Ground, Step::Key(Key::Char(byte)))
                }
            }
            // Start of the next sequence
            _ if byte == ESC => (State::Escape, Step::Key(Key::Escape)),
            State::Escape => match byte {
                b'[' => (State::Csi, Step::Pending),
                b'O' => (State::Ss3, Step::Pending),
                _ => (State::Ground, Step::Key(Key::Escape)),
            },
            State::Csi => match byte {
                b'0'..=b'9' => (State::CsiParam(byte), Step::Pending),
                _ => (State::Ground, Step::Key(csi_letter(byte))),
            },
            State::CsiParam(digit) => {
                let key = if byte == b'~' {
                    csi_tilde(digit)
                } else {
                    Key::Escape
                };
                (State::Ground, Step::Key(key))
            }
            State::Ss3 => (State::Ground, Step::Key(ss3_letter(byte))),
        };
        self.state = next;
        step
    }

    /// End the current sequence because no further byte arrived in time
    ///
    /// Returns [`Key::Escape`] for any incomplete sequence, including a
    /// bare ESC.
    pub fn flush(&mut self) -> Key {
        self.state = State::Ground;
        Key::Escape
    }

    /// Decode a complete buffer, treating its end as a read timeout
    pub fn decode_all(&mut self, data: &[u8]) -> Vec<Key> {
        let mut keys = Vec::new();
        for &byte in data {
            if let Step::Key(key) = self.advance(byte) {
                keys.push(key);
            }
        }
        if self.is_pending() {
            keys.push(self.flush());
        }
        keys
    }
}

fn csi_tilde(digit: u8) -> Key {
    match digit {
        b'1' | b'7' => Key::Home,
        b'3' => Key::Delete,
        b'4' | b'8' => Key::End,
        b'5' => Key::PageUp,
        b'6' => Key::PageDown,
        _ => Key::Escape,
    }
}

fn csi_letter(byte: u8) -> Key {
    match byte {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        b'H' => Key::Home,
        b'F' => Key::End,
        _ => Key::Escape,
    }
}

fn ss3_letter(byte: u8) -> Key {
    match byte {
        b'H' => Key::Home,
        b'F' => Key::End,
        _ => Key::Escape,
    }
}
