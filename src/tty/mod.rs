//! Raw terminal handling for Unix
//!
//! [`RawMode`] switches the controlling terminal into raw mode and puts it
//! back when dropped, which also happens while a panic unwinds. The read
//! timeout it configures (VMIN 0, VTIME 1) is what lets a lone Escape press
//! be told apart from the start of an escape sequence.

use std::io::{self, Write};

use nix::errno::Errno;
use nix::libc;
use nix::sys::termios::{
    self, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, SpecialCharacterIndices,
    Termios,
};
use nix::unistd::read;

use crate::error::{EditorError, EditorResult};
use crate::input::ByteSource;
use crate::render::escape;

/// RAII guard for raw terminal mode
pub struct RawMode {
    original: Termios,
}

impl RawMode {
    /// Put stdin into raw mode, remembering the current settings
    pub fn enable() -> EditorResult<Self> {
        let original = termios::tcgetattr(io::stdin()).map_err(EditorError::Terminal)?;

        let mut raw = original.clone();
        raw.input_flags.remove(
            InputFlags::BRKINT
                | InputFlags::ICRNL
                | InputFlags::INPCK
                | InputFlags::ISTRIP
                | InputFlags::IXON,
        );
        raw.output_flags.remove(OutputFlags::OPOST);
        raw.control_flags.insert(ControlFlags::CS8);
        raw.local_flags.remove(
            LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG,
        );

        // Return from read() after at most 100ms even with no input
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 1;

        termios::tcsetattr(io::stdin(), SetArg::TCSAFLUSH, &raw).map_err(EditorError::Terminal)?;
        tracing::debug!("raw mode enabled");

        Ok(Self { original })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(escape::CLEAR_SCREEN);
        let _ = stdout.write_all(escape::CURSOR_HOME);
        let _ = stdout.flush();

        if let Err(e) = termios::tcsetattr(io::stdin(), SetArg::TCSAFLUSH, &self.original) {
            tracing::error!("failed to restore terminal mode: {}", e);
        } else {
            tracing::debug!("raw mode disabled");
        }
    }
}

/// Get the terminal size as (rows, cols)
pub fn window_size() -> EditorResult<(usize, usize)> {
    let mut ws = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };

    // SAFETY: TIOCGWINSZ fills in a winsize struct we own
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result < 0 {
        return Err(EditorError::WindowSize(Errno::last()));
    }
    if ws.ws_col == 0 {
        return Err(EditorError::WindowSize(Errno::ENOTTY));
    }
    Ok((ws.ws_row as usize, ws.ws_col as usize))
}

/// Key bytes from stdin
///
/// Only meaningful while a [`RawMode`] guard is alive; otherwise reads
/// block until a whole line is typed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TtyInput;

impl ByteSource for TtyInput {
    fn read_byte(&mut self) -> EditorResult<Option<u8>> {
        let mut buf = [0u8; 1];
        match read(libc::STDIN_FILENO, &mut buf) {
            Ok(1) => Ok(Some(buf[0])),
            Ok(_) => Ok(None),
            // EAGAIN and EWOULDBLOCK are the same value on Linux
            Err(Errno::EAGAIN) | Err(Errno::EINTR) => Ok(None),
            Err(e) => Err(EditorError::Read(e)),
        }
    }
}
