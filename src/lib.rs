//! Millia: a minimal terminal line editor
//!
//! A full-screen text buffer drawn over a raw terminal session. The editing
//! engine is split into:
//!
//! - `input`: decodes raw bytes and VT100 escape sequences into keys
//! - `document`: rows of text with tab-expanded rendering and cursor math
//! - `view`: scroll offsets that keep the cursor on screen
//! - `render`: composes one full frame of terminal output
//! - `session`: the controller that ties them together
//!
//! Terminal mode switching (`tty`) and configuration (`config`) sit
//! around the engine.

pub mod config;
pub mod document;
pub mod error;
pub mod input;
pub mod render;
pub mod session;
#[cfg(unix)]
pub mod tty;
pub mod view;

pub use document::{Cursor, Document, Row};
pub use error::{EditorError, EditorResult};
pub use input::{read_key, ByteSource, Key, KeyDecoder};
pub use render::{Renderer, StatusMessage};
pub use session::{Control, EditSession, FsStorage, SessionOptions, Storage};
pub use view::Viewport;

/// Version shown in the welcome banner
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
