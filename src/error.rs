//! Error types for the editor
//!
//! Only faults that end the session live here. Out-of-range indices are
//! clamped or ignored by the document, and a cancelled prompt is `None`.

use std::path::PathBuf;

/// Error type for editor operations
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Failed to configure terminal: {0}")]
    Terminal(#[source] nix::Error),

    #[error("Failed to get window size: {0}")]
    WindowSize(#[source] nix::Error),

    #[error("Failed to read from terminal: {0}")]
    Read(#[source] nix::Error),

    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input stream closed")]
    InputClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_error_names_path() {
        let err = EditorError::Save {
            path: PathBuf::from("out.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to save out.txt: denied");
    }
}
