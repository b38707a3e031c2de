//! File access used by the session
//!
//! Reading yields the file's lines; writing replaces the whole file with one
//! buffer. There is no atomic rename: a crash mid-write can leave a partial
//! file behind.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Where documents are loaded from and saved to
pub trait Storage {
    /// Read `path` as lines without their terminators
    fn read_lines(&self, path: &Path) -> io::Result<Vec<Vec<u8>>>;

    /// Create or truncate `path` and write `data` to it
    fn write(&mut self, path: &Path, data: &[u8]) -> io::Result<()>;
}

/// The local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<Vec<u8>>> {
        let reader = BufReader::new(File::open(path)?);
        reader
            .split(b'\n')
            .map(|line| {
                let mut line = line?;
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                Ok(line)
            })
            .collect()
    }

    fn write(&mut self, path: &Path, data: &[u8]) -> io::Result<()> {
        fs::write(path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_lines_strips_terminators() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crlf.txt");
        fs::write(&path, b"one\r\ntwo\n\nthree").unwrap();

        let lines = FsStorage.read_lines(&path).unwrap();
        assert_eq!(
            lines,
            vec![b"one".to_vec(), b"two".to_vec(), Vec::new(), b"three".to_vec()]
        );
    }

    #[test]
    fn test_write_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, b"much longer previous content\n").unwrap();

        FsStorage.write(&path, b"short\n").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"short\n");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsStorage.read_lines(&dir.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
