use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// File system abstraction for the persistence and export boundary
///
/// The core never touches the disk; tooling goes through this trait so it
/// can be exercised against [`MemoryFileSystem`] in tests.
pub trait FileSystem {
    /// Check if a file exists
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write a file, creating missing parent directories
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Real file system implementation
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, contents)
    }
}

/// In-memory file system for testing
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    pub files: BTreeMap<PathBuf, String>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_file_system() {
        let mut fs = MemoryFileSystem::new();
        let path = Path::new("dist/index.html");
        assert!(!fs.exists(path));
        assert!(fs.read_to_string(path).is_err());

        fs.write(path, "<html></html>").unwrap();
        assert!(fs.exists(path));
        assert_eq!(fs.read_to_string(path).unwrap(), "<html></html>");
    }
}
