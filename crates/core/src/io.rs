//! File handles for the source font, the subset font and HTML documents.

use std::{
    fs::{create_dir_all, read, read_to_string, write},
    path::{Path, PathBuf},
};

use crate::{Error, Result};

/// A font file handle for I/O operations.
#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
}

impl FontFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read font data, failing with `NotFound` if the file does not exist.
    pub fn read(&self) -> Result<Vec<u8>> {
        if !self.path.exists() {
            return Err(Error::NotFound { what: "Input font", path: self.path.clone() });
        }
        read(&self.path).map_err(|source| Error::ReadFont { path: self.path.clone(), source })
    }

    /// Write font data to the file.
    pub fn write(&self, data: impl AsRef<[u8]>) -> Result<()> {
        write(&self.path, data).map_err(|source| Error::WriteFont { path: self.path.clone(), source })
    }

    /// Create parent directory if it doesn't exist.
    pub fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)
                    .map_err(|source| Error::CreateDir { path: parent.to_path_buf(), source })?;
            }
        }
        Ok(())
    }
}

impl AsRef<Path> for FontFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// An HTML document read as UTF-8 text and rewritten in place.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document for character extraction.
    pub fn read_for_extraction(&self) -> Result<String> {
        read_to_string(&self.path).map_err(|source| Error::Extraction { path: self.path.clone(), source })
    }

    /// Read the document for patching.
    pub fn read_for_patch(&self) -> Result<String> {
        read_to_string(&self.path).map_err(|source| Error::Patch { path: self.path.clone(), source })
    }

    pub fn write(&self, content: &str) -> Result<()> {
        write(&self.path, content).map_err(|source| Error::Patch { path: self.path.clone(), source })
    }
}
