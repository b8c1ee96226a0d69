//! File-based record source.

use crate::model::error::InputError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A record file on disk. Each read returns the current contents.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file was removed since
    /// construction and `InputError::Io` for other read failures.
    pub fn read(&self) -> Result<String, InputError> {
        debug!(path = %self.path.display(), "reading record file");
        std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => InputError::FileNotFound {
                path: self.path.clone(),
            },
            _ => InputError::Io(e),
        })
    }
}
