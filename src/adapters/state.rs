use crate::domain::ports::StateStore;
use crate::utils::error::{CheckerError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Notified state kept as the presence of a marker file. The file holds the
/// time of the send for humans; only its existence is ever checked.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStateStore {
    fn is_notified(&self) -> Result<bool> {
        Ok(self.path.is_file())
    }

    fn set_notified(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| CheckerError::state(parent, e))?;
            }
        }

        let stamp = chrono::Local::now().to_rfc3339();
        fs::write(&self.path, stamp).map_err(|e| CheckerError::state(&self.path, e))?;
        tracing::debug!("State file written: {}", self.path.display());
        Ok(())
    }

    fn clear_notified(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("State file removed: {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CheckerError::state(&self.path, e)),
        }
    }
}
