use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

/// Read-only accessor for the tweets dataset
///
/// Holds nothing but the file location. Every [`Dataset::open`] call yields a
/// fresh connection that is closed when it goes out of scope, so no state is
/// shared between requests.
#[derive(Debug, Clone)]
pub struct Dataset {
    path: PathBuf,
}

impl Dataset {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a new read-only connection to the dataset file
    pub fn open(&self) -> Result<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        Connection::open_with_flags(&self.path, flags)
            .with_context(|| format!("Failed to open dataset at {}", self.path.display()))
    }
}
