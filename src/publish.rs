//! Publishing rendered output to stdout or to a file.
//!
//! File destinations are replaced atomically: the content goes to a sibling
//! `<path>.tmp` first and is then renamed over `<path>`. The temporary file
//! lives in the same directory, hence on the same filesystem, so the rename
//! is atomic and a reader of `<path>` sees either the old or the new content.
//!
//! A `.tmp` left behind by a process killed mid-write is not cleaned up; the
//! next publish to the same destination overwrites it.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::trace;

/// Error type for publish failures.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("failed to open temporary file {}: {source}", path.display())]
    CreateTemp {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write temporary file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to rename {} to {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] io::Error),
}

/// Where the status line goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// `""` and `"-"` mean standard output, anything else is a file path.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() || s == "-" {
            Destination::Stdout
        } else {
            Destination::File(PathBuf::from(s))
        }
    }
}

/// Returns the temporary sibling used while replacing `path`.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Removes the temporary file on drop unless disarmed.
struct TempGuard<'a> {
    path: &'a Path,
    armed: bool,
}

impl<'a> TempGuard<'a> {
    fn new(path: &'a Path) -> Self {
        Self { path, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for TempGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let _ = fs::remove_file(self.path);
        }
    }
}

/// Atomically replaces `path` with `bytes` via `<path>.tmp`.
///
/// On any failure the temporary file is removed and `path` is untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), PublishError> {
    let tmp_path = temp_path(path);

    let mut file = File::create(&tmp_path).map_err(|source| PublishError::CreateTemp {
        path: tmp_path.clone(),
        source,
    })?;
    let guard = TempGuard::new(&tmp_path);

    file.write_all(bytes)
        .and_then(|()| file.sync_all())
        .map_err(|source| PublishError::Write {
            path: tmp_path.clone(),
            source,
        })?;
    drop(file);

    // Atomic rename
    fs::rename(&tmp_path, path).map_err(|source| PublishError::Rename {
        from: tmp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;
    guard.disarm();

    trace!(path = %path.display(), bytes = bytes.len(), "published");
    Ok(())
}

/// Makes rendered output visible at its destination.
#[derive(Debug, Clone)]
pub struct Publisher {
    destination: Destination,
}

impl Publisher {
    pub fn new(destination: Destination) -> Self {
        Self { destination }
    }

    pub fn publish(&self, content: &str) -> Result<(), PublishError> {
        match &self.destination {
            Destination::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(content.as_bytes())
                    .and_then(|()| out.flush())
                    .map_err(PublishError::Stdout)
            }
            Destination::File(path) => write_atomic(path, content.as_bytes()),
        }
    }
}
