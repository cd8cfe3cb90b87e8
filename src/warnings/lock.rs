//! Host-wide advisory lock guarding the warning check.
//!
//! The lock is an exclusive `flock`-style advisory lock on a file in the
//! shared state directory. Acquisition never blocks: a process that loses
//! the race skips the check instead of waiting for it.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of a lock attempt.
#[derive(Debug)]
pub enum LockAttempt {
    /// The lock is held; it is released when the guard drops.
    Acquired(CheckLock),
    /// Another process holds the lock.
    Contended,
}

/// RAII guard over the exclusive lock. Released on drop.
#[derive(Debug)]
pub struct CheckLock {
    file: File,
    path: PathBuf,
}

impl CheckLock {
    /// Try to take the exclusive lock at `path`, creating the file if absent.
    ///
    /// Returns `Ok(LockAttempt::Contended)` when another holder exists and
    /// `Err` for any other I/O failure (opening the file, unsupported lock).
    pub fn try_acquire(path: &Path) -> io::Result<LockAttempt> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Warning check lock acquired");
                Ok(LockAttempt::Acquired(Self {
                    file,
                    path: path.to_path_buf(),
                }))
            }
            Err(e) if is_contended(&e) => Ok(LockAttempt::Contended),
            Err(e) => Err(e),
        }
    }

    /// Path of the locked file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CheckLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            // Closing the descriptor right after still releases the lock.
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to unlock warning check lock");
        } else {
            tracing::debug!(path = %self.path.display(), "Warning check lock released");
        }
    }
}

fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
