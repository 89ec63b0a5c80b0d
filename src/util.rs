//! Internal utilities.

use std::fs::{File, OpenOptions, Permissions};
use std::io::{self, Write};
use std::os::fd::AsRawFd;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Replaces `path` with `content` via a temporary file and a rename, so
/// readers never see a partially written file.
///
/// A symlinked `path` is followed and its destination replaced, even when
/// the destination does not exist yet. The resulting file has mode `mode`.
///
/// Targets that cannot be renamed over (bind-mounted files, another
/// filesystem) are truncated and rewritten in place instead.
///
/// # Errors
///
/// Returns any I/O error from creating, writing or renaming the file.
pub fn write_atomic(path: &Path, content: &str, mode: u32) -> io::Result<()> {
    let target = resolve_target(path)?;
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    std::fs::set_permissions(tmp.path(), Permissions::from_mode(mode))?;

    match tmp.persist(&target) {
        Ok(_) => Ok(()),
        Err(e) if needs_in_place_write(&e.error) => {
            tracing::debug!(
                path = %target.display(),
                error = %e.error,
                "Cannot rename over target, rewriting in place"
            );
            std::fs::write(&target, content)
        }
        Err(e) => Err(e.error),
    }
}

/// Rename fails with `EBUSY` on bind mounts and `EXDEV` across filesystems.
fn needs_in_place_write(err: &io::Error) -> bool {
    matches!(err.raw_os_error(), Some(libc::EBUSY | libc::EXDEV))
}

/// Follows symlinks without requiring the final destination to exist.
fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    let mut target = path.to_path_buf();
    for _ in 0..MAX_SYMLINK_HOPS {
        match std::fs::symlink_metadata(&target) {
            Ok(meta) if meta.file_type().is_symlink() => {
                let link = std::fs::read_link(&target)?;
                // An absolute `link` replaces the parent on join.
                target = match target.parent() {
                    Some(parent) => parent.join(link),
                    None => link,
                };
            }
            _ => return Ok(target),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("too many levels of symbolic links: {}", path.display()),
    ))
}

const MAX_SYMLINK_HOPS: usize = 40;

/// Exclusive advisory lock held until dropped.
#[derive(Debug)]
pub struct FileLock {
    file: File,
}

impl FileLock {
    /// Opens (creating if needed) `path` and blocks until an exclusive
    /// `flock(2)` is obtained.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from opening or locking the file.
    pub fn acquire(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)?;

        loop {
            // SAFETY: the descriptor is owned by `file` and valid for the call.
            let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX) };
            if rc == 0 {
                break;
            }
            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::Interrupted {
                return Err(err);
            }
        }
        Ok(Self { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // SAFETY: the descriptor is owned by `self.file` and still open.
        unsafe {
            libc::flock(self.file.as_raw_fd(), libc::LOCK_UN);
        }
    }
}
