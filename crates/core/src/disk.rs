use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{IndexError, IndexResult};

/// Free and total capacity of the volume holding a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskSpace {
    pub free_bytes: u64,
    pub total_bytes: u64,
}

/// Reports disk space for the volume containing `path`.
///
/// Implementations return [`IndexError::Unsupported`] when the platform has no
/// way to answer.
#[async_trait]
pub trait DiskSpaceProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> IndexResult<DiskSpace>;
}

/// Probe backed by `statvfs(3)`. Free space is what an unprivileged user may
/// still allocate (`f_bavail`).
#[derive(Debug, Default, Clone, Copy)]
pub struct StatvfsProbe;

#[async_trait]
impl DiskSpaceProbe for StatvfsProbe {
    async fn probe(&self, path: &Path) -> IndexResult<DiskSpace> {
        let owned: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || statvfs_space(&owned))
            .await
            .map_err(|e| IndexError::Io {
                path: path.display().to_string(),
                source: io::Error::other(e),
            })?
    }
}

#[cfg(unix)]
#[allow(unsafe_code)]
#[allow(clippy::unnecessary_cast)]
fn statvfs_space(path: &Path) -> IndexResult<DiskSpace> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let shown = path.display().to_string();
    let path_cstr = CString::new(path.as_os_str().as_bytes()).map_err(|_| IndexError::InvalidPath {
        path: shown.clone(),
    })?;

    // SAFETY: statvfs is plain old data and is fully written on success
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let ret = unsafe { libc::statvfs(path_cstr.as_ptr(), &mut stat) };
    if ret != 0 {
        let err = io::Error::last_os_error();
        tracing::error!("statvfs failed for {}: {}", shown, err);
        return Err(IndexError::from_io(shown, err));
    }

    let fragment = stat.f_frsize as u64;
    Ok(DiskSpace {
        free_bytes: (stat.f_bavail as u64).saturating_mul(fragment),
        total_bytes: (stat.f_blocks as u64).saturating_mul(fragment),
    })
}

#[cfg(not(unix))]
fn statvfs_space(_path: &Path) -> IndexResult<DiskSpace> {
    Err(IndexError::Unsupported)
}
