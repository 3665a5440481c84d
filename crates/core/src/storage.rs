//! Free-space checks for the upload directory.

use std::io;
use std::path::Path;

use crate::error::CoreError;

/// Bytes available to unprivileged users on the filesystem holding `path`.
#[cfg(unix)]
pub fn free_space(path: &Path) -> io::Result<u64> {
    use std::ffi::CString;
    use std::mem::MaybeUninit;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let mut stat = MaybeUninit::<libc::statvfs>::uninit();

    // Safety: `c_path` is a valid NUL-terminated string and `stat` is only
    // read after the call reports success.
    let ret = unsafe { libc::statvfs(c_path.as_ptr(), stat.as_mut_ptr()) };
    if ret != 0 {
        return Err(io::Error::last_os_error());
    }
    let stat = unsafe { stat.assume_init() };

    Ok(stat.f_bavail as u64 * stat.f_frsize as u64)
}

#[cfg(not(unix))]
pub fn free_space(_path: &Path) -> io::Result<u64> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "free space query requires statvfs",
    ))
}

/// Refuse to accept uploads when fewer than `required` bytes are free.
pub fn ensure_free_space(path: &Path, required: u64) -> Result<(), CoreError> {
    if required == 0 {
        return Ok(());
    }

    let free = free_space(path).map_err(|e| {
        CoreError::Internal(format!(
            "Failed to query free space on {}: {e}",
            path.display()
        ))
    })?;

    if free < required {
        return Err(CoreError::InsufficientStorage(
            "The server does not have enough free space to safely store uploads.".into(),
        ));
    }
    Ok(())
}
