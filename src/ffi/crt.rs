//! Owned handles for the C runtime.
//!
//! File descriptors, `FILE*` streams and `malloc` memory, with acquisition
//! helpers that check the foreign call before taking ownership.
//!
//! Only the owner releases. Calling a release strategy directly needs
//! `unsafe`:
//!
//! ```compile_fail,E0133
//! use owned_handle::ffi::crt::{self, Close};
//! use owned_handle::Release;
//!
//! let fd = crt::open("/dev/null", 0).unwrap();
//! Close::release(fd.get());
//! ```

use std::ffi::CString;

use libc::{c_int, c_void, FILE};

use crate::deleter::PlainDeleter;
use crate::error::{Error, Result};
use crate::handle::Handle;
use crate::nullable::MinusOne;

crate::release_fn!(
    /// `close(2)`; `-1` is the null descriptor.
    pub Close(c_int) -> c_int = libc::close, null = MinusOne
);

crate::release_fn!(
    /// `fclose(3)`.
    pub Fclose(*mut FILE) -> c_int = libc::fclose
);

crate::release_fn!(
    /// `free(3)`.
    pub Free(*mut c_void) = libc::free
);

/// An owned POSIX file descriptor.
pub type OwnedFd = Handle<Close>;

/// An owned C stdio stream.
pub type CFile = Handle<Fclose>;

/// Memory owned through `malloc`/`free`. `free(NULL)` is a no-op, so the
/// deleter does not check.
pub type CBox = Handle<Free, PlainDeleter<Free>>;

fn c_string(what: &str, value: &str) -> Result<CString> {
    CString::new(value)
        .map_err(|_| Error::InvalidArgument(format!("{what} contains null byte: {value:?}")))
}

/// `open(2)` a path and own the descriptor.
pub fn open(path: &str, flags: c_int) -> Result<OwnedFd> {
    let path_c = c_string("path", path)?;

    // SAFETY: the descriptor is fresh and owned by nothing else.
    let fd = unsafe { OwnedFd::from_raw(libc::open(path_c.as_ptr(), flags)) };
    if fd.is_null() {
        let err = Error::last_os_error("open", Some(path));
        log::debug!("open {path} failed: {err}");
        return Err(err);
    }
    Ok(fd)
}

/// `fopen(3)` a path and own the stream.
pub fn fopen(path: &str, mode: &str) -> Result<CFile> {
    let path_c = c_string("path", path)?;
    let mode_c = c_string("mode", mode)?;

    // SAFETY: the stream is fresh and owned by nothing else.
    let file = unsafe { CFile::from_raw(libc::fopen(path_c.as_ptr(), mode_c.as_ptr())) };
    if file.is_null() {
        let err = Error::last_os_error("fopen", Some(path));
        log::debug!("fopen {path} failed: {err}");
        return Err(err);
    }
    Ok(file)
}

/// `malloc(3)` `size` bytes and own the allocation.
pub fn malloc(size: usize) -> Result<CBox> {
    // SAFETY: the allocation is fresh and owned by nothing else.
    let memory = unsafe { CBox::from_raw(libc::malloc(size)) };
    if memory.is_null() && size != 0 {
        let err = Error::last_os_error("malloc", None);
        log::debug!("malloc of {size} bytes failed: {err}");
        return Err(err);
    }
    Ok(memory)
}
