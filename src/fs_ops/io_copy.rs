//! Chunked file copy that honours the shutdown flag between chunks.
//!
//! The destination is opened with `create_new`, so a name claimed by someone
//! else in the meantime fails with `AlreadyExists` instead of being clobbered.
//! The data is synced before returning; directory syncs are the caller's job.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

use crate::shutdown;

const CHUNK: usize = 1024 * 1024;

/// Copy `src` into a new file at `dst`. Returns the number of bytes written.
/// A shutdown request aborts with `ErrorKind::Interrupted`; the partial
/// destination is left for the caller to discard.
pub(super) fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let mut input = File::open(src)?;
    let mut output = OpenOptions::new().write(true).create_new(true).open(dst)?;

    let mut chunk = vec![0u8; CHUNK];
    let mut total: u64 = 0;
    loop {
        if shutdown::is_requested() {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "copy cancelled"));
        }
        let n = match input.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        output.write_all(&chunk[..n])?;
        total += n as u64;
    }
    output.sync_all()?;
    Ok(total)
}
