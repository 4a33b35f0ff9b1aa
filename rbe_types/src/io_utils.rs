use crate::{RbeError, Result};
use std::io::{ErrorKind, Read, Write};

/// Fills `buf` completely, or fails with [`RbeError::Truncated`].
pub fn read_exact(r: &mut impl Read, buf: &mut [u8]) -> Result<usize> {
    match r.read_exact(buf) {
        Ok(()) => Ok(buf.len()),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(RbeError::Truncated {
            wanted: buf.len(),
        }),
        Err(e) => Err(RbeError::Io(e)),
    }
}

/// Reads a body whose length was declared by the source itself.
///
/// The declared length is not trusted for preallocation; a short source
/// fails with [`RbeError::Truncated`] after consuming what it had.
pub fn read_vec(r: &mut impl Read, len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(len.min(PREALLOC_LIMIT));
    let got = r.take(len as u64).read_to_end(&mut buf)?;
    if got < len {
        return Err(RbeError::Truncated { wanted: len - got });
    }
    Ok(buf)
}

/// Reads whatever is available up to `buf.len()`; zero means the source is exhausted.
pub fn read_head(r: &mut impl Read, buf: &mut [u8]) -> Result<usize> {
    loop {
        match r.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(RbeError::Io(e)),
        }
    }
}

pub fn write_all(w: &mut impl Write, buf: &[u8]) -> Result<usize> {
    w.write_all(buf)?;
    Ok(buf.len())
}

/// Upper bound on speculative allocation driven by a length read off the wire.
pub const PREALLOC_LIMIT: usize = 64 * 1024;
